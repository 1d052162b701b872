// Models module - exports all model types

mod batch;
mod location;
mod order;
mod route;

// Re-export model types
pub use self::batch::{batch_id_for, parse_batch_id, Batch, BatchKind, OptimizedRoute};
pub use self::location::Coordinate;
pub use self::order::{GeocodedOrder, Order, OrderItem, OrderStatus};
pub use self::route::{PlannedRoute, RouteStop, StopKind};

// Common type aliases for improved code readability
pub type OrderId = String;
pub type RestaurantId = String;
pub type CustomerId = String;
pub type Money = f64;
pub type Kilometers = f64;
pub type Minutes = f64;
