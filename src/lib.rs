// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-exports for convenience
pub use algorithms::batch_former::BatchFormer;
pub use algorithms::compatibility::CompatibilityMatcher;
pub use algorithms::route_builder::NearestNeighborRouter;
pub use algorithms::RouteBuilder;
pub use config::BatchingConfig;
pub use error::BatchingError;
pub use models::{Batch, Coordinate, GeocodedOrder, OptimizedRoute, Order, PlannedRoute};
pub use services::{BatchCatalogService, InMemoryOrderStore, OrderStore};
pub use utils::geocoder::{Geocoder, HashGeocoder, StaticGeocoder};
