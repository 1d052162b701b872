pub mod batch_former;
pub mod compatibility;
pub mod ranking;
pub mod route_builder;

// Common algorithm traits
use crate::error::BatchingError;
use crate::models::{Coordinate, GeocodedOrder, PlannedRoute};

/// Trait for builders of pickup/delivery visiting sequences
pub trait RouteBuilder {
    /// Build a route starting at `start` that picks up and delivers every order
    fn build_route(
        &self,
        start: Coordinate,
        orders: &[GeocodedOrder],
    ) -> Result<PlannedRoute, BatchingError>;
}

impl<R: RouteBuilder + ?Sized> RouteBuilder for &R {
    fn build_route(
        &self,
        start: Coordinate,
        orders: &[GeocodedOrder],
    ) -> Result<PlannedRoute, BatchingError> {
        (**self).build_route(start, orders)
    }
}
