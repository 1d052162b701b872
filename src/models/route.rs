// Route models for representing multi-stop delivery trips

use crate::models::{Coordinate, Kilometers, Minutes, OrderId, RestaurantId};
use serde::{Deserialize, Serialize};

/// Whether a stop collects an order or hands it over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Pickup,
    Delivery,
}

/// A single stop in a visiting sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub kind: StopKind,
    pub order_id: OrderId,
    pub restaurant_id: RestaurantId,
    pub coordinate: Coordinate,

    /// Distance travelled from the previous stop (or the start) to this one
    pub leg_distance_km: Kilometers,
}

/// Visiting sequence produced by a route builder
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub stops: Vec<RouteStop>,
    pub total_distance_km: Kilometers,
    pub estimated_time_minutes: Minutes,
}

impl PlannedRoute {
    /// Route that visits nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pickups(&self) -> impl Iterator<Item = &RouteStop> {
        self.stops.iter().filter(|s| s.kind == StopKind::Pickup)
    }

    pub fn deliveries(&self) -> impl Iterator<Item = &RouteStop> {
        self.stops.iter().filter(|s| s.kind == StopKind::Delivery)
    }
}
