// Order model representing read-only snapshots handed over by the order store

use crate::models::{Coordinate, CustomerId, Minutes, Money, OrderId, RestaurantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order as reported by the order store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Ready,
    Preparing,
    PickedUp,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Statuses an order may have while it is still waiting for a partner
    pub const BATCHABLE: [OrderStatus; 2] = [OrderStatus::Ready, OrderStatus::Pending];
}

/// A single line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

/// Snapshot of a customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub restaurant_id: RestaurantId,
    pub customer_id: CustomerId,
    pub total_price: Money,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,

    /// Address of the restaurant the order is picked up from
    pub pickup_address: String,

    /// Address of the customer the order is delivered to
    pub delivery_address: String,
}

impl Order {
    /// Absolute difference between the creation times of two orders
    pub fn minutes_apart(&self, other: &Order) -> Minutes {
        let delta = self.created_at.signed_duration_since(other.created_at);
        delta.num_milliseconds().abs() as f64 / 60_000.0
    }
}

/// An order together with its resolved pickup and delivery coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub pickup: Coordinate,
    pub delivery: Coordinate,
}

impl GeocodedOrder {
    pub fn new(order: Order, pickup: Coordinate, delivery: Coordinate) -> Self {
        Self {
            order,
            pickup,
            delivery,
        }
    }

    pub fn id(&self) -> &str {
        &self.order.id
    }

    pub fn restaurant_id(&self) -> &str {
        &self.order.restaurant_id
    }
}
