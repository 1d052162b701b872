// Batch models for representing groups of orders routed in one trip

use crate::algorithms::ranking::efficiency_score;
use crate::models::{GeocodedOrder, Kilometers, Minutes, Money, OrderId, PlannedRoute, RouteStop};
use serde::{Deserialize, Serialize};

/// Separator used when joining order ids into a batch id
const BATCH_ID_SEPARATOR: &str = ",";

/// How the orders of a batch were grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchKind {
    /// All orders come from the same restaurant
    Restaurant,

    /// Orders from different restaurants paired by compatibility
    CrossRestaurant,
}

/// A set of mutually compatible orders routed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub kind: BatchKind,
    pub orders: Vec<GeocodedOrder>,
    pub route: Vec<RouteStop>,
    pub total_distance_km: Kilometers,
    pub estimated_time_minutes: Minutes,
    pub total_earnings: Money,
    pub efficiency_score: f64,
}

impl Batch {
    /// Builds a batch from its orders and planned route, earning
    /// `commission_rate` of every order's total price
    pub fn new(
        kind: BatchKind,
        orders: Vec<GeocodedOrder>,
        route: PlannedRoute,
        commission_rate: f64,
    ) -> Self {
        let total_earnings: Money = orders
            .iter()
            .map(|o| o.order.total_price * commission_rate)
            .sum();
        let efficiency_score = efficiency_score(total_earnings, route.estimated_time_minutes);

        Self {
            id: batch_id_for(orders.iter().map(GeocodedOrder::id)),
            kind,
            orders,
            route: route.stops,
            total_distance_km: route.total_distance_km,
            estimated_time_minutes: route.estimated_time_minutes,
            total_earnings,
            efficiency_score,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn order_ids(&self) -> Vec<&str> {
        self.orders.iter().map(GeocodedOrder::id).collect()
    }
}

/// Route recomputed for an existing batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    pub batch_id: String,
    pub orders: Vec<GeocodedOrder>,
    pub route: Vec<RouteStop>,
    pub total_distance_km: Kilometers,
    pub estimated_time_minutes: Minutes,
}

/// Joins order ids into the opaque batch identifier handed to partners
pub fn batch_id_for<'a, I>(order_ids: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    order_ids
        .into_iter()
        .collect::<Vec<_>>()
        .join(BATCH_ID_SEPARATOR)
}

/// Splits a batch identifier back into order ids, skipping blank entries
pub fn parse_batch_id(batch_id: &str) -> Vec<OrderId> {
    batch_id
        .split(BATCH_ID_SEPARATOR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_id_joins_in_order() {
        assert_eq!(batch_id_for(["o3", "o1", "o2"]), "o3,o1,o2");
        assert_eq!(batch_id_for(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_parse_batch_id_skips_blanks() {
        assert_eq!(parse_batch_id("o1, o2,,o3 "), vec!["o1", "o2", "o3"]);
        assert!(parse_batch_id(" , ").is_empty());
    }

    #[test]
    fn test_parse_inverts_join() {
        let id = batch_id_for(["a", "b"]);
        assert_eq!(parse_batch_id(&id), vec!["a", "b"]);
    }
}
