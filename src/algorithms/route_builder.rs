use std::collections::BTreeSet;

use tracing::{error, trace};

use crate::algorithms::RouteBuilder;
use crate::config::{BatchingConfig, DEFAULT_SPEED_FACTOR_MIN_PER_KM};
use crate::error::BatchingError;
use crate::models::{Coordinate, GeocodedOrder, Kilometers, PlannedRoute, RouteStop, StopKind};

/// Next stop chosen by the nearest-neighbor search
#[derive(Debug, Clone, Copy)]
struct Candidate {
    kind: StopKind,
    index: usize,
    distance: Kilometers,
}

/// Greedy nearest-neighbor router for pickup and delivery sequences.
///
/// From the current position the router always moves to the closest stop that
/// may be visited next: any pickup not yet made, or the delivery of an order
/// already picked up. It is a local heuristic, not an optimal tour. Each step
/// scans at most `2n` stops, so a batch of `n` orders costs O(n²), which is
/// fine for the handful of orders a partner carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNeighborRouter {
    /// Minutes needed to travel one kilometer
    pub speed_factor_min_per_km: f64,
}

impl NearestNeighborRouter {
    pub fn new(speed_factor_min_per_km: f64) -> Self {
        Self {
            speed_factor_min_per_km,
        }
    }

    pub fn from_config(config: &BatchingConfig) -> Self {
        Self::new(config.speed_factor_min_per_km)
    }

    fn finish(&self, stops: Vec<RouteStop>, total_distance_km: Kilometers) -> PlannedRoute {
        PlannedRoute {
            stops,
            total_distance_km,
            estimated_time_minutes: total_distance_km * self.speed_factor_min_per_km,
        }
    }

    /// Direct trip: start -> restaurant -> customer
    fn single_order_route(&self, start: Coordinate, order: &GeocodedOrder) -> PlannedRoute {
        let to_pickup = start.distance_to(&order.pickup);
        let to_delivery = order.pickup.distance_to(&order.delivery);

        let stops = vec![
            make_stop(StopKind::Pickup, order, to_pickup),
            make_stop(StopKind::Delivery, order, to_delivery),
        ];
        self.finish(stops, to_pickup + to_delivery)
    }

    fn nearest_neighbor_route(
        &self,
        start: Coordinate,
        orders: &[GeocodedOrder],
    ) -> Result<PlannedRoute, BatchingError> {
        // Orders are referenced by their index in `orders`. An index moves from
        // the pickup set to the delivery set when picked up, and leaves the
        // delivery set only once its delivery stop has been visited.
        let mut pending_pickups: BTreeSet<usize> = (0..orders.len()).collect();
        let mut pending_deliveries: BTreeSet<usize> = BTreeSet::new();

        let mut current = start;
        let mut stops = Vec::with_capacity(orders.len() * 2);
        let mut total_distance = 0.0;

        // Every step removes exactly one stop from the two sets
        let max_steps = orders.len() * 2;
        for _ in 0..max_steps {
            if pending_pickups.is_empty() && pending_deliveries.is_empty() {
                break;
            }

            let next = nearest_stop(current, orders, &pending_pickups, &pending_deliveries)
                .ok_or_else(|| {
                    let message = format!(
                        "no reachable stop with {} pickups and {} deliveries pending",
                        pending_pickups.len(),
                        pending_deliveries.len()
                    );
                    error!(%message, "route construction stalled");
                    BatchingError::InvariantViolation(message)
                })?;

            let order = &orders[next.index];
            match next.kind {
                StopKind::Pickup => {
                    pending_pickups.remove(&next.index);
                    pending_deliveries.insert(next.index);
                    current = order.pickup;
                }
                StopKind::Delivery => {
                    pending_deliveries.remove(&next.index);
                    current = order.delivery;
                }
            }

            trace!(order_id = order.id(), kind = ?next.kind, leg_km = next.distance, "visit stop");
            total_distance += next.distance;
            stops.push(make_stop(next.kind, order, next.distance));
        }

        if !pending_pickups.is_empty() || !pending_deliveries.is_empty() {
            let message = format!(
                "route not finished after {} steps ({} pickups, {} deliveries pending)",
                max_steps,
                pending_pickups.len(),
                pending_deliveries.len()
            );
            error!(%message, "route construction did not terminate");
            return Err(BatchingError::InvariantViolation(message));
        }

        Ok(self.finish(stops, total_distance))
    }
}

impl Default for NearestNeighborRouter {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_FACTOR_MIN_PER_KM)
    }
}

impl RouteBuilder for NearestNeighborRouter {
    fn build_route(
        &self,
        start: Coordinate,
        orders: &[GeocodedOrder],
    ) -> Result<PlannedRoute, BatchingError> {
        match orders {
            [] => Ok(PlannedRoute::empty()),
            [order] => Ok(self.single_order_route(start, order)),
            _ => self.nearest_neighbor_route(start, orders),
        }
    }
}

/// Closest pending stop from `current`. Ties go to the first pickup in input
/// order, then to the first delivery. Non-finite distances are never chosen.
fn nearest_stop(
    current: Coordinate,
    orders: &[GeocodedOrder],
    pending_pickups: &BTreeSet<usize>,
    pending_deliveries: &BTreeSet<usize>,
) -> Option<Candidate> {
    let pickups = pending_pickups.iter().map(|&index| Candidate {
        kind: StopKind::Pickup,
        index,
        distance: current.distance_to(&orders[index].pickup),
    });
    let deliveries = pending_deliveries.iter().map(|&index| Candidate {
        kind: StopKind::Delivery,
        index,
        distance: current.distance_to(&orders[index].delivery),
    });

    let mut best: Option<Candidate> = None;
    for candidate in pickups.chain(deliveries) {
        if !candidate.distance.is_finite() {
            continue;
        }
        if best.map_or(true, |b| candidate.distance < b.distance) {
            best = Some(candidate);
        }
    }
    best
}

fn make_stop(kind: StopKind, order: &GeocodedOrder, leg_distance_km: Kilometers) -> RouteStop {
    let coordinate = match kind {
        StopKind::Pickup => order.pickup,
        StopKind::Delivery => order.delivery,
    };

    RouteStop {
        kind,
        order_id: order.order.id.clone(),
        restaurant_id: order.order.restaurant_id.clone(),
        coordinate,
        leg_distance_km,
    }
}
