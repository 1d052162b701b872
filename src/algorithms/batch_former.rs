use std::collections::HashMap;

use tracing::debug;

use crate::algorithms::compatibility::CompatibilityMatcher;
use crate::algorithms::ranking::rank_batches;
use crate::algorithms::route_builder::NearestNeighborRouter;
use crate::algorithms::RouteBuilder;
use crate::config::BatchingConfig;
use crate::error::BatchingError;
use crate::models::{Batch, BatchKind, Coordinate, GeocodedOrder};

/// Groups ready orders into trips and ranks them by earnings per minute
#[derive(Debug, Clone)]
pub struct BatchFormer<R = NearestNeighborRouter> {
    config: BatchingConfig,
    matcher: CompatibilityMatcher,
    router: R,
}

impl BatchFormer<NearestNeighborRouter> {
    /// Creates a batch former routing with the nearest-neighbor heuristic
    pub fn new(config: BatchingConfig) -> Result<Self, BatchingError> {
        let router = NearestNeighborRouter::from_config(&config);
        Self::with_router(config, router)
    }
}

impl<R: RouteBuilder> BatchFormer<R> {
    /// Creates a batch former using a custom route builder
    pub fn with_router(config: BatchingConfig, router: R) -> Result<Self, BatchingError> {
        config.validate()?;
        Ok(Self {
            matcher: CompatibilityMatcher::from_config(&config),
            config,
            router,
        })
    }

    /// Forms batches for a partner standing at `partner_location`.
    ///
    /// Restaurants with several orders get same-restaurant batches of at most
    /// `max_batch_size` orders. Orders whose restaurant has nothing else ready
    /// are paired across restaurants when compatible. The result is sorted by
    /// descending efficiency score.
    pub fn form_batches(
        &self,
        orders: &[GeocodedOrder],
        partner_location: Coordinate,
    ) -> Result<Vec<Batch>, BatchingError> {
        let groups = group_by_restaurant(orders);

        let mut batches = Vec::new();
        let mut unassigned = Vec::new();
        for group in groups {
            if group.len() < 2 {
                unassigned.extend(group);
                continue;
            }
            for chunk in group.chunks(self.config.max_batch_size) {
                batches.push(self.make_batch(BatchKind::Restaurant, chunk, partner_location)?);
            }
        }
        let restaurant_batches = batches.len();

        let cross_batches = self.cross_restaurant_batches(&unassigned, partner_location)?;
        let batched_orders: usize = cross_batches.iter().map(Batch::len).sum();
        debug!(
            orders = orders.len(),
            restaurant_batches,
            cross_restaurant_batches = cross_batches.len(),
            unbatched = unassigned.len() - batched_orders,
            "formed batches"
        );
        batches.extend(cross_batches);

        rank_batches(&mut batches);
        Ok(batches)
    }

    /// Greedily grows a batch from every order not yet used. A candidate joins
    /// only if it is compatible with every order already in the batch.
    fn cross_restaurant_batches(
        &self,
        unassigned: &[&GeocodedOrder],
        partner_location: Coordinate,
    ) -> Result<Vec<Batch>, BatchingError> {
        let mut batches = Vec::new();
        let mut used = vec![false; unassigned.len()];

        for seed in 0..unassigned.len() {
            if used[seed] {
                continue;
            }

            let mut members = vec![unassigned[seed]];
            let mut member_slots = vec![seed];
            for candidate in 0..unassigned.len() {
                if members.len() >= self.config.max_batch_size {
                    break;
                }
                if candidate == seed || used[candidate] {
                    continue;
                }
                if self
                    .matcher
                    .compatible_with_all(&members, unassigned[candidate])
                {
                    members.push(unassigned[candidate]);
                    member_slots.push(candidate);
                }
            }

            if members.len() < 2 && !self.config.emit_singleton_cross_restaurant {
                debug!(
                    order_id = unassigned[seed].id(),
                    "no compatible order found, leaving order unbatched"
                );
                continue;
            }

            for slot in member_slots {
                used[slot] = true;
            }
            batches.push(self.make_batch(BatchKind::CrossRestaurant, &members, partner_location)?);
        }

        Ok(batches)
    }

    fn make_batch(
        &self,
        kind: BatchKind,
        members: &[&GeocodedOrder],
        partner_location: Coordinate,
    ) -> Result<Batch, BatchingError> {
        let orders: Vec<GeocodedOrder> = members.iter().map(|&o| o.clone()).collect();
        let route = self.router.build_route(partner_location, &orders)?;

        Ok(Batch::new(kind, orders, route, self.config.commission_rate))
    }
}

/// Groups orders by restaurant. Groups appear in the order their restaurant is
/// first seen, and orders keep their input order within a group.
fn group_by_restaurant(orders: &[GeocodedOrder]) -> Vec<Vec<&GeocodedOrder>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&GeocodedOrder>> = Vec::new();

    for order in orders {
        let slot = *positions.entry(order.restaurant_id()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(order);
    }

    groups
}
