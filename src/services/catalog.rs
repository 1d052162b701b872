// Batch catalog - the entry point partners use to browse and route batches

use tracing::{info, instrument, warn};

use crate::algorithms::batch_former::BatchFormer;
use crate::algorithms::route_builder::NearestNeighborRouter;
use crate::algorithms::RouteBuilder;
use crate::config::BatchingConfig;
use crate::error::BatchingError;
use crate::models::{
    batch_id_for, parse_batch_id, Batch, Coordinate, GeocodedOrder, OptimizedRoute, Order,
    OrderStatus,
};
use crate::services::order_store::OrderStore;
use crate::utils::geocoder::Geocoder;

/// Builds ranked batch catalogs from the orders currently waiting for a partner.
///
/// The service keeps no state between calls. Every request reads a fresh
/// snapshot from the order store, so one instance can serve many partners at
/// once.
pub struct BatchCatalogService<S, G> {
    store: S,
    geocoder: G,
    config: BatchingConfig,
}

impl<S: OrderStore, G: Geocoder> BatchCatalogService<S, G> {
    pub fn new(store: S, geocoder: G, config: BatchingConfig) -> Result<Self, BatchingError> {
        config.validate()?;
        Ok(Self {
            store,
            geocoder,
            config,
        })
    }

    /// Ranked batches for a partner at `partner_location`.
    ///
    /// `max_batch_size` overrides the configured limit for this call only.
    /// No waiting orders yields an empty list.
    #[instrument(skip(self))]
    pub fn get_available_batches(
        &self,
        partner_location: Coordinate,
        max_batch_size: Option<usize>,
    ) -> Result<Vec<Batch>, BatchingError> {
        let config = match max_batch_size {
            Some(size) => self.config.with_max_batch_size(size)?,
            None => self.config.clone(),
        };

        let orders = self.store.find_by_statuses(&OrderStatus::BATCHABLE)?;
        if orders.is_empty() {
            info!("no orders waiting for a partner");
            return Ok(Vec::new());
        }

        let orders = self.geocode_orders(orders)?;
        let batches = BatchFormer::new(config)?.form_batches(&orders, partner_location)?;

        info!(
            orders = orders.len(),
            batches = batches.len(),
            "batch catalog ready"
        );
        Ok(batches)
    }

    /// Recomputes the route of a batch from the partner's current position.
    ///
    /// `batch_id` is the comma-joined order id list handed out with the batch.
    /// Orders are routed in the order their ids appear.
    #[instrument(skip(self))]
    pub fn optimize_route(
        &self,
        batch_id: &str,
        partner_location: Coordinate,
    ) -> Result<OptimizedRoute, BatchingError> {
        let ids = parse_batch_id(batch_id);
        let mut orders = if ids.is_empty() {
            Vec::new()
        } else {
            self.store.find_by_ids(&ids)?
        };

        if orders.is_empty() {
            return Err(BatchingError::NotFound {
                batch_id: batch_id.to_string(),
            });
        }
        if orders.len() < ids.len() {
            warn!(
                requested = ids.len(),
                found = orders.len(),
                "some orders of the batch no longer exist"
            );
        }

        orders.sort_by_key(|o| ids.iter().position(|id| *id == o.id));
        let orders = self.geocode_orders(orders)?;

        let router = NearestNeighborRouter::from_config(&self.config);
        let route = router.build_route(partner_location, &orders)?;

        Ok(OptimizedRoute {
            batch_id: batch_id_for(orders.iter().map(GeocodedOrder::id)),
            orders,
            route: route.stops,
            total_distance_km: route.total_distance_km,
            estimated_time_minutes: route.estimated_time_minutes,
        })
    }

    /// Resolves the pickup and delivery coordinates of an order
    pub fn geocode_order(&self, order: Order) -> Result<GeocodedOrder, BatchingError> {
        let pickup = self.geocoder.geocode(&order.pickup_address)?;
        let delivery = self.geocoder.geocode(&order.delivery_address)?;
        Ok(GeocodedOrder::new(order, pickup, delivery))
    }

    fn geocode_orders(&self, orders: Vec<Order>) -> Result<Vec<GeocodedOrder>, BatchingError> {
        orders
            .into_iter()
            .map(|order| self.geocode_order(order))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GeocodeError, OrderStoreError};
    use crate::models::OrderId;
    use crate::services::order_store::InMemoryOrderStore;
    use crate::utils::geocoder::{HashGeocoder, StaticGeocoder};
    use chrono::{TimeZone, Utc};

    struct UnavailableStore;

    impl OrderStore for UnavailableStore {
        fn find_by_statuses(&self, _: &[OrderStatus]) -> Result<Vec<Order>, OrderStoreError> {
            Err(OrderStoreError::Unavailable("connection refused".to_string()))
        }

        fn find_by_ids(&self, _: &[OrderId]) -> Result<Vec<Order>, OrderStoreError> {
            Err(OrderStoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn order(id: &str, restaurant: &str) -> Order {
        Order {
            id: id.to_string(),
            restaurant_id: restaurant.to_string(),
            customer_id: "c1".to_string(),
            total_price: 20.0,
            status: OrderStatus::Ready,
            items: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            pickup_address: format!("{} kitchen", restaurant),
            delivery_address: format!("{} home", id),
        }
    }

    #[test]
    fn test_store_errors_propagate() {
        let service =
            BatchCatalogService::new(UnavailableStore, HashGeocoder::default(), BatchingConfig::default())
                .unwrap();

        let result = service.get_available_batches(Coordinate::new(0.0, 0.0), None);

        assert!(matches!(
            result,
            Err(BatchingError::OrderStore(OrderStoreError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_geocoding_errors_propagate() {
        let store = InMemoryOrderStore::new(vec![order("o1", "r1"), order("o2", "r1")]);
        let service =
            BatchCatalogService::new(store, StaticGeocoder::new(), BatchingConfig::default())
                .unwrap();

        let result = service.get_available_batches(Coordinate::new(0.0, 0.0), None);

        assert!(matches!(
            result,
            Err(BatchingError::Geocoding(GeocodeError::UnknownAddress(_)))
        ));
    }

    #[test]
    fn test_zero_batch_size_override_rejected() {
        let store = InMemoryOrderStore::new(vec![order("o1", "r1")]);
        let service =
            BatchCatalogService::new(store, HashGeocoder::default(), BatchingConfig::default())
                .unwrap();

        let result = service.get_available_batches(Coordinate::new(0.0, 0.0), Some(0));

        assert!(matches!(result, Err(BatchingError::Configuration(_))));
    }

    #[test]
    fn test_optimize_route_blank_id_not_found() {
        let store = InMemoryOrderStore::new(vec![order("o1", "r1")]);
        let service =
            BatchCatalogService::new(store, HashGeocoder::default(), BatchingConfig::default())
                .unwrap();

        let result = service.optimize_route(" , ", Coordinate::new(0.0, 0.0));

        assert!(matches!(result, Err(BatchingError::NotFound { .. })));
    }
}
