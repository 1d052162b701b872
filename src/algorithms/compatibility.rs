use crate::config::BatchingConfig;
use crate::models::{GeocodedOrder, Kilometers, Minutes};

/// Decides whether two orders may share a trip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityMatcher {
    pub max_distance_km: Kilometers,
    pub max_time_window_minutes: Minutes,
}

impl CompatibilityMatcher {
    pub fn new(max_distance_km: Kilometers, max_time_window_minutes: Minutes) -> Self {
        Self {
            max_distance_km,
            max_time_window_minutes,
        }
    }

    pub fn from_config(config: &BatchingConfig) -> Self {
        Self::new(config.max_distance_km, config.max_time_window_minutes)
    }

    /// Orders of the same restaurant are always compatible, since the partner
    /// collects them in one visit. Otherwise the delivery points must be close
    /// and the orders must have been placed within the time window.
    pub fn compatible(&self, o1: &GeocodedOrder, o2: &GeocodedOrder) -> bool {
        if o1.restaurant_id() == o2.restaurant_id() {
            return true;
        }

        if o1.delivery.distance_to(&o2.delivery) > self.max_distance_km {
            return false;
        }

        o1.order.minutes_apart(&o2.order) <= self.max_time_window_minutes
    }

    /// Checks a candidate against every order already in a batch
    pub fn compatible_with_all(&self, batch: &[&GeocodedOrder], candidate: &GeocodedOrder) -> bool {
        batch.iter().all(|member| self.compatible(member, candidate))
    }
}

impl Default for CompatibilityMatcher {
    fn default() -> Self {
        Self::from_config(&BatchingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Order, OrderStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn order(id: &str, restaurant: &str, delivery: Coordinate, minute: i64) -> GeocodedOrder {
        let order = Order {
            id: id.to_string(),
            restaurant_id: restaurant.to_string(),
            customer_id: format!("customer-{}", id),
            total_price: 25.0,
            status: OrderStatus::Ready,
            items: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()
                + Duration::minutes(minute),
            pickup_address: format!("{} kitchen", restaurant),
            delivery_address: format!("{} home", id),
        };
        GeocodedOrder::new(order, Coordinate::new(0.0, 0.0), delivery)
    }

    #[test]
    fn test_same_restaurant_always_compatible() {
        let matcher = CompatibilityMatcher::default();
        let o1 = order("o1", "r1", Coordinate::new(0.0, 0.0), 0);
        let o2 = order("o2", "r1", Coordinate::new(10.0, 10.0), 600);

        assert!(matcher.compatible(&o1, &o2));
        assert!(matcher.compatible(&o2, &o1));
    }

    #[test]
    fn test_distance_threshold() {
        let matcher = CompatibilityMatcher::default();
        let near = order("o1", "r1", Coordinate::new(0.0, 0.0), 0);
        // ~3.3 km north
        let close = order("o2", "r2", Coordinate::new(0.03, 0.0), 5);
        // ~11 km north
        let far = order("o3", "r3", Coordinate::new(0.1, 0.0), 5);

        assert!(matcher.compatible(&near, &close));
        assert!(!matcher.compatible(&near, &far));
    }

    #[test]
    fn test_time_window_threshold() {
        let matcher = CompatibilityMatcher::default();
        let first = order("o1", "r1", Coordinate::new(0.0, 0.0), 0);
        let within = order("o2", "r2", Coordinate::new(0.01, 0.0), 30);
        let outside = order("o3", "r3", Coordinate::new(0.01, 0.0), 31);

        assert!(matcher.compatible(&first, &within));
        assert!(!matcher.compatible(&first, &outside));
        assert!(!matcher.compatible(&outside, &first));
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let config = BatchingConfig {
            max_distance_km: 20.0,
            max_time_window_minutes: 90.0,
            ..BatchingConfig::default()
        };
        let matcher = CompatibilityMatcher::from_config(&config);
        let o1 = order("o1", "r1", Coordinate::new(0.0, 0.0), 0);
        let o2 = order("o2", "r2", Coordinate::new(0.1, 0.0), 60);

        assert!(matcher.compatible(&o1, &o2));
        assert!(!CompatibilityMatcher::default().compatible(&o1, &o2));
    }

    #[test]
    fn test_compatible_with_all_members() {
        let matcher = CompatibilityMatcher::default();
        let a = order("a", "r1", Coordinate::new(0.0, 0.0), 0);
        let b = order("b", "r2", Coordinate::new(0.04, 0.0), 0);
        // within 5 km of `b` but ~8.9 km from `a`
        let c = order("c", "r3", Coordinate::new(0.08, 0.0), 0);

        assert!(matcher.compatible_with_all(&[&b], &c));
        assert!(!matcher.compatible_with_all(&[&a, &b], &c));
    }
}
