// Order store collaborator and an in-memory implementation

use crate::error::OrderStoreError;
use crate::models::{Order, OrderId, OrderStatus};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Read access to order snapshots owned by an external system
pub trait OrderStore: Send + Sync {
    /// Orders whose status is one of `statuses`, oldest first
    fn find_by_statuses(&self, statuses: &[OrderStatus]) -> Result<Vec<Order>, OrderStoreError>;

    /// Orders whose id is one of `ids`; unknown ids are skipped
    fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, OrderStoreError>;
}

impl<S: OrderStore + ?Sized> OrderStore for Box<S> {
    fn find_by_statuses(&self, statuses: &[OrderStatus]) -> Result<Vec<Order>, OrderStoreError> {
        (**self).find_by_statuses(statuses)
    }

    fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, OrderStoreError> {
        (**self).find_by_ids(ids)
    }
}

impl<S: OrderStore + ?Sized> OrderStore for &S {
    fn find_by_statuses(&self, statuses: &[OrderStatus]) -> Result<Vec<Order>, OrderStoreError> {
        (**self).find_by_statuses(statuses)
    }

    fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, OrderStoreError> {
        (**self).find_by_ids(ids)
    }
}

/// Order store holding a fixed snapshot in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryOrderStore {
    orders: Vec<Order>,
}

impl InMemoryOrderStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Loads a JSON array of orders
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, OrderStoreError> {
        let json_str = fs::read_to_string(path)?;
        let orders: Vec<Order> = serde_json::from_str(&json_str)?;
        Ok(Self::new(orders))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn find_by_statuses(&self, statuses: &[OrderStatus]) -> Result<Vec<Order>, OrderStoreError> {
        let mut found: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| statuses.contains(&o.status))
            .cloned()
            .collect();
        // Stable, so orders created at the same instant keep snapshot order
        found.sort_by_key(|o| o.created_at);
        Ok(found)
    }

    fn find_by_ids(&self, ids: &[OrderId]) -> Result<Vec<Order>, OrderStoreError> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        Ok(self
            .orders
            .iter()
            .filter(|o| wanted.contains(o.id.as_str()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn order(id: &str, status: OrderStatus, minute: i64) -> Order {
        Order {
            id: id.to_string(),
            restaurant_id: "r1".to_string(),
            customer_id: "c1".to_string(),
            total_price: 10.0,
            status,
            items: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minute),
            pickup_address: "kitchen".to_string(),
            delivery_address: "home".to_string(),
        }
    }

    fn create_test_store() -> InMemoryOrderStore {
        InMemoryOrderStore::new(vec![
            order("late", OrderStatus::Ready, 20),
            order("done", OrderStatus::Delivered, 0),
            order("early", OrderStatus::Pending, 5),
            order("cooking", OrderStatus::Preparing, 1),
        ])
    }

    #[test]
    fn test_find_by_statuses_sorted_by_creation() {
        let store = create_test_store();

        let found = store.find_by_statuses(&OrderStatus::BATCHABLE).unwrap();
        let ids: Vec<&str> = found.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_find_by_ids_skips_unknown() {
        let store = create_test_store();

        let found = store
            .find_by_ids(&["done".to_string(), "missing".to_string()])
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "done");
    }

    #[test]
    fn test_len_and_is_empty() {
        assert!(InMemoryOrderStore::default().is_empty());

        let store = create_test_store();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = InMemoryOrderStore::from_json_file("does/not/exist.json");

        assert!(matches!(result, Err(OrderStoreError::Io(_))));
    }
}
