// Service layer - the catalog orchestrator and the order store it reads from

pub mod catalog;
pub mod order_store;

pub use self::catalog::BatchCatalogService;
pub use self::order_store::{InMemoryOrderStore, OrderStore};
