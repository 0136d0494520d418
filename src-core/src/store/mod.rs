//! Clients for the external data store holding targets and orders.

pub mod memory_store;
pub mod rest_client;
pub mod store_config;

pub use memory_store::InMemoryStore;
pub use rest_client::RestStoreClient;
pub use store_config::StoreConfig;
