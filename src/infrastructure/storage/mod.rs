//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{
    Repositories, StorageConfig, StorageFactory, StorageType, ENDPOINTS_TABLE,
    INTEGRATIONS_TABLE, PEOPLE_TABLE, PRODUCTS_TABLE,
};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};
