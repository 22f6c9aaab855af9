//! Storage factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::domain::endpoint::Endpoint;
use crate::domain::integration::Integration;
use crate::domain::person::Person;
use crate::domain::product::Product;
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

pub const PEOPLE_TABLE: &str = "people";
pub const PRODUCTS_TABLE: &str = "products";
pub const ENDPOINTS_TABLE: &str = "api_endpoints";
pub const INTEGRATIONS_TABLE: &str = "api_integrations";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    /// Build from the configured backend name and optional database URL
    pub fn from_settings(backend: &str, database_url: Option<&str>) -> Result<Self, DomainError> {
        match backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(Self::InMemory),
            StorageType::Postgres => database_url.map(Self::postgres_url).ok_or_else(|| {
                DomainError::configuration("storage.database_url is required for postgres")
            }),
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// One storage per entity type
#[derive(Debug, Clone)]
pub struct Repositories {
    pub people: Arc<dyn Storage<Person>>,
    pub products: Arc<dyn Storage<Product>>,
    pub endpoints: Arc<dyn Storage<Endpoint>>,
    pub integrations: Arc<dyn Storage<Integration>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            people: Arc::new(InMemoryStorage::new()),
            products: Arc::new(InMemoryStorage::new()),
            endpoints: Arc::new(InMemoryStorage::new()),
            integrations: Arc::new(InMemoryStorage::new()),
        }
    }
}

#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Create every repository on the configured backend
    pub async fn create(config: &StorageConfig) -> Result<Repositories, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory storage");
                Ok(Repositories::in_memory())
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Using PostgreSQL storage"
                );
                let pool = pg_config.connect().await?;

                Ok(Repositories {
                    people: Self::postgres_table(&pool, PEOPLE_TABLE).await?,
                    products: Self::postgres_table(&pool, PRODUCTS_TABLE).await?,
                    endpoints: Self::postgres_table(&pool, ENDPOINTS_TABLE).await?,
                    integrations: Self::postgres_table(&pool, INTEGRATIONS_TABLE).await?,
                })
            }
        }
    }

    async fn postgres_table<E>(
        pool: &sqlx::PgPool,
        table_name: &str,
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        let storage = PostgresStorage::<E>::new(pool.clone(), table_name);
        storage.ensure_table().await?;
        Ok(Arc::new(storage))
    }
}
