//! API Integration Gateway
//!
//! CRUD for people, products, an endpoint catalog and integrations, plus an
//! executor that runs an integration as a sequential chain of HTTP calls
//! whose responses feed later steps through mapping contracts.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::MappingStore;
use infrastructure::{
    http::{HttpTransport, ReqwestTransport},
    integration::{ChainExecutor, ChainExecutorConfig, FixedDelay, StepDelay},
    mapping::load_mapping_store,
    services::{EndpointService, IntegrationService, PersonService, ProductService},
    storage::{Repositories, StorageConfig, StorageFactory},
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_settings(
        &config.storage.backend,
        config.storage.database_url.as_deref(),
    )?;
    info!(backend = ?storage_config.storage_type(), "Storage backend selected");

    let repositories = StorageFactory::create(&storage_config).await?;

    let mappings = Arc::new(load_mapping_store(
        &config.mappings.endpoint_mapping_path,
        &config.mappings.chain_mapping_path,
    ));

    let timeout = config.executor.request_timeout_secs.map(Duration::from_secs);
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(timeout)?);
    let delay: Arc<dyn StepDelay> = Arc::new(FixedDelay::from_millis(config.executor.step_delay_ms));

    let executor_config = ChainExecutorConfig {
        base_url: config.executor.base_url.clone(),
        allow_unresolved_placeholders: config.executor.allow_unresolved_placeholders,
    };

    let (state, endpoint_service) =
        build_app_state(repositories, mappings, transport, delay, executor_config);

    if config.storage.seed_endpoints {
        endpoint_service.seed_defaults().await?;
    }

    Ok(state)
}

/// Wire services over the given repositories and executor collaborators
///
/// The concrete endpoint service is returned alongside the state so callers
/// can seed the catalog.
pub fn build_app_state(
    repositories: Repositories,
    mappings: Arc<MappingStore>,
    transport: Arc<dyn HttpTransport>,
    delay: Arc<dyn StepDelay>,
    executor_config: ChainExecutorConfig,
) -> (AppState, Arc<EndpointService>) {
    let executor = Arc::new(ChainExecutor::new(
        mappings.clone(),
        transport,
        delay,
        executor_config,
    ));

    let person_service = Arc::new(PersonService::new(
        repositories.people.clone(),
        repositories.products.clone(),
    ));
    let product_service = Arc::new(ProductService::new(
        repositories.products.clone(),
        repositories.people.clone(),
    ));
    let endpoint_service = Arc::new(EndpointService::new(repositories.endpoints.clone()));
    let integration_service = Arc::new(IntegrationService::new(
        repositories.integrations.clone(),
        repositories.endpoints.clone(),
        executor,
    ));

    let state = AppState::new(
        person_service,
        product_service,
        endpoint_service.clone(),
        integration_service,
        mappings,
    );

    (state, endpoint_service)
}
