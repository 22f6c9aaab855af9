//! Application state for HTTP handlers

use std::sync::Arc;

use crate::domain::{
    ChainError, DomainError, Endpoint, ExecuteRequest, ExecutionResult, Integration,
    IntegrationId, MappingStore, Person, Product,
};
use crate::infrastructure::services::{
    CreateEndpointRequest, CreateIntegrationRequest, CreatePersonRequest, CreateProductRequest,
    EndpointService, IntegrationService, PersonService, ProductService, UpdateEndpointRequest,
    UpdateIntegrationRequest, UpdatePersonRequest, UpdateProductRequest,
};

/// Shared services, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub person_service: Arc<dyn PersonServiceTrait>,
    pub product_service: Arc<dyn ProductServiceTrait>,
    pub endpoint_service: Arc<dyn EndpointServiceTrait>,
    pub integration_service: Arc<dyn IntegrationServiceTrait>,
    pub mappings: Arc<MappingStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mapping_entries", &self.mappings.endpoint_name_count())
            .finish()
    }
}

impl AppState {
    pub fn new(
        person_service: Arc<dyn PersonServiceTrait>,
        product_service: Arc<dyn ProductServiceTrait>,
        endpoint_service: Arc<dyn EndpointServiceTrait>,
        integration_service: Arc<dyn IntegrationServiceTrait>,
        mappings: Arc<MappingStore>,
    ) -> Self {
        Self {
            person_service,
            product_service,
            endpoint_service,
            integration_service,
            mappings,
        }
    }
}

#[async_trait::async_trait]
pub trait PersonServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Person>, DomainError>;
    async fn get_with_products(
        &self,
        id: &str,
    ) -> Result<Option<(Person, Vec<Product>)>, DomainError>;
    async fn create(&self, request: CreatePersonRequest) -> Result<Person, DomainError>;
    async fn update(&self, id: &str, request: UpdatePersonRequest) -> Result<Person, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
pub trait ProductServiceTrait: Send + Sync {
    async fn list(&self, person_id: Option<&str>) -> Result<Vec<Product>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Product>, DomainError>;
    async fn create(&self, request: CreateProductRequest) -> Result<Product, DomainError>;
    async fn update(&self, id: &str, request: UpdateProductRequest)
    -> Result<Product, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
pub trait EndpointServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Endpoint>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Endpoint>, DomainError>;
    async fn create(&self, request: CreateEndpointRequest) -> Result<Endpoint, DomainError>;
    async fn update(
        &self,
        id: &str,
        request: UpdateEndpointRequest,
    ) -> Result<Endpoint, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
pub trait IntegrationServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Integration>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Integration>, DomainError>;
    async fn create(&self, request: CreateIntegrationRequest) -> Result<Integration, DomainError>;
    async fn update(
        &self,
        id: &str,
        request: UpdateIntegrationRequest,
    ) -> Result<Integration, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn execute(
        &self,
        id: IntegrationId,
        request: ExecuteRequest,
    ) -> Result<ExecutionResult, ChainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl PersonServiceTrait for PersonService {
    async fn list(&self) -> Result<Vec<Person>, DomainError> {
        PersonService::list(self).await
    }

    async fn get_with_products(
        &self,
        id: &str,
    ) -> Result<Option<(Person, Vec<Product>)>, DomainError> {
        PersonService::get_with_products(self, id).await
    }

    async fn create(&self, request: CreatePersonRequest) -> Result<Person, DomainError> {
        PersonService::create(self, request).await
    }

    async fn update(&self, id: &str, request: UpdatePersonRequest) -> Result<Person, DomainError> {
        PersonService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        PersonService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl ProductServiceTrait for ProductService {
    async fn list(&self, person_id: Option<&str>) -> Result<Vec<Product>, DomainError> {
        ProductService::list(self, person_id).await
    }

    async fn get(&self, id: &str) -> Result<Option<Product>, DomainError> {
        ProductService::get(self, id).await
    }

    async fn create(&self, request: CreateProductRequest) -> Result<Product, DomainError> {
        ProductService::create(self, request).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> Result<Product, DomainError> {
        ProductService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        ProductService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl EndpointServiceTrait for EndpointService {
    async fn list(&self) -> Result<Vec<Endpoint>, DomainError> {
        EndpointService::list(self).await
    }

    async fn get(&self, id: &str) -> Result<Option<Endpoint>, DomainError> {
        EndpointService::get(self, id).await
    }

    async fn create(&self, request: CreateEndpointRequest) -> Result<Endpoint, DomainError> {
        EndpointService::create(self, request).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateEndpointRequest,
    ) -> Result<Endpoint, DomainError> {
        EndpointService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        EndpointService::delete(self, id).await
    }
}

#[async_trait::async_trait]
impl IntegrationServiceTrait for IntegrationService {
    async fn list(&self) -> Result<Vec<Integration>, DomainError> {
        IntegrationService::list(self).await
    }

    async fn get(&self, id: &str) -> Result<Option<Integration>, DomainError> {
        IntegrationService::get(self, id).await
    }

    async fn create(&self, request: CreateIntegrationRequest) -> Result<Integration, DomainError> {
        IntegrationService::create(self, request).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateIntegrationRequest,
    ) -> Result<Integration, DomainError> {
        IntegrationService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        IntegrationService::delete(self, id).await
    }

    async fn execute(
        &self,
        id: IntegrationId,
        request: ExecuteRequest,
    ) -> Result<ExecutionResult, ChainError> {
        IntegrationService::execute(self, id, request).await
    }
}
