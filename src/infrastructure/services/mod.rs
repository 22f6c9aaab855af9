//! Infrastructure services

mod endpoint_service;
mod integration_service;
mod person_service;
mod product_service;

pub use endpoint_service::{CreateEndpointRequest, EndpointService, UpdateEndpointRequest};
pub use integration_service::{
    ConnectionRequest, CreateIntegrationRequest, IntegrationService, UpdateIntegrationRequest,
};
pub use person_service::{CreatePersonRequest, PersonService, UpdatePersonRequest};
pub use product_service::{CreateProductRequest, ProductService, UpdateProductRequest};
