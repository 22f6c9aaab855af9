//! Domain layer - Core business logic and entities

pub mod endpoint;
pub mod error;
pub mod integration;
pub mod mapping;
pub mod person;
pub mod product;
pub mod storage;

pub use endpoint::{Endpoint, EndpointId};
pub use error::DomainError;
pub use integration::{
    ChainError, Connection, ExecuteRequest, ExecutionContext, ExecutionResult, Integration,
    IntegrationExecutor, IntegrationId, ResolvedStep, StepResult,
};
pub use mapping::{MappingContract, MappingError, MappingStore};
pub use person::{Person, PersonId};
pub use product::{Product, ProductId};
pub use storage::{Storage, StorageEntity, StorageKey};
