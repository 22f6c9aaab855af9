//! Integration domain: stored endpoint chains and their execution model

mod context;
mod entity;
mod error;
mod executor;

pub use context::{
    placeholder_name, unresolved_placeholders, value_to_context_string, ExecutionContext,
};
pub use entity::{Connection, Integration, IntegrationId, MAX_INTEGRATION_NAME_LENGTH};
pub use error::ChainError;
pub use executor::{ExecuteRequest, ExecutionResult, IntegrationExecutor, ResolvedStep, StepResult};
