//! Integration executor trait and run records

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{Integration, IntegrationId};
use super::error::ChainError;
use crate::domain::endpoint::{Endpoint, EndpointId};

/// Caller input for one run
#[derive(Debug, Clone, Default)]
pub struct ExecuteRequest {
    pub parameters: HashMap<String, String>,

    /// JSON bodies for POST/PUT endpoints, keyed by endpoint
    pub request_bodies: HashMap<EndpointId, Value>,

    /// Forwarded as `Authorization: Bearer` on every call of the run
    pub token: Option<String>,
}

impl ExecuteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, endpoint_id: EndpointId, body: Value) -> Self {
        self.request_bodies.insert(endpoint_id, body);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Outcome of one outbound call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub endpoint_id: EndpointId,
    pub status_code: u16,
    pub response: String,
    pub execution_time_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub results: Vec<StepResult>,
}

/// An endpoint paired with the sequence number it runs at
#[derive(Debug, Clone)]
pub struct ResolvedStep {
    pub sequence_number: i32,
    pub endpoint: Endpoint,
}

impl ResolvedStep {
    /// Pair every connection with its endpoint, in execution order
    pub fn plan(
        integration: &Integration,
        endpoints: &HashMap<EndpointId, Endpoint>,
    ) -> Result<Vec<ResolvedStep>, ChainError> {
        integration
            .ordered_connections()
            .into_iter()
            .map(|connection| {
                endpoints
                    .get(&connection.endpoint_id)
                    .cloned()
                    .map(|endpoint| ResolvedStep {
                        sequence_number: connection.sequence_number,
                        endpoint,
                    })
                    .ok_or_else(|| {
                        ChainError::endpoint_not_found(
                            connection.endpoint_id,
                            connection.sequence_number,
                        )
                    })
            })
            .collect()
    }
}

/// Runs a planned chain of endpoint calls
#[async_trait]
pub trait IntegrationExecutor: Send + Sync + std::fmt::Debug {
    async fn execute(
        &self,
        integration_id: IntegrationId,
        steps: &[ResolvedStep],
        request: &ExecuteRequest,
    ) -> Result<ExecutionResult, ChainError>;
}
