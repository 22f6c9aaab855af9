//! Sequential integration executor
//!
//! Runs each planned step in order: resolve its mapping contract, check the
//! required names, fill the URL template, call the endpoint and fold the
//! provided response fields into the run's context.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{
    ChainError, EndpointId, ExecuteRequest, ExecutionContext, ExecutionResult,
    IntegrationExecutor, IntegrationId, MappingStore, ResolvedStep, StepResult,
};
use crate::domain::integration::{unresolved_placeholders, value_to_context_string};
use crate::infrastructure::http::{HttpTransport, OutboundRequest};

use super::delay::StepDelay;

/// Status recorded when no HTTP response was received
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

#[derive(Debug, Clone)]
pub struct ChainExecutorConfig {
    /// Prefix for relative endpoint URLs
    pub base_url: String,

    /// Send URLs that still contain `{name}` tokens instead of failing the run
    pub allow_unresolved_placeholders: bool,
}

impl Default for ChainExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            allow_unresolved_placeholders: false,
        }
    }
}

pub struct ChainExecutor {
    mappings: Arc<MappingStore>,
    transport: Arc<dyn HttpTransport>,
    delay: Arc<dyn StepDelay>,
    config: ChainExecutorConfig,
}

impl std::fmt::Debug for ChainExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainExecutor")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .finish()
    }
}

impl ChainExecutor {
    pub fn new(
        mappings: Arc<MappingStore>,
        transport: Arc<dyn HttpTransport>,
        delay: Arc<dyn StepDelay>,
        config: ChainExecutorConfig,
    ) -> Self {
        Self {
            mappings,
            transport,
            delay,
            config,
        }
    }

    /// Absolute URLs pass through; anything else is joined to the base URL
    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn build_request(
        &self,
        step: &ResolvedStep,
        url: String,
        request: &ExecuteRequest,
    ) -> OutboundRequest {
        let endpoint = &step.endpoint;
        let mut outbound = OutboundRequest::new(endpoint.method(), url);

        if endpoint.accepts_body() {
            if let Some(body) = request.request_bodies.get(&endpoint.id()) {
                outbound = outbound.with_body(body.clone());
            }
        }

        if let Some(token) = &request.token {
            outbound = outbound.with_bearer_token(token.clone());
        }

        outbound
    }

    async fn run_step(
        &self,
        step: &ResolvedStep,
        context: &mut ExecutionContext,
        request: &ExecuteRequest,
    ) -> Result<StepResult, ChainError> {
        let endpoint = &step.endpoint;
        let sequence = step.sequence_number;

        let contract = self
            .mappings
            .lookup(endpoint.method(), endpoint.url(), endpoint.category())
            .map_err(|e| ChainError::mapping(endpoint.id(), sequence, e))?;

        if let Some(missing) = contract
            .requires
            .iter()
            .find(|name| !context.satisfies(name, &request.parameters))
        {
            return Err(ChainError::missing_parameter(
                missing.clone(),
                endpoint.id(),
                sequence,
            ));
        }

        let path = context.substitute(endpoint.url(), &request.parameters);
        let leftover = unresolved_placeholders(&path);
        if let Some(name) = leftover.first() {
            if !self.config.allow_unresolved_placeholders {
                return Err(ChainError::unresolved_placeholder(
                    name.clone(),
                    endpoint.id(),
                    sequence,
                ));
            }
            warn!(
                endpoint_id = %endpoint.id(),
                sequence = sequence,
                placeholders = ?leftover,
                "Sending URL with unresolved placeholders"
            );
        }

        let url = self.resolve_url(&path);
        debug!(
            endpoint_id = %endpoint.id(),
            sequence = sequence,
            method = %endpoint.method(),
            url = %url,
            "Calling endpoint"
        );

        let outbound = self.build_request(step, url, request);
        let started = Instant::now();
        let outcome = self.transport.send(outbound).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(response) => {
                info!(
                    endpoint_id = %endpoint.id(),
                    sequence = sequence,
                    status = response.status,
                    elapsed_ms = elapsed_ms,
                    "Endpoint call completed"
                );

                if response.is_success() && !contract.provides.is_empty() {
                    harvest(context, &contract.provides, &response.body, endpoint.id());
                }

                StepResult {
                    endpoint_id: endpoint.id(),
                    status_code: response.status,
                    response: response.body,
                    execution_time_ms: elapsed_ms,
                }
            }
            Err(e) => {
                warn!(
                    endpoint_id = %endpoint.id(),
                    sequence = sequence,
                    error = %e,
                    elapsed_ms = elapsed_ms,
                    "Endpoint call failed"
                );

                StepResult {
                    endpoint_id: endpoint.id(),
                    status_code: TRANSPORT_FAILURE_STATUS,
                    response: e.to_string(),
                    execution_time_ms: elapsed_ms,
                }
            }
        };

        Ok(result)
    }
}

/// Copy provided top-level response fields into the context
fn harvest(
    context: &mut ExecutionContext,
    provides: &IndexMap<String, String>,
    body: &str,
    endpoint_id: EndpointId,
) {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(endpoint_id = %endpoint_id, error = %e, "Response is not valid JSON");
            return;
        }
    };

    let Some(fields) = parsed.as_object() else {
        warn!(endpoint_id = %endpoint_id, "Response is not a JSON object");
        return;
    };

    for (field, key) in provides {
        match fields.get(field).and_then(value_to_context_string) {
            Some(value) => {
                debug!(endpoint_id = %endpoint_id, field = %field, key = %key, "Context updated");
                context.insert(key.clone(), value);
            }
            None => {
                debug!(endpoint_id = %endpoint_id, field = %field, "Provided field absent");
            }
        }
    }
}

#[async_trait]
impl IntegrationExecutor for ChainExecutor {
    async fn execute(
        &self,
        integration_id: IntegrationId,
        steps: &[ResolvedStep],
        request: &ExecuteRequest,
    ) -> Result<ExecutionResult, ChainError> {
        let started = Instant::now();
        let mut context = ExecutionContext::new();
        let mut results = Vec::with_capacity(steps.len());

        info!(
            integration_id = %integration_id,
            steps = steps.len(),
            has_token = request.token.is_some(),
            "Executing integration"
        );

        for (index, step) in steps.iter().enumerate() {
            let result = self.run_step(step, &mut context, request).await.inspect_err(|e| {
                warn!(
                    integration_id = %integration_id,
                    sequence = step.sequence_number,
                    error = %e,
                    "Integration aborted"
                );
            })?;
            results.push(result);

            if index + 1 < steps.len() {
                self.delay.wait().await;
            }
        }

        info!(
            integration_id = %integration_id,
            steps = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Integration completed"
        );

        Ok(ExecutionResult { results })
    }
}
