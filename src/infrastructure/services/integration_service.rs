//! Integration service - CRUD for stored chains and their execution

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::storage::Storage;
use crate::domain::{
    ChainError, Connection, DomainError, Endpoint, EndpointId, ExecuteRequest, ExecutionResult,
    Integration, IntegrationExecutor, IntegrationId, ResolvedStep,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub endpoint_id: u64,
    pub sequence_number: i32,
}

#[derive(Debug, Clone)]
pub struct CreateIntegrationRequest {
    pub name: String,
    pub connections: Vec<ConnectionRequest>,
}

/// Replaces name and connections
pub type UpdateIntegrationRequest = CreateIntegrationRequest;

pub struct IntegrationService {
    integrations: Arc<dyn Storage<Integration>>,
    endpoints: Arc<dyn Storage<Endpoint>>,
    executor: Arc<dyn IntegrationExecutor>,

    /// Serializes id assignment and the name uniqueness check
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for IntegrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationService")
            .field("executor", &self.executor)
            .finish()
    }
}

impl IntegrationService {
    pub fn new(
        integrations: Arc<dyn Storage<Integration>>,
        endpoints: Arc<dyn Storage<Endpoint>>,
        executor: Arc<dyn IntegrationExecutor>,
    ) -> Self {
        Self {
            integrations,
            endpoints,
            executor,
            write_lock: Mutex::new(()),
        }
    }

    /// All integrations ordered by id
    pub async fn list(&self) -> Result<Vec<Integration>, DomainError> {
        let mut integrations = self.integrations.list().await?;
        integrations.sort_by_key(|i| i.id());
        Ok(integrations)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Integration>, DomainError> {
        let integration_id: IntegrationId = id.parse()?;
        self.integrations.get(&integration_id).await
    }

    pub async fn create(
        &self,
        request: CreateIntegrationRequest,
    ) -> Result<Integration, DomainError> {
        let _guard = self.write_lock.lock().await;

        self.ensure_unique_name(&request.name, None).await?;
        let connections = self.resolve_connections(&request.connections).await?;

        let id = self.next_id().await?;
        let integration = Integration::new(id, request.name.trim(), connections)?;
        let integration = self.integrations.create(integration).await?;

        info!(
            integration_id = %integration.id(),
            connections = integration.connections().len(),
            "Integration created"
        );
        Ok(integration)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateIntegrationRequest,
    ) -> Result<Integration, DomainError> {
        let integration_id: IntegrationId = id.parse()?;
        let _guard = self.write_lock.lock().await;

        let mut integration = self
            .integrations
            .get(&integration_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Integration '{}' not found", id)))?;

        self.ensure_unique_name(&request.name, Some(integration_id))
            .await?;
        let connections = self.resolve_connections(&request.connections).await?;

        integration.update(request.name.trim(), connections)?;
        self.integrations.update(integration).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let integration_id: IntegrationId = id.parse()?;

        if !self.integrations.delete(&integration_id).await? {
            return Err(DomainError::not_found(format!(
                "Integration '{}' not found",
                id
            )));
        }
        Ok(())
    }

    /// Load the integration and its endpoints, then run the chain
    pub async fn execute(
        &self,
        id: IntegrationId,
        request: ExecuteRequest,
    ) -> Result<ExecutionResult, ChainError> {
        let integration = self
            .integrations
            .get(&id)
            .await
            .map_err(|e| ChainError::storage(e.to_string()))?
            .ok_or_else(|| ChainError::integration_not_found(id))?;

        let mut endpoints = HashMap::new();
        for connection in integration.connections() {
            if endpoints.contains_key(&connection.endpoint_id) {
                continue;
            }
            if let Some(endpoint) = self
                .endpoints
                .get(&connection.endpoint_id)
                .await
                .map_err(|e| ChainError::storage(e.to_string()))?
            {
                endpoints.insert(connection.endpoint_id, endpoint);
            }
        }

        let steps = ResolvedStep::plan(&integration, &endpoints)?;
        debug!(integration_id = %id, steps = steps.len(), "Integration planned");

        self.executor.execute(id, &steps, &request).await
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        except: Option<IntegrationId>,
    ) -> Result<(), DomainError> {
        let taken = self
            .integrations
            .list()
            .await?
            .iter()
            .any(|i| Some(i.id()) != except && i.has_name(name));

        if taken {
            return Err(DomainError::conflict(format!(
                "Integration '{}' already exists",
                name.trim()
            )));
        }
        Ok(())
    }

    /// Check every referenced endpoint exists
    async fn resolve_connections(
        &self,
        requests: &[ConnectionRequest],
    ) -> Result<Vec<Connection>, DomainError> {
        let mut connections = Vec::with_capacity(requests.len());

        for request in requests {
            let endpoint_id = EndpointId::new(request.endpoint_id)?;
            if !self.endpoints.exists(&endpoint_id).await? {
                return Err(DomainError::validation(format!(
                    "Endpoint '{}' does not exist",
                    endpoint_id
                )));
            }
            connections.push(Connection::new(endpoint_id, request.sequence_number));
        }

        Ok(connections)
    }

    async fn next_id(&self) -> Result<IntegrationId, DomainError> {
        let max = self
            .integrations
            .list()
            .await?
            .iter()
            .map(|i| i.id().value())
            .max()
            .unwrap_or(0);
        IntegrationId::new(max + 1)
    }
}
