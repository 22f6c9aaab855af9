//! Integration endpoints, including chain execution

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{EndpointId, ExecuteRequest, ExecutionResult, Integration, IntegrationId};
use crate::infrastructure::services;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionBody {
    pub api_endpoint_id: u64,
    pub sequence_number: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationBody {
    pub name: String,
    #[serde(default)]
    pub connections: Vec<ConnectionBody>,
}

impl From<IntegrationBody> for services::CreateIntegrationRequest {
    fn from(body: IntegrationBody) -> Self {
        Self {
            name: body.name,
            connections: body
                .connections
                .into_iter()
                .map(|c| services::ConnectionRequest {
                    endpoint_id: c.api_endpoint_id,
                    sequence_number: c.sequence_number,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResponse {
    pub id: u64,
    pub name: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
    pub connections: Vec<ConnectionBody>,
}

impl From<&Integration> for IntegrationResponse {
    fn from(integration: &Integration) -> Self {
        Self {
            id: integration.id().value(),
            name: integration.name().to_string(),
            created_at: integration.created_at().to_rfc3339(),
            last_modified_at: integration.last_modified_at().map(|t| t.to_rfc3339()),
            connections: integration
                .ordered_connections()
                .into_iter()
                .map(|c| ConnectionBody {
                    api_endpoint_id: c.endpoint_id.value(),
                    sequence_number: c.sequence_number,
                })
                .collect(),
        }
    }
}

/// Body of `POST /{id}/execute`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecuteBody {
    pub parameters: HashMap<String, String>,

    /// Keyed by endpoint id in string form
    pub request_bodies: HashMap<String, Value>,

    pub token: Option<String>,
}

impl ExecuteBody {
    /// An empty body means no parameters, bodies or token
    fn from_bytes(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(bytes).map_err(|e| {
            ApiError::bad_request(format!("Invalid JSON data: {}", e)).with_code("json_parse_error")
        })
    }

    fn into_request(self) -> Result<ExecuteRequest, ApiError> {
        let mut request_bodies = HashMap::with_capacity(self.request_bodies.len());
        for (key, body) in self.request_bodies {
            let endpoint_id: EndpointId = key.parse().map_err(|_| {
                ApiError::bad_request(format!("Invalid endpoint id '{}' in requestBodies", key))
                    .with_param("requestBodies")
            })?;
            request_bodies.insert(endpoint_id, body);
        }

        Ok(ExecuteRequest {
            parameters: self.parameters,
            request_bodies,
            token: self.token.filter(|t| !t.is_empty()),
        })
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_integrations).post(create_integration))
        .route(
            "/{id}",
            get(get_integration)
                .put(update_integration)
                .delete(delete_integration),
        )
        .route("/{id}/execute", post(execute_integration))
}

/// GET /api/integrations
pub async fn list_integrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<IntegrationResponse>>, ApiError> {
    let integrations = state.integration_service.list().await?;
    Ok(Json(
        integrations.iter().map(IntegrationResponse::from).collect(),
    ))
}

/// GET /api/integrations/{id}
pub async fn get_integration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IntegrationResponse>, ApiError> {
    let integration = state
        .integration_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Integration '{}' not found", id)))?;

    Ok(Json(IntegrationResponse::from(&integration)))
}

/// POST /api/integrations
pub async fn create_integration(
    State(state): State<AppState>,
    Json(body): Json<IntegrationBody>,
) -> Result<(StatusCode, Json<IntegrationResponse>), ApiError> {
    debug!(name = %body.name, connections = body.connections.len(), "Creating integration");

    let integration = state.integration_service.create(body.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(IntegrationResponse::from(&integration)),
    ))
}

/// PUT /api/integrations/{id}
pub async fn update_integration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<IntegrationBody>,
) -> Result<StatusCode, ApiError> {
    debug!(integration_id = %id, "Updating integration");

    state.integration_service.update(&id, body.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/integrations/{id}
pub async fn delete_integration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.integration_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/integrations/{id}/execute
pub async fn execute_integration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ExecutionResult>, ApiError> {
    let integration_id: IntegrationId = id.parse()?;
    let request = ExecuteBody::from_bytes(&body)?.into_request()?;

    info!(
        integration_id = %integration_id,
        parameters = request.parameters.len(),
        bodies = request.request_bodies.len(),
        has_token = request.token.is_some(),
        "Executing integration"
    );

    let result = state
        .integration_service
        .execute(integration_id, request)
        .await?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_body_defaults() {
        let body: ExecuteBody = serde_json::from_str("{}").unwrap();
        let request = body.into_request().unwrap();

        assert!(request.parameters.is_empty());
        assert!(request.request_bodies.is_empty());
        assert!(request.token.is_none());
    }

    #[test]
    fn test_execute_body_from_empty_bytes() {
        assert!(ExecuteBody::from_bytes(b"").unwrap().parameters.is_empty());
        assert!(ExecuteBody::from_bytes(b"  \n").is_ok());

        let err = ExecuteBody::from_bytes(b"{not json").unwrap_err();
        assert_eq!(err.response.error.code.as_deref(), Some("json_parse_error"));
    }

    #[test]
    fn test_execute_body_parses_endpoint_keys() {
        let body: ExecuteBody = serde_json::from_str(
            r#"{
                "parameters": {"personId": "p-1"},
                "requestBodies": {"3": {"name": "Ada"}},
                "token": "secret"
            }"#,
        )
        .unwrap();
        let request = body.into_request().unwrap();

        let key = EndpointId::new(3).unwrap();
        assert_eq!(request.request_bodies[&key]["name"], "Ada");
        assert_eq!(request.parameters["personId"], "p-1");
        assert_eq!(request.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_execute_body_rejects_bad_keys() {
        let body: ExecuteBody =
            serde_json::from_str(r#"{"requestBodies": {"first": {}}}"#).unwrap();
        let err = body.into_request().unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param.as_deref(), Some("requestBodies"));
    }

    #[test]
    fn test_integration_body_maps_connections() {
        let body: IntegrationBody = serde_json::from_str(
            r#"{"name": "Onboard", "connections": [{"apiEndpointId": 3, "sequenceNumber": 1}]}"#,
        )
        .unwrap();
        let request: services::CreateIntegrationRequest = body.into();

        assert_eq!(request.connections[0].endpoint_id, 3);
        assert_eq!(request.connections[0].sequence_number, 1);
    }
}
