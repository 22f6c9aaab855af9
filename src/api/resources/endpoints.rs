//! Endpoint catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Endpoint;
use crate::infrastructure::services;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEndpointBody {
    pub name: String,
    pub url: String,
    pub method: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEndpointBody {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub url: String,
    pub method: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointResponse {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub method: String,
    pub description: String,
    pub category: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<&Endpoint> for EndpointResponse {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            id: endpoint.id().value(),
            name: endpoint.name().to_string(),
            url: endpoint.url().to_string(),
            method: endpoint.method().to_string(),
            description: endpoint.description().to_string(),
            category: endpoint.category().to_string(),
            created_at: endpoint.created_at().to_rfc3339(),
            updated_at: endpoint.updated_at().map(|t| t.to_rfc3339()),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_endpoints).post(create_endpoint))
        .route(
            "/{id}",
            get(get_endpoint).put(update_endpoint).delete(delete_endpoint),
        )
}

/// GET /api/endpoints
pub async fn list_endpoints(
    State(state): State<AppState>,
) -> Result<Json<Vec<EndpointResponse>>, ApiError> {
    let endpoints = state.endpoint_service.list().await?;
    Ok(Json(endpoints.iter().map(EndpointResponse::from).collect()))
}

/// GET /api/endpoints/{id}
pub async fn get_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EndpointResponse>, ApiError> {
    let endpoint = state
        .endpoint_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Endpoint '{}' not found", id)))?;

    Ok(Json(EndpointResponse::from(&endpoint)))
}

/// POST /api/endpoints
pub async fn create_endpoint(
    State(state): State<AppState>,
    Json(body): Json<CreateEndpointBody>,
) -> Result<(StatusCode, Json<EndpointResponse>), ApiError> {
    debug!(name = %body.name, method = %body.method, "Creating endpoint");

    let endpoint = state
        .endpoint_service
        .create(services::CreateEndpointRequest {
            name: body.name,
            url: body.url,
            method: body.method,
            description: body.description,
            category: body.category,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EndpointResponse::from(&endpoint))))
}

/// PUT /api/endpoints/{id}
pub async fn update_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateEndpointBody>,
) -> Result<StatusCode, ApiError> {
    debug!(endpoint_id = %id, "Updating endpoint");

    state
        .endpoint_service
        .update(
            &id,
            services::UpdateEndpointRequest {
                id: body.id,
                name: body.name,
                url: body.url,
                method: body.method,
                description: body.description,
                category: body.category,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/endpoints/{id}
pub async fn delete_endpoint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(endpoint_id = %id, "Deleting endpoint");

    state.endpoint_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EndpointId;

    #[test]
    fn test_endpoint_response_shape() {
        let endpoint = Endpoint::new(
            EndpointId::new(4).unwrap(),
            "Update Person",
            "/api/person/{id}",
            "PUT",
            "Update an existing person record",
            "People",
        )
        .unwrap();

        let json = serde_json::to_value(EndpointResponse::from(&endpoint)).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["method"], "PUT");
        assert!(json["createdAt"].is_string());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn test_update_body_id_is_optional() {
        let body: UpdateEndpointBody = serde_json::from_str(
            r#"{"name": "n", "url": "/u", "method": "GET", "description": "d"}"#,
        )
        .unwrap();

        assert!(body.id.is_none());
        assert_eq!(body.category, "");
    }
}
