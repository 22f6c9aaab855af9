//! People endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::products::ProductResponse;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Person, Product};
use crate::infrastructure::services;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    pub name: String,
    pub email: String,
}

/// Person as listed, without products
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummaryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<&Person> for PersonSummaryResponse {
    fn from(person: &Person) -> Self {
        Self {
            id: person.id().to_string(),
            name: person.name().to_string(),
            email: person.email().to_string(),
            created_at: person.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    #[serde(flatten)]
    pub person: PersonSummaryResponse,
    pub products: Vec<ProductResponse>,
}

impl PersonResponse {
    fn new(person: &Person, products: &[Product]) -> Self {
        Self {
            person: PersonSummaryResponse::from(person),
            products: products.iter().map(ProductResponse::from).collect(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_people).post(create_person))
        .route(
            "/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
}

/// GET /api/person
pub async fn list_people(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonSummaryResponse>>, ApiError> {
    let people = state.person_service.list().await?;
    Ok(Json(people.iter().map(PersonSummaryResponse::from).collect()))
}

/// GET /api/person/{id}
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PersonResponse>, ApiError> {
    debug!(person_id = %id, "Getting person");

    let (person, products) = state
        .person_service
        .get_with_products(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Person '{}' not found", id)))?;

    Ok(Json(PersonResponse::new(&person, &products)))
}

/// POST /api/person
pub async fn create_person(
    State(state): State<AppState>,
    Json(request): Json<PersonRequest>,
) -> Result<(StatusCode, Json<PersonResponse>), ApiError> {
    let person = state
        .person_service
        .create(services::CreatePersonRequest {
            name: request.name,
            email: request.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PersonResponse::new(&person, &[]))))
}

/// PUT /api/person/{id}
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PersonRequest>,
) -> Result<StatusCode, ApiError> {
    debug!(person_id = %id, "Updating person");

    state
        .person_service
        .update(
            &id,
            services::UpdatePersonRequest {
                name: request.name,
                email: request.email,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/person/{id}
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(person_id = %id, "Deleting person");

    state.person_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonId;

    #[test]
    fn test_person_response_flattens_summary() {
        let person = Person::new(PersonId::generate(), "Ada", "ada@example.com").unwrap();
        let json = serde_json::to_value(PersonResponse::new(&person, &[])).unwrap();

        assert_eq!(json["name"], "Ada");
        assert!(json["createdAt"].is_string());
        assert_eq!(json["products"], serde_json::json!([]));
    }

    #[test]
    fn test_person_request_deserialization() {
        let request: PersonRequest =
            serde_json::from_str(r#"{"name": "Ada", "email": "ada@example.com"}"#).unwrap();

        assert_eq!(request.email, "ada@example.com");
    }
}
