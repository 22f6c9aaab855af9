//! Product endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Product;
use crate::infrastructure::services;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    pub name: String,
    pub price: f64,
    pub person_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductBody {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub person_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub created_at: String,
    pub person_id: String,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price(),
            created_at: product.created_at().to_rfc3339(),
            person_id: product.person_id().to_string(),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// GET /api/product[?personId=]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state
        .product_service
        .list(query.person_id.as_deref())
        .await?;

    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

/// GET /api/product/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .product_service
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product '{}' not found", id)))?;

    Ok(Json(ProductResponse::from(&product)))
}

/// POST /api/product
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductBody>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    debug!(person_id = %body.person_id, "Creating product");

    let product = state
        .product_service
        .create(services::CreateProductRequest {
            name: body.name,
            price: body.price,
            person_id: body.person_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// PUT /api/product/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProductBody>,
) -> Result<StatusCode, ApiError> {
    state
        .product_service
        .update(
            &id,
            services::UpdateProductRequest {
                name: body.name,
                price: body.price,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/product/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.product_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_uses_camel_case() {
        let body: CreateProductBody = serde_json::from_str(
            r#"{"name": "Laptop", "price": 999.99, "personId": "9f1c0a4e-0000-4000-8000-000000000000"}"#,
        )
        .unwrap();

        assert_eq!(body.price, 999.99);
        assert!(body.person_id.starts_with("9f1c"));
    }
}
