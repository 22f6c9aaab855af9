//! Endpoint catalog service

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::domain::storage::Storage;
use crate::domain::{DomainError, Endpoint, EndpointId};

#[derive(Debug, Clone)]
pub struct CreateEndpointRequest {
    pub name: String,
    pub url: String,
    pub method: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct UpdateEndpointRequest {
    /// Must match the path id when present
    pub id: Option<u64>,
    pub name: String,
    pub url: String,
    pub method: String,
    pub description: String,
    pub category: String,
}

/// Catalog entries created on first start: (name, url, method, description, category)
const SEED_ENDPOINTS: [(&str, &str, &str, &str, &str); 11] = [
    ("Get All People", "/api/person", "GET", "Retrieve all people records", "People"),
    ("Get Person by ID", "/api/person/{id}", "GET", "Retrieve a specific person by their ID", "People"),
    ("Create Person", "/api/person", "POST", "Create a new person record", "People"),
    ("Update Person", "/api/person/{id}", "PUT", "Update an existing person record", "People"),
    ("Delete Person", "/api/person/{id}", "DELETE", "Delete a person record", "People"),
    ("Get All Products", "/api/product", "GET", "Retrieve all product records", "Products"),
    ("Get Products by Person", "/api/product?personId={id}", "GET", "Retrieve the products owned by a person", "Products"),
    ("Get Product by ID", "/api/product/{productId}", "GET", "Retrieve a specific product by its ID", "Products"),
    ("Create Product", "/api/product", "POST", "Create a new product for a person", "Products"),
    ("Update Product", "/api/product/{productId}", "PUT", "Update an existing product record", "Products"),
    ("Delete Product", "/api/product/{productId}", "DELETE", "Delete a product record", "Products"),
];

pub struct EndpointService {
    storage: Arc<dyn Storage<Endpoint>>,

    /// Serializes id assignment
    create_lock: Mutex<()>,
}

impl std::fmt::Debug for EndpointService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointService").finish()
    }
}

impl EndpointService {
    pub fn new(storage: Arc<dyn Storage<Endpoint>>) -> Self {
        Self {
            storage,
            create_lock: Mutex::new(()),
        }
    }

    /// All endpoints ordered by id
    pub async fn list(&self) -> Result<Vec<Endpoint>, DomainError> {
        let mut endpoints = self.storage.list().await?;
        endpoints.sort_by_key(|e| e.id());
        Ok(endpoints)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Endpoint>, DomainError> {
        let endpoint_id: EndpointId = id.parse()?;
        self.storage.get(&endpoint_id).await
    }

    pub async fn get_by_id(&self, id: EndpointId) -> Result<Option<Endpoint>, DomainError> {
        self.storage.get(&id).await
    }

    pub async fn create(&self, request: CreateEndpointRequest) -> Result<Endpoint, DomainError> {
        let _guard = self.create_lock.lock().await;

        let id = self.next_id().await?;
        let endpoint = Endpoint::new(
            id,
            request.name,
            request.url,
            request.method,
            request.description,
            request.category,
        )?;
        let endpoint = self.storage.create(endpoint).await?;

        info!(endpoint_id = %endpoint.id(), method = %endpoint.method(), url = %endpoint.url(), "Endpoint created");
        Ok(endpoint)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateEndpointRequest,
    ) -> Result<Endpoint, DomainError> {
        let endpoint_id: EndpointId = id.parse()?;

        if let Some(body_id) = request.id {
            if body_id != endpoint_id.value() {
                return Err(DomainError::validation(format!(
                    "Endpoint id {} in body does not match path id {}",
                    body_id, endpoint_id
                )));
            }
        }

        let mut endpoint = self
            .storage
            .get(&endpoint_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Endpoint '{}' not found", id)))?;

        endpoint.update(
            request.name,
            request.url,
            request.method,
            request.description,
            request.category,
        )?;
        self.storage.update(endpoint).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let endpoint_id: EndpointId = id.parse()?;

        if !self.storage.delete(&endpoint_id).await? {
            return Err(DomainError::not_found(format!("Endpoint '{}' not found", id)));
        }
        Ok(())
    }

    /// Populate an empty catalog with the bundled endpoints; returns how many were added
    pub async fn seed_defaults(&self) -> Result<usize, DomainError> {
        if self.storage.count().await? > 0 {
            return Ok(0);
        }

        for (name, url, method, description, category) in SEED_ENDPOINTS {
            self.create(CreateEndpointRequest {
                name: name.to_string(),
                url: url.to_string(),
                method: method.to_string(),
                description: description.to_string(),
                category: category.to_string(),
            })
            .await?;
        }

        info!(count = SEED_ENDPOINTS.len(), "Seeded endpoint catalog");
        Ok(SEED_ENDPOINTS.len())
    }

    async fn next_id(&self) -> Result<EndpointId, DomainError> {
        let max = self
            .storage
            .list()
            .await?
            .iter()
            .map(|e| e.id().value())
            .max()
            .unwrap_or(0);
        EndpointId::new(max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mapping::MappingStore;
    use crate::infrastructure::mapping::load_mapping_store;
    use crate::infrastructure::storage::InMemoryStorage;

    fn service() -> EndpointService {
        EndpointService::new(Arc::new(InMemoryStorage::new()))
    }

    fn request(name: &str, method: &str) -> CreateEndpointRequest {
        CreateEndpointRequest {
            name: name.to_string(),
            url: "/api/person".to_string(),
            method: method.to_string(),
            description: "desc".to_string(),
            category: "People".to_string(),
        }
    }

    fn bundled_mappings() -> MappingStore {
        let root = env!("CARGO_MANIFEST_DIR");
        load_mapping_store(
            format!("{root}/config/mappings/endpoint_mapping.json"),
            format!("{root}/config/mappings/chain_mapping.json"),
        )
    }

    #[tokio::test]
    async fn test_ids_assigned_sequentially() {
        let service = service();

        let first = service.create(request("List", "GET")).await.unwrap();
        let second = service.create(request("Create", "POST")).await.unwrap();

        assert_eq!(first.id().value(), 1);
        assert_eq!(second.id().value(), 2);

        service.delete("2").await.unwrap();
        let third = service.create(request("Again", "POST")).await.unwrap();
        assert_eq!(third.id().value(), 2);
    }

    #[tokio::test]
    async fn test_create_validates_method() {
        let service = service();

        let result = service.create(request("Trace", "TRACE")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_rejects_mismatched_body_id() {
        let service = service();
        service.create(request("List", "GET")).await.unwrap();

        let result = service
            .update(
                "1",
                UpdateEndpointRequest {
                    id: Some(5),
                    name: "List".to_string(),
                    url: "/api/person".to_string(),
                    method: "GET".to_string(),
                    description: "desc".to_string(),
                    category: "People".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let service = service();

        let result = service
            .update(
                "9",
                UpdateEndpointRequest {
                    id: None,
                    name: "x".to_string(),
                    url: "/x".to_string(),
                    method: "GET".to_string(),
                    description: "d".to_string(),
                    category: "c".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(matches!(service.delete("9").await, Err(DomainError::NotFound { .. })));
        assert!(matches!(service.get("abc").await, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_seed_defaults_once() {
        let service = service();

        assert_eq!(service.seed_defaults().await.unwrap(), SEED_ENDPOINTS.len());
        assert_eq!(service.seed_defaults().await.unwrap(), 0);
        assert_eq!(service.list().await.unwrap().len(), SEED_ENDPOINTS.len());
    }

    #[tokio::test]
    async fn test_seeded_endpoints_resolve_against_bundled_mappings() {
        let service = service();
        service.seed_defaults().await.unwrap();
        let mappings = bundled_mappings();

        for endpoint in service.list().await.unwrap() {
            assert!(
                mappings
                    .lookup(endpoint.method(), endpoint.url(), endpoint.category())
                    .is_ok(),
                "{} {}",
                endpoint.method(),
                endpoint.url()
            );
        }
    }
}
