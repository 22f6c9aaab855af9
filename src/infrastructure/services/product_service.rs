//! Product service - CRUD operations for products

use std::sync::Arc;

use tracing::info;

use crate::domain::storage::Storage;
use crate::domain::{DomainError, Person, PersonId, Product, ProductId};

#[derive(Debug, Clone)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub person_id: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
}

pub struct ProductService {
    products: Arc<dyn Storage<Product>>,
    people: Arc<dyn Storage<Person>>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish()
    }
}

impl ProductService {
    pub fn new(products: Arc<dyn Storage<Product>>, people: Arc<dyn Storage<Person>>) -> Self {
        Self { products, people }
    }

    /// Products oldest first, optionally only those owned by one person
    pub async fn list(&self, person_id: Option<&str>) -> Result<Vec<Product>, DomainError> {
        let owner = person_id.map(str::parse::<PersonId>).transpose()?;

        let mut products: Vec<Product> = self
            .products
            .list()
            .await?
            .into_iter()
            .filter(|p| owner.is_none_or(|owner| p.person_id() == owner))
            .collect();
        products.sort_by_key(|p| p.created_at());
        Ok(products)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Product>, DomainError> {
        let product_id: ProductId = id.parse()?;
        self.products.get(&product_id).await
    }

    pub async fn create(&self, request: CreateProductRequest) -> Result<Product, DomainError> {
        let owner = request
            .person_id
            .parse::<PersonId>()
            .map_err(|_| DomainError::validation("Invalid PersonId"))?;

        if !self.people.exists(&owner).await? {
            return Err(DomainError::validation("Invalid PersonId"));
        }

        let product = Product::new(ProductId::generate(), request.name, request.price, owner)?;
        let product = self.products.create(product).await?;

        info!(product_id = %product.id(), person_id = %owner, "Product created");
        Ok(product)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateProductRequest,
    ) -> Result<Product, DomainError> {
        let mut product = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product '{}' not found", id)))?;

        product.update(request.name, request.price)?;
        self.products.update(product).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let product_id: ProductId = id.parse()?;

        if !self.products.delete(&product_id).await? {
            return Err(DomainError::not_found(format!("Product '{}' not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    struct Fixture {
        service: ProductService,
        people: Arc<InMemoryStorage<Person>>,
    }

    fn fixture() -> Fixture {
        let people = Arc::new(InMemoryStorage::new());
        let service = ProductService::new(Arc::new(InMemoryStorage::new()), people.clone());
        Fixture { service, people }
    }

    async fn owner(people: &InMemoryStorage<Person>, name: &str) -> Person {
        people
            .create(Person::new(PersonId::generate(), name, format!("{name}@example.com")).unwrap())
            .await
            .unwrap()
    }

    fn create_request(name: &str, person: &Person) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price: 10.0,
            person_id: person.id().to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_person() {
        let Fixture { service, .. } = fixture();

        let result = service
            .create(CreateProductRequest {
                name: "Laptop".to_string(),
                price: 999.0,
                person_id: PersonId::generate().to_string(),
            })
            .await;

        match result {
            Err(DomainError::Validation { message }) => assert_eq!(message, "Invalid PersonId"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_person_id() {
        let Fixture { service, .. } = fixture();

        let result = service
            .create(CreateProductRequest {
                name: "Laptop".to_string(),
                price: 999.0,
                person_id: "42".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_list_filtered_by_person() {
        let Fixture { service, people } = fixture();
        let ada = owner(&people, "ada").await;
        let bob = owner(&people, "bob").await;
        service.create(create_request("Laptop", &ada)).await.unwrap();
        service.create(create_request("Phone", &bob)).await.unwrap();

        let all = service.list(None).await.unwrap();
        let ada_products = service.list(Some(&ada.id().to_string())).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(ada_products.len(), 1);
        assert_eq!(ada_products[0].name(), "Laptop");
        assert!(service.list(Some("bad-id")).await.is_err());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let Fixture { service, people } = fixture();
        let ada = owner(&people, "ada").await;
        let product = service.create(create_request("Laptop", &ada)).await.unwrap();
        let id = product.id().to_string();

        let updated = service
            .update(
                &id,
                UpdateProductRequest {
                    name: "Gaming laptop".to_string(),
                    price: 1499.0,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price(), 1499.0);

        service.delete(&id).await.unwrap();
        assert!(service.get(&id).await.unwrap().is_none());
        assert!(matches!(
            service.delete(&id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
