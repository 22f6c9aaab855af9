//! Person service - CRUD operations for people

use std::sync::Arc;

use tracing::info;

use crate::domain::storage::Storage;
use crate::domain::{DomainError, Person, PersonId, Product};

#[derive(Debug, Clone)]
pub struct CreatePersonRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct UpdatePersonRequest {
    pub name: String,
    pub email: String,
}

pub struct PersonService {
    people: Arc<dyn Storage<Person>>,
    products: Arc<dyn Storage<Product>>,
}

impl std::fmt::Debug for PersonService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonService").finish()
    }
}

impl PersonService {
    pub fn new(people: Arc<dyn Storage<Person>>, products: Arc<dyn Storage<Product>>) -> Self {
        Self { people, products }
    }

    /// All people, oldest first
    pub async fn list(&self) -> Result<Vec<Person>, DomainError> {
        let mut people = self.people.list().await?;
        people.sort_by_key(|p| p.created_at());
        Ok(people)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Person>, DomainError> {
        let person_id: PersonId = id.parse()?;
        self.people.get(&person_id).await
    }

    /// A person together with the products they own
    pub async fn get_with_products(
        &self,
        id: &str,
    ) -> Result<Option<(Person, Vec<Product>)>, DomainError> {
        let Some(person) = self.get(id).await? else {
            return Ok(None);
        };

        let products = self.products_of(person.id()).await?;
        Ok(Some((person, products)))
    }

    pub async fn create(&self, request: CreatePersonRequest) -> Result<Person, DomainError> {
        let person = Person::new(PersonId::generate(), request.name, request.email)?;
        let person = self.people.create(person).await?;

        info!(person_id = %person.id(), "Person created");
        Ok(person)
    }

    pub async fn update(&self, id: &str, request: UpdatePersonRequest) -> Result<Person, DomainError> {
        let mut person = self
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Person '{}' not found", id)))?;

        person.update(request.name, request.email)?;
        self.people.update(person).await
    }

    /// Delete a person and every product they own
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let person_id: PersonId = id.parse()?;

        if !self.people.exists(&person_id).await? {
            return Err(DomainError::not_found(format!("Person '{}' not found", id)));
        }

        let owned = self.products_of(person_id).await?;
        for product in &owned {
            self.products.delete(&product.id()).await?;
        }
        self.people.delete(&person_id).await?;

        info!(person_id = %person_id, products_removed = owned.len(), "Person deleted");
        Ok(())
    }

    async fn products_of(&self, person_id: PersonId) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self
            .products
            .list()
            .await?
            .into_iter()
            .filter(|p| p.person_id() == person_id)
            .collect();
        products.sort_by_key(|p| p.created_at());
        Ok(products)
    }
}
