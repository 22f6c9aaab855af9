//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage, the default backend
///
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().storage_key(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }
}

fn lock_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Failed to acquire storage lock: {}", e))
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;

        Ok(entities.get(&key.storage_key()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().storage_key();
        let mut entities = self.entities.write().map_err(lock_error)?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().storage_key();
        let mut entities = self.entities.write().map_err(lock_error)?;

        if !entities.contains_key(&key) {
            return Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self.entities.write().map_err(lock_error)?;

        Ok(entities.remove(&key.storage_key()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;

        Ok(entities.contains_key(&key.storage_key()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(lock_error)?;

        Ok(entities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::person::{Person, PersonId};

    fn person(name: &str) -> Person {
        Person::new(PersonId::generate(), name, format!("{}@example.com", name)).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Person> = InMemoryStorage::new();
        let ada = person("ada");

        storage.create(ada.clone()).await.unwrap();

        let result = storage.get(&ada.id()).await.unwrap().unwrap();
        assert_eq!(result.name(), "ada");
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Person> = InMemoryStorage::new();
        let ada = person("ada");

        storage.create(ada.clone()).await.unwrap();
        let result = storage.create(ada).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update() {
        let storage: InMemoryStorage<Person> = InMemoryStorage::new();
        let mut ada = person("ada");
        storage.create(ada.clone()).await.unwrap();

        ada.update("Ada Lovelace", "ada@example.com").unwrap();
        storage.update(ada.clone()).await.unwrap();

        let result = storage.get(&ada.id()).await.unwrap().unwrap();
        assert_eq!(result.name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let storage: InMemoryStorage<Person> = InMemoryStorage::new();

        let result = storage.update(person("ghost")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage: InMemoryStorage<Person> = InMemoryStorage::new();
        let ada = person("ada");
        storage.create(ada.clone()).await.unwrap();

        assert!(storage.delete(&ada.id()).await.unwrap());
        assert!(!storage.exists(&ada.id()).await.unwrap());
        assert!(!storage.delete(&ada.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_with_entities_and_count() {
        let storage = InMemoryStorage::with_entities(vec![person("a"), person("b"), person("c")]);

        assert_eq!(storage.count().await.unwrap(), 3);
        assert_eq!(storage.list().await.unwrap().len(), 3);
    }
}
