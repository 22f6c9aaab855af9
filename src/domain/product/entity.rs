//! Product entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::person::PersonId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("Invalid product ID '{}'", s)))
    }
}

impl StorageKey for ProductId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

/// A product owned by exactly one person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    created_at: DateTime<Utc>,
    person_id: PersonId,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        person_id: PersonId,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        validate(&name, price)?;

        Ok(Self {
            id,
            name,
            price,
            created_at: Utc::now(),
            person_id,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    pub fn update(&mut self, name: impl Into<String>, price: f64) -> Result<(), DomainError> {
        let name = name.into();
        validate(&name, price)?;

        self.name = name;
        self.price = price;
        Ok(())
    }
}

impl StorageEntity for Product {
    type Key = ProductId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

fn validate(name: &str, price: f64) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Name cannot be empty"));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation("Price must be a non-negative number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let owner = PersonId::generate();
        let product = Product::new(ProductId::generate(), "Laptop", 999.99, owner).unwrap();

        assert_eq!(product.name(), "Laptop");
        assert_eq!(product.price(), 999.99);
        assert_eq!(product.person_id(), owner);
    }

    #[test]
    fn test_product_validation() {
        let owner = PersonId::generate();
        assert!(Product::new(ProductId::generate(), "", 1.0, owner).is_err());
        assert!(Product::new(ProductId::generate(), "Pen", -0.5, owner).is_err());
        assert!(Product::new(ProductId::generate(), "Pen", f64::NAN, owner).is_err());
        assert!(Product::new(ProductId::generate(), "Free sample", 0.0, owner).is_ok());
    }

    #[test]
    fn test_product_update_keeps_owner() {
        let owner = PersonId::generate();
        let mut product = Product::new(ProductId::generate(), "Pen", 2.0, owner).unwrap();
        product.update("Fountain pen", 25.0).unwrap();

        assert_eq!(product.name(), "Fountain pen");
        assert_eq!(product.price(), 25.0);
        assert_eq!(product.person_id(), owner);
    }
}
