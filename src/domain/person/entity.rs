//! Person entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Person identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PersonId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::invalid_id(format!("Invalid person ID '{}'", s)))
    }
}

impl StorageKey for PersonId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl Person {
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let email = email.into();
        validate(&name, &email)?;

        Ok(Self {
            id,
            name,
            email,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn update(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<(), DomainError> {
        let name = name.into();
        let email = email.into();
        validate(&name, &email)?;

        self.name = name;
        self.email = email;
        Ok(())
    }
}

impl StorageEntity for Person {
    type Key = PersonId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

fn validate(name: &str, email: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Name cannot be empty"));
    }
    if email.trim().is_empty() {
        return Err(DomainError::validation("Email cannot be empty"));
    }
    if !email.contains('@') {
        return Err(DomainError::validation(format!(
            "Email '{}' is not a valid address",
            email
        )));
    }
    Ok(())
}
