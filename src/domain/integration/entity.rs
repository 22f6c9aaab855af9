//! Integration entity: a named, ordered chain of endpoint connections

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::endpoint::EndpointId;
use crate::domain::error::DomainError;
use crate::domain::storage::{StorageEntity, StorageKey};

pub const MAX_INTEGRATION_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntegrationId(u64);

impl IntegrationId {
    pub fn new(id: u64) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::invalid_id("Integration ID must be positive"));
        }

        Ok(Self(id))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IntegrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IntegrationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<u64>()
            .map_err(|_| DomainError::invalid_id(format!("Invalid integration ID '{}'", s)))?;
        Self::new(id)
    }
}

impl StorageKey for IntegrationId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

/// One endpoint reference within an integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub endpoint_id: EndpointId,
    pub sequence_number: i32,
}

impl Connection {
    pub fn new(endpoint_id: EndpointId, sequence_number: i32) -> Self {
        Self {
            endpoint_id,
            sequence_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    id: IntegrationId,
    name: String,
    created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified_at: Option<DateTime<Utc>>,

    #[serde(default)]
    connections: Vec<Connection>,
}

impl Integration {
    pub fn new(
        id: IntegrationId,
        name: impl Into<String>,
        connections: Vec<Connection>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        validate_connections(&connections)?;

        Ok(Self {
            id,
            name,
            created_at: Utc::now(),
            last_modified_at: None,
            connections,
        })
    }

    pub fn id(&self) -> IntegrationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        self.last_modified_at
    }

    /// Connections in the order they were supplied
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections in execution order (ascending sequence number)
    pub fn ordered_connections(&self) -> Vec<Connection> {
        let mut ordered = self.connections.clone();
        ordered.sort_by_key(|c| c.sequence_number);
        ordered
    }

    /// Case-insensitive name comparison used for uniqueness checks
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Replace name and connections
    pub fn update(
        &mut self,
        name: impl Into<String>,
        connections: Vec<Connection>,
    ) -> Result<(), DomainError> {
        let name = name.into();
        validate_name(&name)?;
        validate_connections(&connections)?;

        self.name = name;
        self.connections = connections;
        self.last_modified_at = Some(Utc::now());
        Ok(())
    }
}

impl StorageEntity for Integration {
    type Key = IntegrationId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Integration name cannot be empty"));
    }

    if name.chars().count() > MAX_INTEGRATION_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Integration name cannot exceed {} characters",
            MAX_INTEGRATION_NAME_LENGTH
        )));
    }

    Ok(())
}

fn validate_connections(connections: &[Connection]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for connection in connections {
        if !seen.insert(connection.sequence_number) {
            return Err(DomainError::validation(format!(
                "Duplicate sequence number {} in integration connections",
                connection.sequence_number
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(endpoint: u64, sequence: i32) -> Connection {
        Connection::new(EndpointId::new(endpoint).unwrap(), sequence)
    }

    #[test]
    fn test_integration_creation() {
        let integration = Integration::new(
            IntegrationId::new(1).unwrap(),
            "Onboarding",
            vec![connection(3, 1), connection(2, 0)],
        )
        .unwrap();

        assert_eq!(integration.name(), "Onboarding");
        assert_eq!(integration.connections().len(), 2);
        assert!(integration.last_modified_at().is_none());
    }

    #[test]
    fn test_ordered_connections_sorted_by_sequence() {
        let integration = Integration::new(
            IntegrationId::new(1).unwrap(),
            "Onboarding",
            vec![connection(5, 3), connection(9, 1), connection(7, 2)],
        )
        .unwrap();

        let order: Vec<u64> = integration
            .ordered_connections()
            .iter()
            .map(|c| c.endpoint_id.value())
            .collect();
        assert_eq!(order, vec![9, 7, 5]);
    }

    #[test]
    fn test_duplicate_sequence_rejected() {
        let result = Integration::new(
            IntegrationId::new(1).unwrap(),
            "Onboarding",
            vec![connection(1, 1), connection(2, 1)],
        );

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_name_validation() {
        let id = IntegrationId::new(1).unwrap();
        assert!(Integration::new(id, "  ", vec![]).is_err());
        assert!(Integration::new(id, "a".repeat(101), vec![]).is_err());
        assert!(Integration::new(id, "a".repeat(100), vec![]).is_ok());
    }

    #[test]
    fn test_has_name_is_case_insensitive() {
        let integration =
            Integration::new(IntegrationId::new(1).unwrap(), "Onboarding", vec![]).unwrap();

        assert!(integration.has_name("ONBOARDING"));
        assert!(!integration.has_name("Offboarding"));
    }

    #[test]
    fn test_update_bumps_last_modified() {
        let mut integration =
            Integration::new(IntegrationId::new(1).unwrap(), "Onboarding", vec![]).unwrap();
        integration
            .update("Onboarding v2", vec![connection(1, 1)])
            .unwrap();

        assert_eq!(integration.name(), "Onboarding v2");
        assert!(integration.last_modified_at().is_some());
        assert!(
            integration
                .update("Bad", vec![connection(1, 1), connection(1, 1)])
                .is_err()
        );
    }
}
