//! Endpoint catalog entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::storage::{StorageEntity, StorageKey};

/// HTTP methods an endpoint may declare
pub const SUPPORTED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Endpoint identifier assigned by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointId(u64);

impl EndpointId {
    /// Create a new endpoint ID, rejecting zero
    pub fn new(id: u64) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::invalid_id("Endpoint ID must be positive"));
        }

        Ok(Self(id))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EndpointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EndpointId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<u64>()
            .map_err(|_| DomainError::invalid_id(format!("Invalid endpoint ID '{}'", s)))?;
        Self::new(id)
    }
}

impl StorageKey for EndpointId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

/// A stored definition of one callable HTTP operation
///
/// The URL is a template and may contain `{name}` placeholders that are
/// filled in when the endpoint runs as part of an integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    id: EndpointId,
    name: String,
    url: String,

    /// Stored exactly as supplied; mapping lookups are case-sensitive
    method: String,

    description: String,

    #[serde(default)]
    category: String,

    created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl Endpoint {
    /// Create a new endpoint definition
    pub fn new(
        id: EndpointId,
        name: impl Into<String>,
        url: impl Into<String>,
        method: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let url = url.into();
        let method = method.into();
        let description = description.into();

        validate_required("Name", &name)?;
        validate_required("URL", &url)?;
        validate_required("Description", &description)?;
        validate_method(&method)?;

        Ok(Self {
            id,
            name,
            url,
            method,
            description,
            category: category.into(),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    pub fn id(&self) -> EndpointId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Whether requests to this endpoint carry a JSON body
    pub fn accepts_body(&self) -> bool {
        matches!(self.method.to_ascii_uppercase().as_str(), "POST" | "PUT")
    }

    /// Replace every editable field at once
    pub fn update(
        &mut self,
        name: impl Into<String>,
        url: impl Into<String>,
        method: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<(), DomainError> {
        let name = name.into();
        let url = url.into();
        let method = method.into();
        let description = description.into();

        validate_required("Name", &name)?;
        validate_required("URL", &url)?;
        validate_required("Description", &description)?;
        validate_method(&method)?;

        self.name = name;
        self.url = url;
        self.method = method;
        self.description = description;
        self.category = category.into();
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

impl StorageEntity for Endpoint {
    type Key = EndpointId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

fn validate_required(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn validate_method(method: &str) -> Result<(), DomainError> {
    if !SUPPORTED_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
        return Err(DomainError::validation(format!(
            "Unsupported HTTP method '{}'; expected one of {}",
            method,
            SUPPORTED_METHODS.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(method: &str) -> Result<Endpoint, DomainError> {
        Endpoint::new(
            EndpointId::new(1).unwrap(),
            "Get Person by ID",
            "/api/person/{id}",
            method,
            "Retrieve a specific person by their ID",
            "People",
        )
    }

    #[test]
    fn test_endpoint_id_validation() {
        assert!(EndpointId::new(1).is_ok());
        assert!(EndpointId::new(0).is_err());
        assert_eq!("12".parse::<EndpointId>().unwrap().value(), 12);
        assert!("abc".parse::<EndpointId>().is_err());
        assert!("0".parse::<EndpointId>().is_err());
    }

    #[test]
    fn test_endpoint_creation() {
        let endpoint = endpoint("GET").unwrap();

        assert_eq!(endpoint.name(), "Get Person by ID");
        assert_eq!(endpoint.url(), "/api/person/{id}");
        assert_eq!(endpoint.method(), "GET");
        assert_eq!(endpoint.category(), "People");
        assert!(endpoint.updated_at().is_none());
        assert!(!endpoint.accepts_body());
    }

    #[test]
    fn test_method_kept_verbatim() {
        let endpoint = endpoint("post").unwrap();

        assert_eq!(endpoint.method(), "post");
        assert!(endpoint.accepts_body());
    }

    #[test]
    fn test_endpoint_validation_errors() {
        assert!(endpoint("TRACE").is_err());

        let id = EndpointId::new(2).unwrap();
        assert!(Endpoint::new(id, "", "/api/person", "GET", "desc", "People").is_err());
        assert!(Endpoint::new(id, "Name", " ", "GET", "desc", "People").is_err());
        assert!(Endpoint::new(id, "Name", "/api/person", "GET", "", "People").is_err());
    }

    #[test]
    fn test_endpoint_update() {
        let mut endpoint = endpoint("GET").unwrap();

        endpoint
            .update(
                "Update Person",
                "/api/person/{id}",
                "PUT",
                "Update an existing person record",
                "People",
            )
            .unwrap();

        assert_eq!(endpoint.name(), "Update Person");
        assert_eq!(endpoint.method(), "PUT");
        assert!(endpoint.updated_at().is_some());
        assert!(endpoint.update("x", "/x", "NOPE", "d", "c").is_err());
    }

    #[test]
    fn test_endpoint_id_serializes_as_number() {
        let endpoint = endpoint("GET").unwrap();
        let json = serde_json::to_value(&endpoint).unwrap();

        assert_eq!(json["id"], serde_json::json!(1));
    }
}
