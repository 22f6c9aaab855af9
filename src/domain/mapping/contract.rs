//! Mapping documents and the per-endpoint contract

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fields an endpoint needs before it runs and fields it contributes after
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingContract {
    /// Names that must be present in the parameter bag or the context
    #[serde(default)]
    pub requires: Vec<String>,

    /// Top-level response field -> context key
    #[serde(default)]
    pub provides: IndexMap<String, String>,
}

impl MappingContract {
    pub fn new(requires: Vec<String>, provides: IndexMap<String, String>) -> Self {
        Self { requires, provides }
    }
}

/// `{"api_endpoints": {category: {"METHOD /url": shortName}}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointNameDocument {
    pub api_endpoints: IndexMap<String, IndexMap<String, String>>,
}

impl EndpointNameDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `{category: {shortName: {requires, provides}}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainMappingDocument {
    pub categories: IndexMap<String, IndexMap<String, MappingContract>>,
}

impl ChainMappingDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
