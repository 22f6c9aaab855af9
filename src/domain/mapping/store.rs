//! Immutable mapping table shared by every integration run

use std::collections::HashMap;

use super::contract::{ChainMappingDocument, EndpointNameDocument, MappingContract};
use super::error::MappingError;

/// Category names as stored on endpoints -> category names used by the chain mapping
const CATEGORY_ALIASES: [(&str, &str); 1] = [("people", "persons")];

/// Lower-cases a category and applies the alias table
pub fn canonical_category(category: &str) -> String {
    let lowered = category.to_lowercase();
    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lowered)
}

/// Lookup key for an endpoint: raw method, one space, raw URL template
pub fn endpoint_key(method: &str, url: &str) -> String {
    format!("{} {}", method, url)
}

/// One `"METHOD URL" -> shortName` line as it appeared in the endpoint-name document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointNameEntry {
    pub category: String,
    pub key: String,
    pub short_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    names: HashMap<String, String>,
    chains: HashMap<String, HashMap<String, MappingContract>>,
    entries: Vec<EndpointNameEntry>,
}

impl MappingStore {
    /// A store with no mappings; every lookup fails with `MappingNotFound`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the store from both documents
    ///
    /// Endpoint names are flattened across categories; a key repeated in a
    /// later category replaces the earlier one.
    pub fn from_documents(names: EndpointNameDocument, chains: ChainMappingDocument) -> Self {
        let mut flattened = HashMap::new();
        let mut entries = Vec::new();

        for (category, endpoints) in names.api_endpoints {
            for (key, short_name) in endpoints {
                flattened.insert(key.clone(), short_name.clone());
                entries.push(EndpointNameEntry {
                    category: category.clone(),
                    key,
                    short_name,
                });
            }
        }

        let chains = chains
            .categories
            .into_iter()
            .map(|(category, contracts)| (category, contracts.into_iter().collect()))
            .collect();

        Self {
            names: flattened,
            chains,
            entries,
        }
    }

    /// Resolve the contract for an endpoint from its stored method, URL template and category
    pub fn lookup(
        &self,
        method: &str,
        url: &str,
        category: &str,
    ) -> Result<&MappingContract, MappingError> {
        let key = endpoint_key(method, url);
        let short_name = self
            .names
            .get(&key)
            .ok_or_else(|| MappingError::mapping_not_found(&key))?;

        let category = canonical_category(category);
        let contracts = self
            .chains
            .get(&category)
            .ok_or_else(|| MappingError::category_not_found(&category))?;

        contracts
            .get(short_name)
            .ok_or_else(|| MappingError::endpoint_not_found(&category, short_name))
    }

    pub fn short_name(&self, method: &str, url: &str) -> Option<&str> {
        self.names.get(&endpoint_key(method, url)).map(String::as_str)
    }

    /// Number of distinct `"METHOD URL"` keys
    pub fn endpoint_name_count(&self) -> usize {
        self.names.len()
    }

    /// Number of contracts across all categories
    pub fn contract_count(&self) -> usize {
        self.chains.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.chains.is_empty()
    }

    /// Endpoint-name entries whose short name has no contract in their category
    pub fn unresolved_entries(&self) -> Vec<&EndpointNameEntry> {
        self.entries
            .iter()
            .filter(|entry| {
                self.chains
                    .get(&canonical_category(&entry.category))
                    .is_none_or(|contracts| !contracts.contains_key(&entry.short_name))
            })
            .collect()
    }
}
