//! Reads the mapping documents from disk

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::mapping::{ChainMappingDocument, EndpointNameDocument, MappingStore};

#[derive(Debug, Error)]
pub enum MappingLoadError {
    #[error("Failed to read mapping file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse mapping file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn read_endpoint_names(path: impl AsRef<Path>) -> Result<EndpointNameDocument, MappingLoadError> {
    let path = path.as_ref();
    let json = read(path)?;
    EndpointNameDocument::from_json(&json).map_err(|source| MappingLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_chain_mappings(path: impl AsRef<Path>) -> Result<ChainMappingDocument, MappingLoadError> {
    let path = path.as_ref();
    let json = read(path)?;
    ChainMappingDocument::from_json(&json).map_err(|source| MappingLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, MappingLoadError> {
    std::fs::read_to_string(path).map_err(|source| MappingLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load both documents, treating any failure as an empty document
pub fn load_mapping_store(
    endpoint_mapping_path: impl AsRef<Path>,
    chain_mapping_path: impl AsRef<Path>,
) -> MappingStore {
    let endpoint_mapping_path = endpoint_mapping_path.as_ref();
    let chain_mapping_path = chain_mapping_path.as_ref();

    let names = read_endpoint_names(endpoint_mapping_path).unwrap_or_else(|e| {
        report(&e);
        EndpointNameDocument::default()
    });
    let chains = read_chain_mappings(chain_mapping_path).unwrap_or_else(|e| {
        report(&e);
        ChainMappingDocument::default()
    });

    let store = MappingStore::from_documents(names, chains);
    if store.is_empty() {
        warn!(
            endpoint_mapping = %endpoint_mapping_path.display(),
            chain_mapping = %chain_mapping_path.display(),
            "No endpoint mappings loaded; integration runs will fail mapping lookups"
        );
    } else {
        info!(
            endpoint_names = store.endpoint_name_count(),
            contracts = store.contract_count(),
            "Mapping store loaded"
        );
    }

    store
}

fn report(e: &MappingLoadError) {
    match e {
        MappingLoadError::Read { .. } => warn!(error = %e, "Mapping document unavailable, using empty mapping"),
        MappingLoadError::Parse { .. } => error!(error = %e, "Mapping document malformed, using empty mapping"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempFile(PathBuf);

    impl TempFile {
        fn with_contents(contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!("mapping-{}.json", uuid::Uuid::new_v4()));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[test]
    fn test_bundled_documents_resolve_every_entry() {
        let root = env!("CARGO_MANIFEST_DIR");
        let store = load_mapping_store(
            format!("{root}/config/mappings/endpoint_mapping.json"),
            format!("{root}/config/mappings/chain_mapping.json"),
        );

        assert!(store.endpoint_name_count() > 0);
        assert!(store.unresolved_entries().is_empty());
        assert!(store.lookup("POST", "/api/person", "People").is_ok());
        assert!(store.lookup("GET", "/api/product/{productId}", "Products").is_ok());
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let chains = TempFile::with_contents(r#"{"persons": {"getAllPersons": {}}}"#);
        let store = load_mapping_store("/nonexistent/endpoint_mapping.json", &chains.0);

        assert_eq!(store.endpoint_name_count(), 0);
        assert_eq!(store.contract_count(), 1);
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let names = TempFile::with_contents("{ this is not json");
        let chains = TempFile::with_contents("{}");
        let store = load_mapping_store(&names.0, &chains.0);

        assert!(store.is_empty());
    }

    #[test]
    fn test_well_formed_empty_documents_yield_empty_store() {
        let names = TempFile::with_contents(r#"{"api_endpoints": {}}"#);
        let chains = TempFile::with_contents("{}");
        let store = load_mapping_store(&names.0, &chains.0);

        assert!(store.is_empty());
        assert_eq!(store.contract_count(), 0);
    }

    #[test]
    fn test_misnamed_root_key_is_parse_error() {
        let names = TempFile::with_contents(r#"{"apiEndpoints": {"persons": {}}}"#);

        assert!(matches!(
            read_endpoint_names(&names.0),
            Err(MappingLoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_read_errors_are_typed() {
        let names = TempFile::with_contents("[]");

        assert!(matches!(
            read_endpoint_names(&names.0),
            Err(MappingLoadError::Parse { .. })
        ));
        assert!(matches!(
            read_chain_mappings("/nonexistent/chain.json"),
            Err(MappingLoadError::Read { .. })
        ));
    }
}
