//! Mapping document loading

mod loader;

pub use loader::{load_mapping_store, read_chain_mappings, read_endpoint_names, MappingLoadError};
