//! Endpoint mapping domain
//!
//! Maps each catalog endpoint to the fields it requires before it runs and
//! the response fields it provides to later steps of an integration.

mod contract;
mod error;
mod store;

pub use contract::{ChainMappingDocument, EndpointNameDocument, MappingContract};
pub use error::MappingError;
pub use store::{canonical_category, endpoint_key, EndpointNameEntry, MappingStore};
