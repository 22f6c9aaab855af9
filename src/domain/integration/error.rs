//! Hard failures that abort an integration run

use thiserror::Error;

use crate::domain::endpoint::EndpointId;
use crate::domain::integration::IntegrationId;
use crate::domain::mapping::MappingError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChainError {
    #[error("Integration '{integration_id}' not found")]
    IntegrationNotFound { integration_id: IntegrationId },

    #[error("Endpoint '{endpoint_id}' referenced at sequence {sequence} not found")]
    EndpointNotFound { endpoint_id: EndpointId, sequence: i32 },

    #[error("Mapping failed for endpoint '{endpoint_id}' at sequence {sequence}: {source}")]
    Mapping {
        endpoint_id: EndpointId,
        sequence: i32,
        #[source]
        source: MappingError,
    },

    #[error("Missing required parameter '{name}' for endpoint '{endpoint_id}' at sequence {sequence}")]
    MissingParameter {
        name: String,
        endpoint_id: EndpointId,
        sequence: i32,
    },

    #[error("Unresolved placeholder '{{{name}}}' in URL for endpoint '{endpoint_id}' at sequence {sequence}")]
    UnresolvedPlaceholder {
        name: String,
        endpoint_id: EndpointId,
        sequence: i32,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ChainError {
    pub fn integration_not_found(integration_id: IntegrationId) -> Self {
        Self::IntegrationNotFound { integration_id }
    }

    pub fn endpoint_not_found(endpoint_id: EndpointId, sequence: i32) -> Self {
        Self::EndpointNotFound {
            endpoint_id,
            sequence,
        }
    }

    pub fn mapping(endpoint_id: EndpointId, sequence: i32, source: MappingError) -> Self {
        Self::Mapping {
            endpoint_id,
            sequence,
            source,
        }
    }

    pub fn missing_parameter(
        name: impl Into<String>,
        endpoint_id: EndpointId,
        sequence: i32,
    ) -> Self {
        Self::MissingParameter {
            name: name.into(),
            endpoint_id,
            sequence,
        }
    }

    pub fn unresolved_placeholder(
        name: impl Into<String>,
        endpoint_id: EndpointId,
        sequence: i32,
    ) -> Self {
        Self::UnresolvedPlaceholder {
            name: name.into(),
            endpoint_id,
            sequence,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IntegrationNotFound { .. } => "integration_not_found",
            Self::EndpointNotFound { .. } => "endpoint_not_found",
            Self::Mapping { source, .. } => source.kind(),
            Self::MissingParameter { .. } => "missing_parameter",
            Self::UnresolvedPlaceholder { .. } => "unresolved_placeholder",
            Self::Storage(_) => "storage_error",
        }
    }
}
