//! Mapping lookup errors

use thiserror::Error;

/// Reasons an endpoint could not be matched to a mapping contract
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("No endpoint mapping found for '{key}'")]
    MappingNotFound { key: String },

    #[error("No chain mapping found for category '{category}'")]
    CategoryMappingNotFound { category: String },

    #[error("No chain mapping found for '{short_name}' in category '{category}'")]
    EndpointMappingNotFound { category: String, short_name: String },
}

impl MappingError {
    pub fn mapping_not_found(key: impl Into<String>) -> Self {
        Self::MappingNotFound { key: key.into() }
    }

    pub fn category_not_found(category: impl Into<String>) -> Self {
        Self::CategoryMappingNotFound {
            category: category.into(),
        }
    }

    pub fn endpoint_not_found(category: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self::EndpointMappingNotFound {
            category: category.into(),
            short_name: short_name.into(),
        }
    }

    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MappingNotFound { .. } => "mapping_not_found",
            Self::CategoryMappingNotFound { .. } => "category_mapping_not_found",
            Self::EndpointMappingNotFound { .. } => "endpoint_mapping_not_found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MappingError::mapping_not_found("GET /api/unknown");
        assert_eq!(
            err.to_string(),
            "No endpoint mapping found for 'GET /api/unknown'"
        );

        let err = MappingError::endpoint_not_found("persons", "archivePerson");
        assert_eq!(
            err.to_string(),
            "No chain mapping found for 'archivePerson' in category 'persons'"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            MappingError::category_not_found("orders").kind(),
            "category_mapping_not_found"
        );
    }
}
