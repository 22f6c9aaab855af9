use thiserror::Error;

/// Failures of catalog, integration and people/product operations
///
/// Chain execution failures live in `ChainError`; these cover CRUD,
/// configuration and the storage backends.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Person, product, endpoint or integration absent
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Rejected field values, unknown owners, dangling endpoint references
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Path id that is not a UUID or a positive integer
    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Duplicate integration name or storage key
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
