//! Error types for the GiveFlow system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GiveFlowError {
    #[error("Validation failed on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    #[error("Consistency violation: {reason}")]
    Consistency { reason: String },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl GiveFlowError {
    /// Shorthand for a validation failure naming the offending field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a permission failure.
    ///
    /// Ownership-scoped reads must return the same reason whether or not
    /// the target exists, so callers of this constructor should not
    /// interpolate information that would confirm a foreign entity.
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            reason: reason.into(),
        }
    }
}

pub type GiveFlowResult<T> = Result<T, GiveFlowError>;
