//! Database-specific error types and conversions.

use giveflow_core::error::GiveFlowError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Stored row could not be decoded: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for GiveFlowError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => GiveFlowError::NotFound { entity, id },
            other => GiveFlowError::StorageUnavailable(other.to_string()),
        }
    }
}
