//! Database-specific error types and conversions.

use innkeep_core::error::InnkeepError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique index violated: {0}")]
    UniqueViolation(String),

    #[error("Stored record is malformed: {0}")]
    Decode(String),

    #[error("Credential hashing failed: {0}")]
    Credential(String),
}

impl DbError {
    /// Classify the error of a failed write statement. SurrealDB reports a
    /// UNIQUE index conflict as "Database index `...` already contains ...".
    pub(crate) fn from_write(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        if message.contains("already contains") {
            DbError::UniqueViolation(message)
        } else {
            DbError::Surreal(err)
        }
    }
}

impl From<DbError> for InnkeepError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => InnkeepError::NotFound { entity, id },
            DbError::Credential(msg) => InnkeepError::Crypto(msg),
            other => InnkeepError::Database(other.to_string()),
        }
    }
}
