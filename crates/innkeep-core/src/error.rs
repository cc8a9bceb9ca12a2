//! Error types for the Innkeep system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InnkeepError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("An account with email {email} already exists")]
    DuplicateIdentity { email: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

impl InnkeepError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type InnkeepResult<T> = Result<T, InnkeepError>;
