//! Authentication error types.

use innkeep_core::error::InnkeepError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for InnkeepError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => InnkeepError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => InnkeepError::Crypto(msg),
        }
    }
}
