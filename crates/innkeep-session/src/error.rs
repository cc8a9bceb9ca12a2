//! Session client error types.
//!
//! None of these reach the user directly: a failed verification settles
//! the session as unauthenticated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to send request")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse URL")]
    Url(#[from] url::ParseError),

    #[error("verification endpoint returned status {0}")]
    Status(u16),

    #[error("failed to decode verification response")]
    Decode(#[source] reqwest::Error),

    #[error("verification timed out")]
    Timeout,

    #[error("invalid configuration: {0}")]
    Config(String),
}
