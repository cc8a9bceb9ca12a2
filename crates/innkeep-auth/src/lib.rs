//! Innkeep Auth — login against the account store and access-token
//! validation. This is the authority behind the verification endpoint
//! the session client calls.

pub mod config;
pub mod error;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput};
pub use token::AccessTokenClaims;
