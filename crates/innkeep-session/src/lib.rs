//! Innkeep Session — the client's view of "am I logged in, and as what".
//!
//! A [`SessionContext`] is constructed explicitly and handed to whatever
//! needs it. Initialization order:
//!
//! 1. [`SessionConfig`] (usually [`SessionConfig::from_env`])
//! 2. a [`Verifier`] (usually [`HttpVerifier`])
//! 3. [`SessionContext::new`]
//! 4. [`SessionContext::initialize`], once per session
//!
//! The payment client handle resolves lazily on first request.

pub mod config;
pub mod context;
pub mod error;
pub mod notification;
pub mod payment;
pub mod state;
pub mod verifier;

pub use config::SessionConfig;
pub use context::SessionContext;
pub use error::SessionError;
pub use notification::{Notification, Severity};
pub use payment::{PaymentClient, PaymentClientHandle};
pub use state::AuthState;
pub use verifier::{HttpVerifier, Verifier};
