//! Innkeep Core — domain models, error taxonomy and repository traits
//! shared by the account store, the auth layer and the session client.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{InnkeepError, InnkeepResult};
