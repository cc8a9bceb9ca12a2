//! Innkeep Database — the account store on SurrealDB.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Credential hashing composed into every account write
//!   ([`CredentialHasher`], [`HashingConfig`])
//! - The [`UserRepository`](innkeep_core::repository::UserRepository)
//!   implementation ([`repository::SurrealUserRepository`])
//! - Error types ([`DbError`])

mod connection;
pub mod credential;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use credential::{CredentialHasher, HashingConfig};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
