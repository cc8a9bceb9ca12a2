//! Domain models for Innkeep.

pub mod identity;
pub mod user;
