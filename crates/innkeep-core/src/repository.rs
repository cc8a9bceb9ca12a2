//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async so the auth layer can stay
//! independent of the storage crate.

use uuid::Uuid;

use crate::error::InnkeepResult;
use crate::models::user::{CreateUser, HotelId, UpdateUser, User};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

/// The account store.
///
/// Implementations hash every plaintext password they receive before it
/// reaches storage, and never re-hash a stored hash.
pub trait UserRepository: Send + Sync {
    /// Fails with `DuplicateIdentity` when the email is taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = InnkeepResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = InnkeepResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = InnkeepResult<User>> + Send;
    /// Partial update. The credential changes only when `input.password`
    /// is present.
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = InnkeepResult<User>> + Send;
    /// Check a plaintext password against the stored hash of the account
    /// with this email. `NotFound` if there is no such account.
    fn verify_credential(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = InnkeepResult<bool>> + Send;
    /// Append a hotel to the account's click history.
    fn record_hotel_click(
        &self,
        id: Uuid,
        hotel_id: HotelId,
    ) -> impl Future<Output = InnkeepResult<User>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = InnkeepResult<PaginatedResult<User>>> + Send;
}
