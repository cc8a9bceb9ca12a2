//! Identity reported by the verification endpoint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Body returned by the verification endpoint for an authenticated
/// caller. Clients only rely on `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub role: UserRole,
}
