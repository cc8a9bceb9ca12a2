//! Authentication state machine.

use innkeep_core::models::user::UserRole;

/// `Unknown` until the verification call settles, then one of the two
/// terminal states until the next [`initialize`].
///
/// [`initialize`]: crate::SessionContext::initialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    Authenticated(UserRole),
    Unauthenticated,
}

impl AuthState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, AuthState::Unknown)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// Present only when authenticated.
    pub fn role(&self) -> Option<UserRole> {
        match self {
            AuthState::Authenticated(role) => Some(*role),
            _ => None,
        }
    }
}
