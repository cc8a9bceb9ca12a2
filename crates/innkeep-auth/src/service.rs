//! Authentication service — login and token validation.

use innkeep_core::error::{InnkeepError, InnkeepResult};
use innkeep_core::models::identity::VerifiedIdentity;
use innkeep_core::models::user::UserRole;
use innkeep_core::repository::UserRepository;
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    pub user_id: Uuid,
    pub role: UserRole,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Authenticate with email + password and issue an access token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, input: LoginInput) -> InnkeepResult<LoginOutput> {
        let valid = match self
            .user_repo
            .verify_credential(&input.email, &input.password)
            .await
        {
            Ok(valid) => valid,
            Err(InnkeepError::NotFound { .. }) => false,
            Err(e) => return Err(e),
        };
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = self.user_repo.get_by_email(&input.email).await?;
        let access_token = token::issue_access_token(user.id, user.role, &self.config)?;

        debug!(user_id = %user.id, role = %user.role, "Login succeeded");
        Ok(LoginOutput {
            access_token,
            user_id: user.id,
            role: user.role,
            expires_in: self.config.access_token_lifetime_secs,
        })
    }

    /// Answer a verification request: check the token, then report the
    /// account's current role from the store.
    ///
    /// A token for an account that no longer resolves is rejected as
    /// invalid rather than reported as `NotFound`.
    pub async fn validate_token(&self, access_token: &str) -> InnkeepResult<VerifiedIdentity> {
        let claims = token::decode_access_token(access_token, &self.config)?;
        let user_id = claims.user_id()?;

        let user = self.user_repo.get_by_id(user_id).await.map_err(|e| match e {
            InnkeepError::NotFound { .. } => {
                AuthError::TokenInvalid("account no longer exists".into()).into()
            }
            other => other,
        })?;

        Ok(VerifiedIdentity {
            user_id: Some(user.id),
            role: user.role,
        })
    }
}
