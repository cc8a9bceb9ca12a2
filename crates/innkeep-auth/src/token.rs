//! JWT access token issuance and verification.

use chrono::Utc;
use innkeep_core::models::user::UserRole;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Role at issuance. Informational; the service re-reads the role
    /// from the account store when validating.
    pub role: UserRole,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

impl AccessTokenClaims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::TokenInvalid(format!("bad sub: {e}")))
    }
}

/// Issue a signed EdDSA (Ed25519) JWT access token.
pub fn issue_access_token(
    user_id: Uuid,
    role: UserRole,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        role,
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.access_token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_ed_pem(config.jwt_private_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad private key: {e}")))?;

    jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an EdDSA JWT access token (signature, expiry,
/// issuer). Stateless.
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_ed_pem(config.jwt_public_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad public key: {e}")))?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}
