//! The single verification call made at session start.

use innkeep_core::models::identity::VerifiedIdentity;
use reqwest::Method;
use url::Url;

use crate::config::SessionConfig;
use crate::error::SessionError;

/// Asks the server who the caller is. Any error means "not
/// authenticated" to the session; implementations must not retry.
pub trait Verifier: Send + Sync {
    fn verify(&self) -> impl Future<Output = Result<VerifiedIdentity, SessionError>> + Send;
}

/// `GET {api_base_url}/api/auth/validate-token`, no body.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: reqwest::Client,
    url: Url,
    access_token: Option<String>,
}

impl HttpVerifier {
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let mut url = Url::parse(&config.api_base_url)?;
        // Append rather than join, so a base path prefix is kept.
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["api", "auth", "validate-token"]);
        let client = reqwest::Client::builder()
            .timeout(config.verify_timeout)
            .build()?;
        Ok(Self {
            client,
            url,
            access_token: None,
        })
    }

    /// Send this token as a bearer credential.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Verifier for HttpVerifier {
    async fn verify(&self) -> Result<VerifiedIdentity, SessionError> {
        let mut request = self.client.request(Method::GET, self.url.clone());
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }

        response
            .json::<VerifiedIdentity>()
            .await
            .map_err(SessionError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_appended_to_base_url() {
        let verifier = HttpVerifier::new(&SessionConfig {
            api_base_url: "https://api.example.com".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            verifier.url().as_str(),
            "https://api.example.com/api/auth/validate-token"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        for base in ["https://example.com/backend", "https://example.com/backend/"] {
            let verifier = HttpVerifier::new(&SessionConfig {
                api_base_url: base.into(),
                ..Default::default()
            })
            .unwrap();
            assert_eq!(
                verifier.url().as_str(),
                "https://example.com/backend/api/auth/validate-token",
                "base {base}"
            );
        }
    }

    #[test]
    fn non_hierarchical_base_is_rejected() {
        let result = HttpVerifier::new(&SessionConfig {
            api_base_url: "mailto:ops@example.com".into(),
            ..Default::default()
        });
        assert!(matches!(result, Err(SessionError::Url(_))));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = HttpVerifier::new(&SessionConfig {
            api_base_url: "::".into(),
            ..Default::default()
        });
        assert!(matches!(result, Err(SessionError::Url(_))));
    }
}
