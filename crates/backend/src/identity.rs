//! The identity seam: OAuth sign-in, sessions and the current user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::BackendError;

/// The authenticated profile behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: uuid::Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued by the auth API after a code exchange or refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// Absolute expiry (UTC Unix timestamp), when the backend sends one.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    /// Absolute access token expiry, derived from `expires_in` if needed.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
            .unwrap_or_else(|| chrono::Utc::now().timestamp() + self.expires_in)
    }
}

/// Operations delegated to the external auth service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL that starts the OAuth flow for `provider` and returns to
    /// `redirect_to` with a PKCE-bound authorization code.
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<Url, BackendError>;

    /// Exchange the code carried by the full `callback_url` for a session.
    async fn exchange_code(
        &self,
        callback_url: &Url,
        code_verifier: &str,
    ) -> Result<Session, BackendError>;

    /// The user owning `access_token`, or `None` when the token is rejected.
    async fn get_user(&self, access_token: &str) -> Result<Option<User>, BackendError>;

    /// Trade a refresh token for a fresh session.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError>;
}

/// Pull the authorization code out of an OAuth callback URL.
///
/// A provider-reported `error` / `error_description` takes precedence over a
/// missing code.
pub fn authorization_code(callback_url: &Url) -> Result<String, BackendError> {
    let mut code = None;
    let mut error = None;
    let mut description = None;

    for (key, value) in callback_url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(reason) = description.or(error) {
        return Err(BackendError::SignIn(reason));
    }

    code.filter(|c| !c.is_empty())
        .ok_or(BackendError::MissingAuthCode)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn code_is_read_from_callback_query() {
        let url = Url::parse("http://localhost:3000/auth/callback?code=abc-123&state=x").unwrap();
        assert_eq!(authorization_code(&url).unwrap(), "abc-123");
    }

    #[test]
    fn provider_error_is_reported() {
        let url = Url::parse(
            "http://localhost:3000/auth/callback?error=access_denied&error_description=User+cancelled",
        )
        .unwrap();
        assert_matches!(authorization_code(&url), Err(BackendError::SignIn(msg)) if msg == "User cancelled");
    }

    #[test]
    fn missing_code_is_an_error() {
        let url = Url::parse("http://localhost:3000/auth/callback").unwrap();
        assert_matches!(authorization_code(&url), Err(BackendError::MissingAuthCode));

        let url = Url::parse("http://localhost:3000/auth/callback?code=").unwrap();
        assert_matches!(authorization_code(&url), Err(BackendError::MissingAuthCode));
    }

    #[test]
    fn session_expiry_falls_back_to_lifetime() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
        }))
        .unwrap();

        let now = chrono::Utc::now().timestamp();
        assert!(session.expires_at() >= now + 3590);
        assert!(session.user.is_none());
    }
}
