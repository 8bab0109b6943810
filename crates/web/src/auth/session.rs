//! Resolving the signed-in user from request cookies.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use capvote_backend::{BackendError, IdentityProvider, Session, User};

use super::cookies::{clear_session, store_session, SessionTokens};

/// The signed-in user plus the access token to act on their behalf.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub access_token: String,
}

/// The user the session gate resolved for this request, if any.
///
/// Always `None` on paths outside the gate's protected prefixes.
///
/// ```ignore
/// async fn my_handler(CurrentUser(user): CurrentUser) -> Response { .. }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<AuthUser>);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<AuthUser>().cloned()))
    }
}

/// Look up the user behind the request's session cookies.
///
/// If the access token is expired or rejected and a refresh token is present,
/// the session is refreshed and the returned jar carries the new cookies,
/// even when the lookup fails afterwards. A rejected refresh clears the
/// session cookies. Errors other than a rejection are returned alongside the
/// jar.
pub async fn resolve_session(
    identity: &dyn IdentityProvider,
    jar: CookieJar,
    secure_cookies: bool,
) -> (CookieJar, Result<Option<AuthUser>, BackendError>) {
    let Some(tokens) = SessionTokens::from_jar(&jar) else {
        return (jar, Ok(None));
    };

    let now = chrono::Utc::now().timestamp();

    if let Some(access_token) = tokens.access_token.as_deref() {
        if !tokens.is_expired(now) {
            match identity.get_user(access_token).await {
                Ok(Some(user)) => {
                    let auth = AuthUser {
                        user,
                        access_token: access_token.to_string(),
                    };
                    return (jar, Ok(Some(auth)));
                }
                Ok(None) => {}
                Err(err) => return (jar, Err(err)),
            }
        }
    }

    let Some(refresh_token) = tokens.refresh_token.as_deref() else {
        return (jar, Ok(None));
    };

    let session = match identity.refresh_session(refresh_token).await {
        Ok(session) => session,
        Err(err) if err.is_unauthorized() || err.status() == Some(400) => {
            tracing::debug!(error = %err, "Refresh token rejected, clearing session");
            return (clear_session(jar), Ok(None));
        }
        Err(err) => return (jar, Err(err)),
    };

    // The old refresh token is spent once the backend accepts it.
    let jar = store_session(jar, &session, secure_cookies);

    let user = match user_for_session(identity, &session).await {
        Ok(user) => user,
        Err(err) => return (jar, Err(err)),
    };

    tracing::debug!(user_id = ?user.as_ref().map(|u| u.id), "Session refreshed");

    let auth = user.map(|user| AuthUser {
        user,
        access_token: session.access_token.clone(),
    });
    (jar, Ok(auth))
}

/// The user embedded in `session`, or looked up with its access token.
async fn user_for_session(
    identity: &dyn IdentityProvider,
    session: &Session,
) -> Result<Option<User>, BackendError> {
    match &session.user {
        Some(user) => Ok(Some(user.clone())),
        None => identity.get_user(&session.access_token).await,
    }
}
