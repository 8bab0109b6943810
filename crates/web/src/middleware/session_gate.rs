//! Session gate for protected paths.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::resolve_session;
use crate::handlers::auth::LOGIN_PATH;
use crate::state::AppState;

/// Redirect unauthenticated requests for protected paths to the login page.
///
/// Requests outside [`ServerConfig::protected_prefixes`] pass straight
/// through. For protected ones the session is resolved from cookies; any
/// failure to do so counts as "no session". On success the
/// [`AuthUser`](crate::auth::AuthUser) is stored in the request extensions
/// and refreshed session cookies, if any, are attached to the response,
/// including the login redirect.
///
/// [`ServerConfig::protected_prefixes`]: crate::config::ServerConfig::protected_prefixes
pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !is_protected(&path, &state.config.protected_prefixes) {
        return next.run(request).await;
    }

    let (jar, resolved) = resolve_session(
        state.identity.as_ref(),
        jar,
        state.config.secure_cookies,
    )
    .await;

    match resolved {
        Ok(Some(auth)) => {
            request.extensions_mut().insert(auth);
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        Ok(None) => {
            tracing::debug!(%path, "No session, redirecting to login");
            (jar, Redirect::temporary(LOGIN_PATH)).into_response()
        }
        Err(err) => {
            tracing::warn!(%path, error = %err, "Session lookup failed, redirecting to login");
            (jar, Redirect::temporary(LOGIN_PATH)).into_response()
        }
    }
}

/// Whether `path` falls under one of `prefixes` on a segment boundary
/// (`/images` matches `/images` and `/images/x`, not `/imagesx`).
pub fn is_protected(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        path.strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
