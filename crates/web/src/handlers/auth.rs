//! Handlers for the sign-in flow (login page, OAuth redirect, callback,
//! logout).
//!
//! Sign-in uses the authorization code flow with PKCE: the verifier is kept
//! in an HTTP-only cookie between [`sign_in`] and [`callback`], and the
//! resulting session is stored in cookies (see [`crate::auth::cookies`]).

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use capvote_backend::identity::authorization_code;
use capvote_backend::pkce::{code_challenge, generate_code_verifier};
use capvote_backend::BackendError;

use super::images::IMAGES_PATH;
use crate::auth::cookies::{
    clear_session, store_code_verifier, store_session, take_code_verifier, SessionTokens,
};
use crate::state::AppState;
use crate::views::{error_page, provider_label, render_template, LoginTemplate};

pub const LOGIN_PATH: &str = "/login";

/// GET /login
///
/// Page with a single link that starts the OAuth flow.
pub async fn login_page(State(state): State<AppState>) -> Response {
    render_template(LoginTemplate {
        provider_label: provider_label(&state.config.oauth_provider),
    })
}

/// GET /auth/sign-in
///
/// Generate a PKCE verifier, remember it in a cookie and send the browser to
/// the identity provider.
pub async fn sign_in(State(state): State<AppState>, jar: CookieJar) -> Response {
    let verifier = generate_code_verifier();
    let challenge = code_challenge(&verifier);

    let url = match state.identity.authorize_url(
        &state.config.oauth_provider,
        &state.config.callback_url(),
        &challenge,
    ) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!(error = %err, "Failed to build authorize URL");
            return error_page(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    let jar = store_code_verifier(jar, verifier, state.config.secure_cookies);
    (jar, Redirect::to(url.as_str())).into_response()
}

/// GET /auth/callback?code=...
///
/// Exchange the authorization code for a session, store it in cookies and
/// continue to the images gallery.
pub async fn callback(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Response {
    let (jar, verifier) = take_code_verifier(jar);

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/auth/callback");
    let callback_url = match state.config.public_base_url.join(path_and_query) {
        Ok(url) => url,
        Err(err) => return (jar, sign_in_failed(&BackendError::Url(err))).into_response(),
    };

    if let Err(err) = authorization_code(&callback_url) {
        return (jar, sign_in_failed(&err)).into_response();
    }

    let Some(verifier) = verifier else {
        tracing::warn!("OAuth callback without a PKCE verifier cookie");
        let response = error_page(
            StatusCode::BAD_REQUEST,
            "Sign-in expired or was started in another browser. Please sign in again.",
        );
        return (jar, response).into_response();
    };

    match state.identity.exchange_code(&callback_url, &verifier).await {
        Ok(session) => {
            tracing::info!(
                user_id = ?session.user.as_ref().map(|u| u.id),
                "User signed in"
            );
            let jar = store_session(jar, &session, state.config.secure_cookies);
            (jar, Redirect::to(IMAGES_PATH)).into_response()
        }
        Err(err) => (jar, sign_in_failed(&err)).into_response(),
    }
}

/// POST /auth/logout
///
/// Revoke the session with the backend (best effort), clear the session
/// cookies and return to the login page.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(access_token) = SessionTokens::from_jar(&jar).and_then(|t| t.access_token) {
        if let Err(err) = state.identity.sign_out(&access_token).await {
            tracing::warn!(error = %err, "Backend sign-out failed, clearing cookies anyway");
        }
    }

    (clear_session(jar), Redirect::to(LOGIN_PATH)).into_response()
}

fn sign_in_failed(err: &BackendError) -> Response {
    let status = match err {
        BackendError::SignIn(_) | BackendError::MissingAuthCode => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    tracing::warn!(error = %err, %status, "Sign-in failed");
    error_page(status, err.to_string())
}
