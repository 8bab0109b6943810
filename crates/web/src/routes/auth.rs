//! Route definitions for the sign-in flow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /login           -> login_page
/// GET  /auth/sign-in    -> sign_in
/// GET  /auth/callback   -> callback
/// POST /auth/logout     -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(auth::LOGIN_PATH, get(auth::login_page))
        .route("/auth/sign-in", get(auth::sign_in))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", post(auth::logout))
}
