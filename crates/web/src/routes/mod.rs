pub mod auth;
pub mod gallery;
pub mod health;
pub mod votes;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::handlers::images::IMAGES_PATH;
use crate::state::AppState;

/// Build the page and API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                      -> redirect to /images
/// /placeholder.svg       stand-in image preview
///
/// /login                 login page (public)
/// /auth/sign-in          start OAuth with PKCE (public)
/// /auth/callback         finish OAuth, store session cookies (public)
/// /auth/logout           clear session (POST)
///
/// /images?page=N         images gallery (session required by default)
/// /captions?page=N       captions gallery with vote buttons
///
/// /votes                 cast a vote (POST, JSON, session required)
/// ```
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::temporary(IMAGES_PATH) }))
        .route(
            "/placeholder.svg",
            get(handlers::assets::placeholder_image),
        )
        .merge(auth::router())
        .merge(gallery::router())
        .merge(votes::router())
}
