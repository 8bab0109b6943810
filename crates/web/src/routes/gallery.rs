//! Route definitions for the gallery pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::captions::{self, CAPTIONS_PATH};
use crate::handlers::images::{self, IMAGES_PATH};
use crate::state::AppState;

/// ```text
/// GET /images?page=N     -> list_images
/// GET /captions?page=N   -> list_captions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(IMAGES_PATH, get(images::list_images))
        .route(CAPTIONS_PATH, get(captions::list_captions))
}
