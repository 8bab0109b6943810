//! Static assets served by the app itself.

use axum::http::header;
use axum::response::IntoResponse;

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><rect width="64" height="64" fill="#374151"/><path d="M12 46l12-14 9 10 7-8 12 12z" fill="#6b7280"/><circle cx="44" cy="22" r="5" fill="#6b7280"/></svg>"##;

/// GET /placeholder.svg
///
/// Stand-in preview for images without a URL.
pub async fn placeholder_image() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        PLACEHOLDER_SVG,
    )
}
