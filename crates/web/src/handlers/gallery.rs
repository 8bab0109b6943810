//! Pagination plumbing shared by the gallery pages.
//!
//! Both galleries follow one contract: a missing `page` redirects to
//! `page=1` before any fetch, a page past the end redirects to the last page
//! after the fetch, and an empty table renders page 1 without redirecting.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use capvote_backend::{BackendError, Page};
use capvote_core::pagination::{
    plan_page, resolve_page, PageNav, PageOutcome, PagePlan, RowWindow,
};

use crate::views::error_page;

/// Run the gallery pagination flow for `base_path`.
///
/// `fetch` loads one window of rows; `render` turns a page of rows into the
/// final response.
pub async fn paginate<T, Fetch, Fut, Render>(
    base_path: &str,
    raw_page: Option<&str>,
    fetch: Fetch,
    render: Render,
) -> Response
where
    Fetch: FnOnce(RowWindow) -> Fut,
    Fut: std::future::Future<Output = Result<Page<T>, BackendError>>,
    Render: FnOnce(PageNav, Vec<T>) -> Response,
{
    let (page, window) = match plan_page(raw_page) {
        PagePlan::Canonicalize => return page_redirect(base_path, 1),
        PagePlan::Fetch { page, window } => (page, window),
    };

    let listing = match fetch(window).await {
        Ok(listing) => listing,
        Err(err) => return list_failed(base_path, &err),
    };

    match resolve_page(page, listing.count) {
        PageOutcome::Redirect { page } => page_redirect(base_path, page),
        PageOutcome::Render(nav) => render(nav, listing.rows),
    }
}

/// Temporary redirect to `base_path?page={page}`.
pub fn page_redirect(base_path: &str, page: i64) -> Response {
    Redirect::temporary(&format!("{base_path}?page={page}")).into_response()
}

fn list_failed(base_path: &str, err: &BackendError) -> Response {
    tracing::warn!(
        path = base_path,
        error = %err,
        status = ?err.status(),
        "Gallery query failed"
    );
    error_page(StatusCode::BAD_GATEWAY, err.to_string())
}
