//! Shared query parameter types for page handlers.

use serde::Deserialize;

/// Gallery pagination parameter (`?page=`).
///
/// Kept as raw text: absence, emptiness and garbage are all meaningful to
/// [`capvote_core::pagination::plan_page`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}
