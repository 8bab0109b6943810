//! Route definitions for caption votes.

use axum::routing::post;
use axum::Router;

use crate::handlers::votes;
use crate::state::AppState;

/// ```text
/// POST /votes   -> cast_vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/votes", post(votes::cast_vote))
}
