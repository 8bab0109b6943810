//! Handler for the caption voting gallery.

use axum::extract::{Query, State};
use axum::response::Response;
use capvote_backend::repositories::CaptionRepo;

use super::gallery::paginate;
use crate::query::PageParams;
use crate::state::AppState;
use crate::views::{render_template, CaptionCardView, CaptionsTemplate, PagerView};

pub const CAPTIONS_PATH: &str = "/captions";

/// GET /captions?page=N
///
/// One page of captions with their image and vote buttons, newest first.
pub async fn list_captions(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Response {
    paginate(
        CAPTIONS_PATH,
        params.page.as_deref(),
        |window| CaptionRepo::list_page(state.store.as_ref(), window),
        |nav, captions| {
            render_template(CaptionsTemplate {
                pager: PagerView::new(CAPTIONS_PATH, nav),
                cards: captions.iter().map(CaptionCardView::from).collect(),
            })
        },
    )
    .await
}
