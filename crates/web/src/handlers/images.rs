//! Handler for the images gallery.

use axum::extract::{Query, State};
use axum::response::Response;
use capvote_backend::repositories::ImageRepo;

use super::gallery::paginate;
use crate::auth::CurrentUser;
use crate::query::PageParams;
use crate::state::AppState;
use crate::views::{render_template, ImageRowView, ImagesTemplate, PagerView};

pub const IMAGES_PATH: &str = "/images";

/// GET /images?page=N
///
/// One page of images, newest first, as a table.
pub async fn list_images(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<PageParams>,
) -> Response {
    let signed_in_as = user.map(|auth| {
        auth.user
            .email
            .unwrap_or_else(|| auth.user.id.to_string())
    });

    paginate(
        IMAGES_PATH,
        params.page.as_deref(),
        |window| ImageRepo::list_page(state.store.as_ref(), window),
        |nav, images| {
            render_template(ImagesTemplate {
                pager: PagerView::new(IMAGES_PATH, nav),
                rows: images.iter().map(ImageRowView::from).collect(),
                signed_in_as,
            })
        },
    )
    .await
}
