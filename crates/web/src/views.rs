//! HTML views rendered with askama.
//!
//! Templates live in `crates/web/templates/`. View models flatten the
//! backend rows into display strings so the templates stay logic-free.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use capvote_backend::models::caption::Caption;
use capvote_backend::models::image::Image;
use capvote_core::pagination::PageNav;

/// Image shown when a row has no URL.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Render a template as an HTML response.
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {e}"),
            )
                .into_response()
        }
    }
}

/// A plain HTML error page carrying `message` as-is.
pub fn error_page(status: StatusCode, message: impl Into<String>) -> Response {
    let mut response = render_template(ErrorTemplate {
        message: message.into(),
    });
    if response.status().is_success() {
        *response.status_mut() = status;
    }
    response
}

/// Format a backend timestamp for display.
///
/// RFC 3339 and offset-less timestamps are shown in UTC; anything else is
/// shown verbatim.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&chrono::Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string();
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        }
    }

    raw.to_string()
}

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// Prev/Next links for a gallery page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub page: i64,
    /// Total pages as shown in headings; at least 1.
    pub shown_total: i64,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl PagerView {
    pub fn new(base_path: &str, nav: PageNav) -> Self {
        let href = |page: i64| format!("{base_path}?page={page}");
        Self {
            page: nav.page,
            shown_total: nav.total_pages.max(1),
            prev_href: nav.prev_page().map(href),
            next_href: nav.next_page().map(href),
        }
    }
}

/// One row of the images table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRowView {
    pub preview_url: String,
    pub id: String,
    pub public_mark: &'static str,
    pub common_use_mark: &'static str,
    pub created: String,
    pub modified: String,
    pub description: String,
    pub context: String,
    pub celebrity: String,
    pub profile_id: String,
}

impl From<&Image> for ImageRowView {
    fn from(image: &Image) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            preview_url: image
                .url
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            id: image.id.map(|id| id.to_string()).unwrap_or_default(),
            public_mark: if image.is_public == Some(true) { "✅" } else { "❌" },
            common_use_mark: if image.is_common_use == Some(true) { "⭐" } else { "" },
            created: format_timestamp(image.created_datetime_utc.as_deref()),
            modified: format_timestamp(image.modified_datetime_utc.as_deref()),
            description: text(&image.image_description),
            context: text(&image.additional_context),
            celebrity: text(&image.celebrity_recognition),
            profile_id: image.profile_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }
}

/// One caption card with its vote buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionCardView {
    pub id: String,
    pub image_url: Option<String>,
    pub content: String,
}

impl From<&Caption> for CaptionCardView {
    fn from(caption: &Caption) -> Self {
        Self {
            id: caption.id.to_string(),
            image_url: caption
                .image_url()
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            content: caption.content.clone().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Template)]
#[template(path = "images.html")]
pub struct ImagesTemplate {
    pub pager: PagerView,
    pub rows: Vec<ImageRowView>,
    /// Email (or id) of the signed-in user, when the page is gated.
    pub signed_in_as: Option<String>,
}

#[derive(Template)]
#[template(path = "captions.html")]
pub struct CaptionsTemplate {
    pub pager: PagerView,
    pub cards: Vec<CaptionCardView>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub provider_label: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

/// Display name for an OAuth provider id (`google` -> `Google`).
pub fn provider_label(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_normalized_to_utc() {
        assert_eq!(
            format_timestamp(Some("2024-05-01T12:30:00+02:00")),
            "2024-05-01 10:30:00 UTC"
        );
        assert_eq!(
            format_timestamp(Some("2024-05-01T12:30:00.123456")),
            "2024-05-01 12:30:00 UTC"
        );
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_timestamp(None), "");
    }

    #[test]
    fn pager_links_follow_page_position() {
        let first = PagerView::new("/images", PageNav { page: 1, total_pages: 3 });
        assert_eq!(first.prev_href, None);
        assert_eq!(first.next_href.as_deref(), Some("/images?page=2"));

        let last = PagerView::new("/images", PageNav { page: 3, total_pages: 3 });
        assert_eq!(last.prev_href.as_deref(), Some("/images?page=2"));
        assert_eq!(last.next_href, None);

        let empty = PagerView::new("/captions", PageNav { page: 1, total_pages: 0 });
        assert_eq!(empty.shown_total, 1);
        assert_eq!(empty.next_href, None);
    }

    #[test]
    fn image_row_falls_back_to_placeholder() {
        let row = ImageRowView::from(&Image {
            is_common_use: Some(true),
            ..Image::default()
        });
        assert_eq!(row.preview_url, PLACEHOLDER_IMAGE);
        assert_eq!(row.public_mark, "❌");
        assert_eq!(row.common_use_mark, "⭐");
        assert!(row.id.is_empty());
    }

    #[test]
    fn error_page_keeps_message_and_status() {
        let response = error_page(StatusCode::BAD_GATEWAY, "relation does not exist");
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn provider_label_capitalizes() {
        assert_eq!(provider_label("google"), "Google");
        assert_eq!(provider_label(""), "");
    }
}
