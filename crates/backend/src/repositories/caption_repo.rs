//! Repository for the `captions` table.

use capvote_core::pagination::RowWindow;

use super::CREATED_COLUMN;
use crate::error::BackendError;
use crate::models::caption::Caption;
use crate::store::{DataStore, ListQuery, Order, Page};

/// Column list for `captions` queries, joined with the image URL.
const CAPTION_COLUMNS: &str = "id, content, created_datetime_utc, images ( url )";

/// Read-only access to caption rows.
pub struct CaptionRepo;

impl CaptionRepo {
    /// One page of captions with their image, newest first, plus the total.
    pub async fn list_page(
        store: &dyn DataStore,
        window: RowWindow,
    ) -> Result<Page<Caption>, BackendError> {
        let query = ListQuery::new(
            "captions",
            CAPTION_COLUMNS,
            Order::desc(CREATED_COLUMN),
            window,
        );
        let page = store.list_page(&query).await?;
        Ok(page.try_map(serde_json::from_value)?)
    }
}
