//! Repository for the `images` table.

use capvote_core::pagination::RowWindow;

use super::CREATED_COLUMN;
use crate::error::BackendError;
use crate::models::image::Image;
use crate::store::{DataStore, ListQuery, Order, Page};

/// Column list for `images` queries. No embedded joins.
const IMAGE_COLUMNS: &str = "\
    id, url, is_public, is_common_use, profile_id, additional_context, \
    image_description, celebrity_recognition, created_datetime_utc, \
    modified_datetime_utc";

/// Read-only access to image rows.
pub struct ImageRepo;

impl ImageRepo {
    /// One page of images, newest first, with the total image count.
    pub async fn list_page(
        store: &dyn DataStore,
        window: RowWindow,
    ) -> Result<Page<Image>, BackendError> {
        let query = ListQuery::new("images", IMAGE_COLUMNS, Order::desc(CREATED_COLUMN), window);
        let page = store.list_page(&query).await?;
        Ok(page.try_map(serde_json::from_value)?)
    }
}
