//! The data access seam: paginated list reads and the caption vote upsert.

use async_trait::async_trait;
use capvote_core::pagination::RowWindow;

use crate::error::BackendError;
use crate::models::vote::CaptionVote;

/// One page of rows plus the exact number of rows matching the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub count: i64,
}

impl<T> Page<T> {
    /// Convert every row, failing on the first conversion error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            rows: self.rows.into_iter().map(f).collect::<Result<_, _>>()?,
            count: self.count,
        })
    }
}

/// Sort key for a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    /// `column.asc` / `column.desc`, as expected by the `order` parameter.
    pub fn to_param(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{direction}", self.column)
    }
}

/// A counted, windowed read of a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub table: String,
    /// Column projection, possibly with nested joins (`id, images(url)`).
    pub select: String,
    pub order: Order,
    pub window: RowWindow,
}

impl ListQuery {
    /// Build a query, compacting the projection.
    pub fn new(table: impl Into<String>, select: &str, order: Order, window: RowWindow) -> Self {
        Self {
            table: table.into(),
            select: select.split_whitespace().collect(),
            order,
            window,
        }
    }
}

/// Reads and writes against the backend's tables.
///
/// Every error is returned as-is: no retries, no partial results.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Fetch exactly `query.window` plus the total matching row count.
    async fn list_page(&self, query: &ListQuery) -> Result<Page<serde_json::Value>, BackendError>;

    /// Insert the vote or overwrite the existing row for its
    /// (`caption_id`, `profile_id`) pair, acting as the voter.
    async fn upsert_vote(&self, vote: &CaptionVote, access_token: &str)
        -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use capvote_core::error::CoreError;

    use super::*;

    #[test]
    fn projection_whitespace_is_removed() {
        let query = ListQuery::new(
            "captions",
            "id,\n  content,\n  images (\n    url\n  )",
            Order::desc("created_datetime_utc"),
            RowWindow::for_page(1),
        );

        assert_eq!(query.select, "id,content,images(url)");
        assert_eq!(query.order.to_param(), "created_datetime_utc.desc");
    }

    #[test]
    fn bad_windows_cannot_be_built() {
        assert_matches!(RowWindow::new(0, 500), Err(CoreError::Validation(_)));
        assert_matches!(RowWindow::new(-5, 500), Err(CoreError::Validation(_)));
        assert_matches!(RowWindow::new(-20, -1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn page_rows_can_be_converted() {
        let page = Page {
            rows: vec!["1", "2"],
            count: 2,
        };
        let converted: Page<i32> = page.try_map(|s| s.parse()).unwrap();
        assert_eq!(converted.rows, vec![1, 2]);
        assert_eq!(converted.count, 2);
    }
}
