/// Primary keys of backend rows (images, captions, profiles) are UUIDs.
pub type RowId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
