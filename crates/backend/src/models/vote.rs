//! Rows of the `caption_votes` table.

use capvote_core::types::{RowId, Timestamp};
use capvote_core::vote::VoteValue;
use serde::{Deserialize, Serialize};

/// A vote keyed by (`caption_id`, `profile_id`).
///
/// `profile_id` is not optional: a vote always belongs to a signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionVote {
    pub caption_id: RowId,
    pub profile_id: RowId,
    pub vote_value: VoteValue,
    pub created_datetime_utc: Timestamp,
    pub modified_datetime_utc: Timestamp,
}

impl CaptionVote {
    /// A vote cast at `now`; both timestamps are set to the same instant.
    pub fn cast(caption_id: RowId, profile_id: RowId, value: VoteValue, now: Timestamp) -> Self {
        Self {
            caption_id,
            profile_id,
            vote_value: value,
            created_datetime_utc: now,
            modified_datetime_utc: now,
        }
    }
}
