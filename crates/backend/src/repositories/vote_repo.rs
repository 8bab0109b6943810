//! Repository for the `caption_votes` table.

use capvote_core::types::{RowId, Timestamp};
use capvote_core::vote::VoteValue;

use crate::error::BackendError;
use crate::models::vote::CaptionVote;
use crate::store::DataStore;

/// Write access to caption votes.
pub struct VoteRepo;

impl VoteRepo {
    /// Record `profile_id`'s vote on `caption_id`, replacing any earlier vote.
    ///
    /// The caller must have resolved `profile_id` from `access_token`.
    pub async fn cast(
        store: &dyn DataStore,
        access_token: &str,
        caption_id: RowId,
        profile_id: RowId,
        value: VoteValue,
        now: Timestamp,
    ) -> Result<CaptionVote, BackendError> {
        let vote = CaptionVote::cast(caption_id, profile_id, value, now);
        store.upsert_vote(&vote, access_token).await?;

        tracing::debug!(%caption_id, %profile_id, value = value.as_i32(), "Vote upserted");
        Ok(vote)
    }
}
