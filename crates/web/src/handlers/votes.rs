//! Handler for caption votes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use capvote_backend::repositories::VoteRepo;
use capvote_core::error::CoreError;
use capvote_core::types::RowId;
use capvote_core::vote::VoteValue;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::{resolve_session, AuthUser};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /votes`.
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub caption_id: RowId,
    /// `1` for an upvote, `-1` for a downvote.
    pub value: VoteValue,
}

/// Confirmation returned after a vote is stored.
#[derive(Debug, Serialize)]
pub struct VoteReceipt {
    pub caption_id: RowId,
    pub value: VoteValue,
    pub message: &'static str,
}

/// POST /votes
///
/// Record the signed-in user's vote on a caption, replacing their previous
/// vote on it. Without a session nothing is written and 401 is returned.
/// Refreshed session cookies are sent back whatever the outcome.
pub async fn cast_vote(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<CastVoteRequest>, JsonRejection>,
) -> (CookieJar, AppResult<Json<DataResponse<VoteReceipt>>>) {
    let (jar, resolved) = resolve_session(
        state.identity.as_ref(),
        jar,
        state.config.secure_cookies,
    )
    .await;

    let result = match resolved {
        Ok(auth) => record_vote(&state, auth, body).await,
        Err(err) => Err(err.into()),
    };
    (jar, result)
}

async fn record_vote(
    state: &AppState,
    auth: Option<AuthUser>,
    body: Result<Json<CastVoteRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<VoteReceipt>>> {
    let auth = auth.ok_or_else(|| CoreError::Unauthorized("Login required".into()))?;
    let Json(input) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let vote = VoteRepo::cast(
        state.store.as_ref(),
        &auth.access_token,
        input.caption_id,
        auth.user.id,
        input.value,
        Utc::now(),
    )
    .await?;

    tracing::info!(
        caption_id = %vote.caption_id,
        user_id = %auth.user.id,
        value = vote.vote_value.as_i32(),
        "Vote saved",
    );

    Ok(Json(DataResponse {
        data: VoteReceipt {
            caption_id: vote.caption_id,
            value: vote.vote_value,
            message: "Vote saved",
        },
    }))
}
