//! HTTP implementation of [`DataStore`] and [`IdentityProvider`].
//!
//! Talks to the backend's REST API (`/rest/v1`) for table access and to its
//! auth API (`/auth/v1`) for sessions, using one pooled [`reqwest::Client`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Method, RequestBuilder, StatusCode};
use url::Url;

use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::identity::{authorization_code, IdentityProvider, Session, User};
use crate::models::vote::CaptionVote;
use crate::store::{DataStore, ListQuery, Page};

/// Conflict target for vote upserts: one row per voter per caption.
const VOTE_CONFLICT_COLUMNS: &str = "caption_id,profile_id";

/// Client for a single backend project.
pub struct SupabaseClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    // ---- private helpers ----

    fn rest_url(&self, table: &str) -> Result<Url, BackendError> {
        Ok(self.config.url.join(&format!("rest/v1/{table}"))?)
    }

    fn auth_url(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.config.url.join(&format!("auth/v1/{path}"))?)
    }

    /// Start a request carrying the public key, authorized as `bearer` or,
    /// without a user token, as the anonymous role.
    fn request(&self, method: Method, url: Url, bearer: Option<&str>) -> RequestBuilder {
        let token = bearer.unwrap_or(&self.config.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .header(AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Turn a non-2xx response into [`BackendError::Api`] with the backend's
    /// own message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        Err(BackendError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    async fn parse_session(response: reqwest::Response) -> Result<Session, BackendError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Session>().await?)
    }
}

#[async_trait]
impl DataStore for SupabaseClient {
    async fn list_page(&self, query: &ListQuery) -> Result<Page<serde_json::Value>, BackendError> {
        let mut url = self.rest_url(&query.table)?;
        url.query_pairs_mut()
            .append_pair("select", &query.select)
            .append_pair("order", &query.order.to_param());

        let response = self
            .request(Method::GET, url, None)
            .header("Range-Unit", "items")
            .header("Range", format!("{}-{}", query.window.from(), query.window.to()))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        // A window past the last row is "not satisfiable", but the header
        // still reports the total, which the caller needs to clamp.
        if response.status() == StatusCode::RANGE_NOT_SATISFIABLE {
            if let Some(count) = content_range_total(response.headers()) {
                tracing::debug!(table = %query.table, count, "Requested window is past the end");
                return Ok(Page {
                    rows: Vec::new(),
                    count,
                });
            }
        }

        let response = Self::ensure_success(response).await?;
        let count = content_range_total(response.headers()).ok_or_else(|| {
            BackendError::ContentRange(
                response
                    .headers()
                    .get(CONTENT_RANGE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
            )
        })?;
        let rows = response.json::<Vec<serde_json::Value>>().await?;

        tracing::debug!(
            table = %query.table,
            from = query.window.from(),
            to = query.window.to(),
            rows = rows.len(),
            count,
            "Fetched page"
        );

        Ok(Page { rows, count })
    }

    async fn upsert_vote(&self, vote: &CaptionVote, access_token: &str) -> Result<(), BackendError> {
        let mut url = self.rest_url("caption_votes")?;
        url.query_pairs_mut()
            .append_pair("on_conflict", VOTE_CONFLICT_COLUMNS);

        let response = self
            .request(Method::POST, url, Some(access_token))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(vote)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<Url, BackendError> {
        let mut url = self.auth_url("authorize")?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", "s256");
        Ok(url)
    }

    async fn exchange_code(
        &self,
        callback_url: &Url,
        code_verifier: &str,
    ) -> Result<Session, BackendError> {
        let auth_code = authorization_code(callback_url)?;

        let mut url = self.auth_url("token")?;
        url.query_pairs_mut().append_pair("grant_type", "pkce");

        let body = serde_json::json!({
            "auth_code": auth_code,
            "code_verifier": code_verifier,
        });

        let response = self
            .request(Method::POST, url, None)
            .json(&body)
            .send()
            .await?;

        Self::parse_session(response).await
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<User>, BackendError> {
        let url = self.auth_url("user")?;
        let response = self
            .request(Method::GET, url, Some(access_token))
            .send()
            .await?;

        match Self::ensure_success(response).await {
            Ok(response) => Ok(Some(response.json::<User>().await?)),
            Err(err) if err.is_unauthorized() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let mut url = self.auth_url("token")?;
        url.query_pairs_mut()
            .append_pair("grant_type", "refresh_token");

        let body = serde_json::json!({ "refresh_token": refresh_token });

        let response = self
            .request(Method::POST, url, None)
            .json(&body)
            .send()
            .await?;

        Self::parse_session(response).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let url = self.auth_url("logout")?;
        let response = self
            .request(Method::POST, url, Some(access_token))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Total row count from a `Content-Range: 0-19/45` (or `*/0`) header.
fn content_range_total(headers: &HeaderMap) -> Option<i64> {
    let value = headers.get(CONTENT_RANGE)?.to_str().ok()?;
    parse_content_range_total(value)
}

fn parse_content_range_total(value: &str) -> Option<i64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.trim().parse::<i64>().ok().filter(|n| *n >= 0)
}

/// Best human-readable message from an error body.
///
/// The REST API uses `message`, the auth API `msg` or `error_description`.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    }
}
