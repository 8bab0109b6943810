#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use url::Url;
use uuid::Uuid;

use capvote_backend::identity::authorization_code;
use capvote_backend::models::vote::CaptionVote;
use capvote_backend::{
    BackendError, DataStore, IdentityProvider, ListQuery, Page, Session, User,
};
use capvote_web::config::ServerConfig;
use capvote_web::router::build_app_router;
use capvote_web::state::AppState;

pub const GOOD_CODE: &str = "good-code";
pub const VALID_TOKEN: &str = "valid-access-token";
pub const VALID_REFRESH: &str = "valid-refresh-token";
pub const REFRESHED_TOKEN: &str = "refreshed-access-token";

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

/// Everything the fake backend stores or records.
#[derive(Default)]
pub struct FakeState {
    pub images: Vec<serde_json::Value>,
    pub captions: Vec<serde_json::Value>,
    pub votes: HashMap<(Uuid, Uuid), CaptionVote>,
    /// Access token -> user.
    pub users: HashMap<String, User>,
    /// Refresh token -> user.
    pub refresh_tokens: HashMap<String, User>,
    /// When set, list reads fail with this message.
    pub list_error: Option<String>,
    /// When set, vote upserts fail with this message.
    pub vote_error: Option<String>,
    /// When set, user lookups by access token fail with this message.
    pub user_error: Option<String>,
    /// When set, refreshed sessions do not embed the user.
    pub refresh_without_user: bool,
    pub list_calls: Vec<ListQuery>,
    pub upsert_calls: usize,
    pub exchanges: Vec<(String, String)>,
    pub sign_outs: Vec<String>,
}

/// In-memory stand-in for the managed backend, implementing both seams.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    /// A backend with one known user holding [`VALID_TOKEN`] and
    /// [`VALID_REFRESH`].
    pub fn with_user() -> (Arc<Self>, User) {
        let backend = Arc::new(Self::default());
        let user = User {
            id: Uuid::new_v4(),
            email: Some("voter@example.com".into()),
        };
        {
            let mut state = backend.state();
            state.users.insert(VALID_TOKEN.into(), user.clone());
            state.refresh_tokens.insert(VALID_REFRESH.into(), user.clone());
        }
        (backend, user)
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn session_for(&self, user: &User, access_token: &str) -> Session {
        let mut state = self.state();
        state.users.insert(access_token.to_string(), user.clone());
        Session {
            access_token: access_token.to_string(),
            refresh_token: format!("{access_token}-refresh"),
            expires_in: 3600,
            expires_at: Some(chrono::Utc::now().timestamp() + 3600),
            user: (!state.refresh_without_user).then(|| user.clone()),
        }
    }
}

fn api_error(status: u16, message: &str) -> BackendError {
    BackendError::Api {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl DataStore for FakeBackend {
    async fn list_page(&self, query: &ListQuery) -> Result<Page<serde_json::Value>, BackendError> {
        let mut state = self.state();
        state.list_calls.push(query.clone());

        if let Some(message) = &state.list_error {
            return Err(api_error(400, message));
        }

        let rows = match query.table.as_str() {
            "images" => &state.images,
            "captions" => &state.captions,
            other => {
                let message = format!("relation \"{other}\" does not exist");
                return Err(api_error(404, &message));
            }
        };

        let from = query.window.from() as usize;
        let to = query.window.to() as usize;
        let page = rows
            .iter()
            .skip(from)
            .take(to + 1 - from)
            .cloned()
            .collect();

        Ok(Page {
            rows: page,
            count: rows.len() as i64,
        })
    }

    async fn upsert_vote(&self, vote: &CaptionVote, access_token: &str) -> Result<(), BackendError> {
        let mut state = self.state();
        state.upsert_calls += 1;

        if let Some(message) = &state.vote_error {
            return Err(api_error(403, message));
        }

        match state.users.get(access_token) {
            Some(user) if user.id == vote.profile_id => {}
            _ => return Err(api_error(401, "JWT expired")),
        }

        state
            .votes
            .insert((vote.caption_id, vote.profile_id), vote.clone());
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for FakeBackend {
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<Url, BackendError> {
        let mut url = Url::parse("https://backend.test/auth/v1/authorize")?;
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
        let code = authorization_code(callback_url)?;
        self.state()
            .exchanges
            .push((code.clone(), code_verifier.to_string()));

        if code != GOOD_CODE {
            return Err(api_error(400, "invalid flow state, no valid flow state found"));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: Some("new@example.com".into()),
        };
        Ok(self.session_for(&user, "exchanged-access-token"))
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<User>, BackendError> {
        let state = self.state();
        if let Some(message) = &state.user_error {
            return Err(api_error(500, message));
        }
        Ok(state.users.get(access_token).cloned())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        let user = self.state().refresh_tokens.get(refresh_token).cloned();
        match user {
            Some(user) => Ok(self.session_for(&user, REFRESHED_TOKEN)),
            None => Err(api_error(400, "Invalid Refresh Token: Refresh Token Not Found")),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        self.state().sign_outs.push(access_token.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// `n` image rows, each with a distinct description `image-{i}`.
pub fn image_rows(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| {
            serde_json::json!({
                "id": Uuid::new_v4(),
                "url": format!("https://cdn.test/{i}.png"),
                "is_public": i % 2 == 0,
                "is_common_use": false,
                "profile_id": null,
                "additional_context": null,
                "image_description": format!("image-{i}"),
                "celebrity_recognition": null,
                "created_datetime_utc": "2024-05-01T12:00:00+00:00",
                "modified_datetime_utc": null,
            })
        })
        .collect()
}

/// `n` caption rows, each with content `caption-{i}` and a joined image.
pub fn caption_rows(n: usize) -> Vec<serde_json::Value> {
    (0..n)
        .map(|i| {
            serde_json::json!({
                "id": Uuid::new_v4(),
                "content": format!("caption-{i}"),
                "created_datetime_utc": "2024-05-01T12:00:00+00:00",
                "images": { "url": format!("https://cdn.test/{i}.png") },
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        public_base_url: Url::parse("http://localhost:3000").unwrap(),
        oauth_provider: "google".to_string(),
        protected_prefixes: vec!["/images".to_string()],
        secure_cookies: false,
    }
}

/// Build the full application router on top of `backend`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the session gate and
/// the rest of the middleware stack are exercised too.
pub fn build_test_app(backend: Arc<FakeBackend>) -> Router {
    build_test_app_with(backend, test_config())
}

pub fn build_test_app_with(backend: Arc<FakeBackend>, config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        store: backend.clone(),
        identity: backend,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_with_cookies(app, uri, "").await
}

pub async fn get_with_cookies(app: Router, uri: &str, cookies: &str) -> Response<Body> {
    let mut builder = Request::get(uri);
    if !cookies.is_empty() {
        builder = builder.header(COOKIE, cookies);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json_with_cookies(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookies: &str,
) -> Response<Body> {
    post_raw_with_cookies(app, uri, body.to_string(), cookies).await
}

pub async fn post_raw_with_cookies(
    app: Router,
    uri: &str,
    body: String,
    cookies: &str,
) -> Response<Body> {
    let mut builder = Request::post(uri).header(CONTENT_TYPE, "application/json");
    if !cookies.is_empty() {
        builder = builder.header(COOKIE, cookies);
    }
    app.oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(axum::http::header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

/// All `Set-Cookie` header values.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Value of the cookie `name` set by `response`, if any.
pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response).into_iter().find_map(|c| {
        c.strip_prefix(&prefix)
            .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
    })
}
