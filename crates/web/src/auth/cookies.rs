//! Session and PKCE cookies.
//!
//! The session lives entirely in HTTP-only cookies: the access token, the
//! refresh token and the access token's expiry. The PKCE verifier is kept in
//! its own cookie between the sign-in redirect and the callback.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use capvote_backend::Session;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
pub const EXPIRES_AT_COOKIE: &str = "sb-expires-at";
pub const CODE_VERIFIER_COOKIE: &str = "sb-code-verifier";

const SESSION_COOKIES: [&str; 3] = [
    ACCESS_TOKEN_COOKIE,
    REFRESH_TOKEN_COOKIE,
    EXPIRES_AT_COOKIE,
];

/// Seconds before the recorded expiry at which a token is already treated as
/// expired, so it does not lapse mid-request.
const EXPIRY_LEEWAY_SECS: i64 = 30;

/// Session tokens as read back from request cookies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
}

impl SessionTokens {
    /// Read the session cookies; `None` when neither token is present.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let value = |name: &str| {
            jar.get(name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        };

        let tokens = Self {
            access_token: value(ACCESS_TOKEN_COOKIE),
            refresh_token: value(REFRESH_TOKEN_COOKIE),
            expires_at: value(EXPIRES_AT_COOKIE).and_then(|v| v.parse().ok()),
        };

        if tokens.access_token.is_none() && tokens.refresh_token.is_none() {
            return None;
        }
        Some(tokens)
    }

    /// Whether the recorded expiry has passed at `now` (Unix seconds).
    ///
    /// An unknown expiry is not treated as expired; the backend decides.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|exp| exp - EXPIRY_LEEWAY_SECS <= now)
    }
}

fn http_only_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Persist a freshly issued session.
pub fn store_session(jar: CookieJar, session: &Session, secure: bool) -> CookieJar {
    jar.add(http_only_cookie(
        ACCESS_TOKEN_COOKIE,
        session.access_token.clone(),
        secure,
    ))
    .add(http_only_cookie(
        REFRESH_TOKEN_COOKIE,
        session.refresh_token.clone(),
        secure,
    ))
    .add(http_only_cookie(
        EXPIRES_AT_COOKIE,
        session.expires_at().to_string(),
        secure,
    ))
}

/// Remove every session cookie.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    SESSION_COOKIES
        .iter()
        .fold(jar, |jar, name| jar.remove(Cookie::build(*name).path("/")))
}

/// Remember the PKCE verifier until the callback arrives.
pub fn store_code_verifier(jar: CookieJar, verifier: String, secure: bool) -> CookieJar {
    jar.add(http_only_cookie(CODE_VERIFIER_COOKIE, verifier, secure))
}

/// Read and remove the PKCE verifier.
pub fn take_code_verifier(jar: CookieJar) -> (CookieJar, Option<String>) {
    let verifier = jar
        .get(CODE_VERIFIER_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    let jar = jar.remove(Cookie::build(CODE_VERIFIER_COOKIE).path("/"));
    (jar, verifier)
}

#[cfg(test)]
mod tests {
    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::http::HeaderMap;
    use axum::response::IntoResponse;

    use super::*;

    fn jar_with(cookie_header: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie_header.parse().unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn tokens_are_read_from_cookies() {
        let jar = jar_with("sb-access-token=abc; sb-refresh-token=def; sb-expires-at=1700000000");
        let tokens = SessionTokens::from_jar(&jar).unwrap();

        assert_eq!(tokens.access_token.as_deref(), Some("abc"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("def"));
        assert_eq!(tokens.expires_at, Some(1_700_000_000));
    }

    #[test]
    fn no_session_without_tokens() {
        assert!(SessionTokens::from_jar(&jar_with("theme=dark")).is_none());
        assert!(SessionTokens::from_jar(&jar_with("sb-access-token=")).is_none());
    }

    #[test]
    fn expiry_uses_leeway_and_ignores_unknown() {
        let tokens = SessionTokens {
            access_token: Some("a".into()),
            refresh_token: None,
            expires_at: Some(1_000),
        };
        assert!(tokens.is_expired(1_000));
        assert!(tokens.is_expired(980));
        assert!(!tokens.is_expired(900));

        let unknown = SessionTokens {
            expires_at: None,
            ..tokens
        };
        assert!(!unknown.is_expired(i64::MAX));
    }

    #[test]
    fn clearing_emits_removal_cookies() {
        let jar = clear_session(jar_with("sb-access-token=abc; sb-refresh-token=def"));
        let response = (jar, ()).into_response();

        let removed: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert!(removed.iter().any(|c| c.starts_with("sb-access-token=;")));
        assert!(removed.iter().any(|c| c.starts_with("sb-refresh-token=;")));
    }
}
