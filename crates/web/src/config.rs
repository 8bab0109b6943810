use url::Url;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// The backend endpoint is configured separately through
/// [`capvote_backend::BackendConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Externally visible origin, used to build the OAuth callback URL.
    pub public_base_url: Url,
    /// Identity provider offered on the login page (default: `google`).
    pub oauth_provider: String,
    /// Path prefixes that require a session (default: `/images`).
    pub protected_prefixes: Vec<String>,
    /// Mark session cookies `Secure` (default: `false`).
    pub secure_cookies: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `HOST`                 | `0.0.0.0`                |
    /// | `PORT`                 | `3000`                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000`  |
    /// | `OAUTH_PROVIDER`       | `google`                 |
    /// | `PROTECTED_PREFIXES`   | `/images`                |
    /// | `SECURE_COOKIES`       | `false`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url: Url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .parse()
            .expect("PUBLIC_BASE_URL must be an absolute URL");

        let oauth_provider =
            std::env::var("OAUTH_PROVIDER").unwrap_or_else(|_| "google".into());

        let protected_prefixes = parse_prefixes(
            &std::env::var("PROTECTED_PREFIXES").unwrap_or_else(|_| "/images".into()),
        );

        let secure_cookies: bool = std::env::var("SECURE_COOKIES")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("SECURE_COOKIES must be true or false");

        Self {
            host,
            port,
            request_timeout_secs,
            public_base_url,
            oauth_provider,
            protected_prefixes,
            secure_cookies,
        }
    }

    /// Absolute URL the identity provider sends the browser back to.
    pub fn callback_url(&self) -> String {
        format!(
            "{}/auth/callback",
            self.public_base_url.as_str().trim_end_matches('/')
        )
    }
}

/// Split a comma-separated prefix list, normalizing each to `/segment` form.
fn parse_prefixes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.starts_with('/') {
                s.to_string()
            } else {
                format!("/{s}")
            }
        })
        .collect()
}
