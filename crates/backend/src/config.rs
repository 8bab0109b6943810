use url::Url;

/// Endpoint and public key of the managed backend.
///
/// Built once at startup and shared by every request through the single
/// [`SupabaseClient`](crate::SupabaseClient).
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the project, always ending in `/`.
    pub url: Url,
    /// Public (anon) API key sent as `apikey` on every request.
    pub anon_key: String,
}

/// Errors raised while loading [`BackendConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid backend URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

impl BackendConfig {
    /// Configure from a full project URL and key.
    pub fn new(url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(ConfigError::Missing("SUPABASE_ANON_KEY"));
        }

        let mut parsed = Url::parse(url.trim()).map_err(|source| ConfigError::InvalidUrl {
            value: url.to_string(),
            source,
        })?;

        // `Url::join` replaces the last segment unless the base ends in '/'.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            url: parsed,
            anon_key,
        })
    }

    /// Configure from a hosted project identifier (`https://{id}.supabase.co`).
    pub fn for_project(project_id: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(&format!("https://{}.supabase.co", project_id.trim()), anon_key)
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Required | Notes                               |
    /// |-----------------------|----------|-------------------------------------|
    /// | `SUPABASE_URL`        | one of   | full project URL                    |
    /// | `SUPABASE_PROJECT_ID` | one of   | used when `SUPABASE_URL` is unset   |
    /// | `SUPABASE_ANON_KEY`   | **yes**  | public API key                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let anon_key =
            non_empty("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        match (non_empty("SUPABASE_URL"), non_empty("SUPABASE_PROJECT_ID")) {
            (Some(url), _) => Self::new(&url, anon_key),
            (None, Some(project_id)) => Self::for_project(&project_id, anon_key),
            (None, None) => Err(ConfigError::Missing("SUPABASE_URL or SUPABASE_PROJECT_ID")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn project_id_expands_to_hosted_url() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("SUPABASE_PROJECT_ID", "abcd1234"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.url.as_str(), "https://abcd1234.supabase.co/");
        assert_eq!(config.anon_key, "anon");
    }

    #[test]
    fn full_url_wins_over_project_id() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "http://localhost:54321"),
            ("SUPABASE_PROJECT_ID", "ignored"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.url.as_str(), "http://localhost:54321/");
    }

    #[test]
    fn url_path_gets_trailing_slash() {
        let config = BackendConfig::new("https://proxy.example.com/backend", "anon").unwrap();
        assert_eq!(
            config.url.join("rest/v1/images").unwrap().as_str(),
            "https://proxy.example.com/backend/rest/v1/images"
        );
    }

    #[test]
    fn missing_key_is_an_error() {
        let result = BackendConfig::from_lookup(lookup(&[("SUPABASE_PROJECT_ID", "abcd")]));
        assert_matches!(result, Err(ConfigError::Missing("SUPABASE_ANON_KEY")));
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        let result = BackendConfig::from_lookup(lookup(&[("SUPABASE_ANON_KEY", "anon")]));
        assert_matches!(result, Err(ConfigError::Missing(_)));
    }

    #[test]
    fn invalid_url_is_an_error() {
        let result = BackendConfig::new("not a url", "anon");
        assert_matches!(result, Err(ConfigError::InvalidUrl { .. }));
    }
}
