use capvote_core::error::CoreError;

/// Errors from the backend REST and auth APIs.
///
/// [`BackendError::Api`] displays the backend's own message verbatim so it
/// can be shown to the user unchanged.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// A row did not match the expected shape.
    #[error("Unexpected row shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// A URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A counted list response had no usable `Content-Range` header.
    #[error("Missing or malformed Content-Range header: {0:?}")]
    ContentRange(Option<String>),

    /// The OAuth callback carried no authorization code.
    #[error("Authorization code missing from callback URL")]
    MissingAuthCode,

    /// The identity provider reported a failure in the callback.
    #[error("Sign-in failed: {0}")]
    SignIn(String),

    /// The request was rejected before being sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl BackendError {
    /// HTTP status returned by the backend, if the failure came from it.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            BackendError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the backend rejected the caller's credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
