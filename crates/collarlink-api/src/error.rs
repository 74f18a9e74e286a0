use thiserror::Error;

/// Top-level error type for the `collarlink-api` crate.
///
/// Covers every failure mode of a single request/response exchange.
/// `collarlink-core` renders these into observable `Failed`/`Error`
/// states -- nothing here escapes to the UI layer as a raised error.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The supplied bearer token cannot be encoded as a header value.
    #[error("invalid bearer token: {message}")]
    InvalidToken { message: String },

    // ── Service responses ───────────────────────────────────────────
    /// Non-2xx status, with the raw error body when the server sent one.
    #[error("request failed: {status}{}", body.as_ref().map(|b| format!(" - {b}")).unwrap_or_default())]
    Status { status: u16, body: Option<String> },

    /// A 2xx response with no decodable payload where one was expected.
    #[error("empty response from server")]
    EmptyResponse,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("invalid response body: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The HTTP status code, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the credential (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if the request never produced a response
    /// (connect failure or timeout).
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
