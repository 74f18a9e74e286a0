// Transport factory: builds `reqwest::Client` instances bound to one
// bearer token value.
//
// Clients are deliberately rebuilt per intent rather than cached, so the
// token in use is never stale relative to a concurrent sign-out/sign-in.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Transport configuration shared by every client the factory builds.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Connect and overall request timeout. The service contract fixes
    /// this at 30 s; expiry surfaces as a connection error.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` bound to the given bearer token.
    ///
    /// Every request carries `Content-Type: application/json`. The
    /// `Authorization: Bearer <token>` header is attached iff `token`
    /// is present and non-empty, and is marked sensitive so it never
    /// appears in logs.
    pub fn build_client(&self, token: Option<&SecretString>) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let raw = token.expose_secret();
            if !raw.is_empty() {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {raw}")).map_err(|e| {
                        Error::InvalidToken {
                            message: e.to_string(),
                        }
                    })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .user_agent(concat!("collarlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Transport)
    }
}
