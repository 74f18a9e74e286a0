// ── Runtime service configuration ──
//
// Describes *where* the CollarLink backend lives and how to reach it.
// Built by the CLI (or another host); core never reads config files.

use collarlink_api::TransportConfig;
use url::Url;

/// The production backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://collar-link-production.up.railway.app";

/// Configuration for talking to one CollarLink backend.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Backend base URL; `/api/v1/` is appended by the client.
    pub base_url: Url,
    /// Transport settings shared by every client built for this service.
    pub transport: TransportConfig,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            transport: TransportConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(
            Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        )
    }
}
