//! Configuration and session persistence for the CollarLink CLI.
//!
//! TOML config file + environment overrides, and the persisted sign-in
//! session: username in a plain file, token in the system keyring (with
//! a `COLLARLINK_TOKEN` env override for headless use). Translation to
//! `collarlink_core::ServiceConfig` lives here so the CLI never touches
//! figment directly.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use collarlink_core::{DEFAULT_BASE_URL, ServiceConfig, Session};

/// Keyring service name under which tokens are stored.
const KEYRING_SERVICE: &str = "collarlink";

/// Env var that overrides the keyring token lookup.
pub const TOKEN_ENV: &str = "COLLARLINK_TOKEN";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration (`config.toml`).
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL.
    #[serde(default = "default_server")]
    pub server: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout: default_timeout(),
        }
    }
}

fn default_server() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Translate to the core's runtime config.
    pub fn to_service_config(&self) -> Result<ServiceConfig, ConfigError> {
        let base_url: url::Url = self.server.parse().map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", self.server),
        })?;

        let mut service = ServiceConfig::new(base_url);
        service.transport.timeout = Duration::from_secs(self.timeout);
        Ok(service)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Where the persisted session's username lives.
pub fn session_path() -> PathBuf {
    config_dir().join("session.toml")
}

fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "collarlink", "collarlink")
        .map_or_else(dirs_fallback, |dirs| dirs.config_dir().to_path_buf())
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("collarlink");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment (`COLLARLINK_SERVER`,
/// `COLLARLINK_TIMEOUT`).
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("COLLARLINK_").only(&["server", "timeout"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file doesn't exist or is bad.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Session persistence ─────────────────────────────────────────────

/// On-disk half of a session: the username only. The token never
/// touches the filesystem.
#[derive(Debug, Deserialize, Serialize)]
struct SessionFile {
    username: String,
}

/// Persist a signed-in session: username to `session.toml`, token to
/// the system keyring under the username's entry.
pub fn save_session(session: &Session) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &session.username)?;
    entry.set_password(session.token.expose_secret())?;

    let path = session_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = SessionFile {
        username: session.username.clone(),
    };
    std::fs::write(&path, toml::to_string_pretty(&file)?)?;
    Ok(())
}

/// Load the persisted session, if one exists and its token is
/// resolvable. Token resolution order: `COLLARLINK_TOKEN` env var,
/// then the system keyring.
pub fn load_session() -> Option<Session> {
    let raw = std::fs::read_to_string(session_path()).ok()?;
    let file: SessionFile = toml::from_str(&raw).ok()?;

    let token = resolve_token(&file.username)?;
    let session = Session::new(file.username, token);
    session.is_usable().then_some(session)
}

fn resolve_token(username: &str) -> Option<SecretString> {
    if let Ok(val) = std::env::var(TOKEN_ENV) {
        return Some(SecretString::from(val));
    }

    let entry = keyring::Entry::new(KEYRING_SERVICE, username).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// Sign out: drop the keyring entry and the session file. Missing
/// pieces are not an error.
pub fn clear_session() -> Result<(), ConfigError> {
    if let Ok(raw) = std::fs::read_to_string(session_path()) {
        if let Ok(file) = toml::from_str::<SessionFile>(&raw) {
            if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &file.username) {
                // Entry may already be gone.
                let _ = entry.delete_credential();
            }
        }
    }

    match std::fs::remove_file(session_path()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let cfg = Config::default();
        assert_eq!(cfg.server, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, 30);
    }

    #[test]
    fn service_config_carries_timeout() {
        let cfg = Config {
            server: "http://localhost:8080".into(),
            timeout: 5,
        };
        let service = cfg.to_service_config().unwrap();
        assert_eq!(service.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(service.transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_server_url_is_a_validation_error() {
        let cfg = Config {
            server: "not a url".into(),
            timeout: 30,
        };
        let err = cfg.to_service_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.to_string().contains("server"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let cfg = Config {
            server: "http://localhost:8080".into(),
            timeout: 10,
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.server, cfg.server);
        assert_eq!(back.timeout, cfg.timeout);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str(r#"server = "http://localhost:9999""#).unwrap();
        assert_eq!(cfg.server, "http://localhost:9999");
        assert_eq!(cfg.timeout, 30);
    }

    #[test]
    fn session_file_format_is_stable() {
        let file = SessionFile {
            username: "alice".into(),
        };
        let text = toml::to_string_pretty(&file).unwrap();
        assert_eq!(text.trim(), r#"username = "alice""#);
    }
}
