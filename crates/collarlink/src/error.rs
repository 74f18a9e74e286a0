//! CLI error types with miette diagnostics.
//!
//! Maps core failures into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use collarlink_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────

    #[error("Not signed in")]
    #[diagnostic(
        code(collarlink::not_signed_in),
        help("Sign in with: collarlink login")
    )]
    NotSignedIn,

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(collarlink::auth_failed),
        help("Check your username and password, then retry: collarlink login")
    )]
    AuthFailed { message: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the CollarLink server")]
    #[diagnostic(
        code(collarlink::connection_failed),
        help(
            "Check your network, or point at a different server with\n\
             --server / COLLARLINK_SERVER."
        )
    )]
    Connection { message: String },

    // ── API / operations ─────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(collarlink::operation_failed))]
    OperationFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(collarlink::validation))]
    Validation { field: String, reason: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(collarlink::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Configuration / IO ───────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(collarlink::config))]
    Config(#[from] collarlink_config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotSignedIn | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Classify a rendered failure message from a store's `Failed` (or
    /// the auth controller's `Error`) state. The stores fold transport
    /// and status errors into display strings, so the CLI recovers the
    /// category from the message shape.
    pub fn from_failure(message: String) -> Self {
        if message.contains("not signed in") {
            Self::NotSignedIn
        } else if message.contains("connection error") {
            Self::Connection { message }
        } else {
            Self::OperationFailed { message }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotSignedIn => Self::NotSignedIn,
            CoreError::Api(api) if api.is_connection() => Self::Connection {
                message: api.to_string(),
            },
            CoreError::Api(api) if api.is_unauthorized() => Self::AuthFailed {
                message: api.to_string(),
            },
            CoreError::Api(api) => Self::OperationFailed {
                message: api.to_string(),
            },
        }
    }
}
