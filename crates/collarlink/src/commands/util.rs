//! Shared helpers for command handlers.

use secrecy::SecretString;

use collarlink_core::EntityState;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Resolve a username from the positional argument or an interactive prompt.
pub fn resolve_username(arg: Option<String>) -> Result<String, CliError> {
    if let Some(name) = arg {
        return Ok(name);
    }
    dialoguer::Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Prompt for a password without echo.
pub fn prompt_password(prompt: &str) -> Result<SecretString, CliError> {
    let raw = rpassword::prompt_password(format!("{prompt}: "))?;
    Ok(SecretString::from(raw))
}

/// Unwrap a store's terminal state after an intent: `Loaded` yields the
/// collection, `Failed` becomes a classified error, anything else is a
/// sequencing bug surfaced as an operation failure.
pub fn expect_loaded<T>(state: EntityState<T>) -> Result<Vec<T>, CliError> {
    match state {
        EntityState::Loaded(items) => Ok(items),
        EntityState::Failed(message) => Err(CliError::from_failure(message)),
        other => Err(CliError::OperationFailed {
            message: format!("unexpected store state: {}", state_name(&other)),
        }),
    }
}

fn state_name<T>(state: &EntityState<T>) -> &'static str {
    match state {
        EntityState::Idle => "idle",
        EntityState::Loading => "loading",
        EntityState::Loaded(_) => "loaded",
        EntityState::Mutated { .. } => "mutated",
        EntityState::Failed(_) => "failed",
    }
}

/// Print a success note to stderr unless `--quiet` was passed.
pub fn note(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}
