//! Authentication command handlers: login, register, logout, whoami.

use owo_colors::OwoColorize;
use serde::Serialize;

use collarlink_core::{AuthController, AuthGrant, AuthState};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{AppContext, util};

/// Sign in, persist the session, and report the signed-in user.
pub async fn login(
    ctx: &AppContext,
    global: &GlobalOpts,
    username: Option<String>,
) -> Result<(), CliError> {
    let username = util::resolve_username(username)?;
    let password = util::prompt_password("Password")?;

    let auth = AuthController::new(ctx.service.clone(), ctx.credentials.clone());
    auth.sign_in(&username, &password).await;

    match auth.state() {
        AuthState::Success(_) => {
            let session = ctx
                .credentials
                .current()
                .ok_or_else(|| CliError::AuthFailed {
                    message: "sign-in reported success without a session".into(),
                })?;
            collarlink_config::save_session(&session)?;

            if output::should_color(&global.color) {
                util::note(
                    &format!("Signed in as {}", session.username.green().bold()),
                    global.quiet,
                );
            } else {
                util::note(&format!("Signed in as {}", session.username), global.quiet);
            }
            Ok(())
        }
        AuthState::Error(message) => Err(classify_auth_failure(message)),
        AuthState::Initial | AuthState::Loading => Err(CliError::AuthFailed {
            message: "sign-in did not complete".into(),
        }),
    }
}

/// Register a new account. Registration never signs the session in.
pub async fn register(
    ctx: &AppContext,
    global: &GlobalOpts,
    username: Option<String>,
) -> Result<(), CliError> {
    let username = util::resolve_username(username)?;
    let password = util::prompt_password("Password")?;
    let repeated = util::prompt_password("Repeat password")?;

    {
        use secrecy::ExposeSecret;
        if password.expose_secret() != repeated.expose_secret() {
            return Err(CliError::Validation {
                field: "password".into(),
                reason: "passwords do not match".into(),
            });
        }
    }

    let auth = AuthController::new(ctx.service.clone(), ctx.credentials.clone());
    auth.sign_up(&username, &password).await;

    match auth.state() {
        AuthState::Success(grant) => {
            if let AuthGrant::Message(message) = grant {
                util::note(&message, global.quiet);
            }
            util::note("Sign in with: collarlink login", global.quiet);
            Ok(())
        }
        AuthState::Error(message) => Err(classify_auth_failure(message)),
        AuthState::Initial | AuthState::Loading => Err(CliError::AuthFailed {
            message: "registration did not complete".into(),
        }),
    }
}

/// Drop the in-memory session and the persisted one.
pub fn logout(ctx: &AppContext, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.credentials.clear();
    collarlink_config::clear_session()?;
    util::note("Signed out", global.quiet);
    Ok(())
}

#[derive(Serialize)]
struct WhoAmI {
    username: String,
    server: String,
}

/// Report the signed-in user, in the selected output format.
pub fn whoami(ctx: &AppContext, global: &GlobalOpts) -> Result<(), CliError> {
    let username = ctx.credentials.username().ok_or(CliError::NotSignedIn)?;

    let me = WhoAmI {
        username,
        server: ctx.service.base_url.to_string(),
    };
    let out = match global.output {
        OutputFormat::Table => format!("Signed in as {} ({})", me.username, me.server),
        OutputFormat::Json => output::to_json(&me, false),
        OutputFormat::JsonCompact => output::to_json(&me, true),
        OutputFormat::Yaml => output::to_yaml(&me),
        OutputFormat::Plain => me.username.clone(),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Auth state errors come pre-rendered; recover the category.
fn classify_auth_failure(message: String) -> CliError {
    if message.contains("connection error") {
        CliError::Connection { message }
    } else {
        CliError::AuthFailed { message }
    }
}
