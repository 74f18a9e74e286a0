mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use collarlink_core::CredentialStore;

use crate::cli::{Cli, Command};
use crate::commands::AppContext;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Shell completions need no server context
    if let Command::Completions(args) = &cli.command {
        commands::completions(args);
        return Ok(());
    }

    let ctx = build_context(&cli.global)?;
    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &ctx, &cli.global).await
}

/// Build the service config and credential store from the config file,
/// persisted session, and CLI flag overrides.
fn build_context(global: &cli::GlobalOpts) -> Result<AppContext, CliError> {
    let mut cfg = collarlink_config::load_config_or_default();
    if let Some(ref server) = global.server {
        cfg.server.clone_from(server);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }

    let service = cfg.to_service_config()?;

    let credentials = match collarlink_config::load_session() {
        Some(session) => CredentialStore::with_session(session),
        None => CredentialStore::new(),
    };

    Ok(AppContext {
        service,
        credentials: Arc::new(credentials),
    })
}
