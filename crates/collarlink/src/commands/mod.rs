//! Command dispatch: bridges CLI args -> core store intents -> output.

pub mod auth;
pub mod devices;
pub mod geofences;
pub mod pets;
pub mod util;

use std::sync::Arc;

use collarlink_core::{CredentialStore, ServiceConfig};

use crate::cli::{Cli, Command, CompletionsArgs, GlobalOpts};
use crate::error::CliError;

/// Everything a command handler needs to build stores and controllers.
pub struct AppContext {
    pub service: ServiceConfig,
    pub credentials: Arc<CredentialStore>,
}

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &AppContext, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Login { username } => auth::login(ctx, global, username).await,
        Command::Register { username } => auth::register(ctx, global, username).await,
        Command::Logout => auth::logout(ctx, global),
        Command::Whoami => auth::whoami(ctx, global),
        Command::Pet(args) => pets::handle(ctx, args, global).await,
        Command::Device(args) => devices::handle(ctx, args, global).await,
        Command::Geofence(args) => geofences::handle(ctx, args, global).await,
        Command::Completions(args) => {
            completions(&args);
            Ok(())
        }
    }
}

/// Write shell completions for the full command tree to stdout.
pub fn completions(args: &CompletionsArgs) {
    use clap::CommandFactory;

    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "collarlink", &mut std::io::stdout());
}
