//! Clap derive structures for the `collarlink` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// collarlink -- CLI for the CollarLink pet tracking service
#[derive(Debug, Parser)]
#[command(
    name = "collarlink",
    version,
    about = "Track pets, collars, and geofences from the command line",
    long_about = "A CLI client for the CollarLink pet tracking service.\n\n\
        Sign in once with `collarlink login`; the session persists in the\n\
        system keyring until `collarlink logout`.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend server URL (overrides config file)
    #[arg(long, short = 's', env = "COLLARLINK_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "COLLARLINK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config file)
    #[arg(long, env = "COLLARLINK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session
    Login {
        /// Username (prompted if omitted)
        username: Option<String>,
    },

    /// Register a new account (does not sign in)
    Register {
        /// Username (prompted if omitted)
        username: Option<String>,
    },

    /// Sign out and discard the persisted session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage pets
    #[command(alias = "pets", alias = "p")]
    Pet(PetArgs),

    /// Manage tracking collars
    #[command(alias = "devices", alias = "collar", alias = "d")]
    Device(DeviceArgs),

    /// Manage geofences
    #[command(alias = "geofences", alias = "fence", alias = "g")]
    Geofence(GeofenceArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PETS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PetArgs {
    #[command(subcommand)]
    pub command: PetCommand,
}

#[derive(Debug, Subcommand)]
pub enum PetCommand {
    /// List your pets
    #[command(alias = "ls")]
    List,

    /// Register a new pet
    Add {
        /// Pet name
        name: String,

        /// Species (e.g. dog, cat)
        #[arg(long)]
        species: String,

        /// Breed
        #[arg(long)]
        breed: String,

        /// Gender
        #[arg(long)]
        gender: Gender,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// Collar to link at creation
        #[arg(long)]
        collar: Option<i64>,
    },

    /// Update a pet's details
    Update {
        /// Pet id
        id: i64,

        /// Pet name
        #[arg(long)]
        name: String,

        /// Species (e.g. dog, cat)
        #[arg(long)]
        species: String,

        /// Breed
        #[arg(long)]
        breed: String,

        /// Gender
        #[arg(long)]
        gender: Gender,

        /// Age in years
        #[arg(long)]
        age: u32,
    },

    /// Delete a pet
    #[command(alias = "delete")]
    Rm {
        /// Pet id
        id: i64,
    },

    /// Link a pet to a collar, or unlink it when no collar is given
    SetCollar {
        /// Pet id
        id: i64,

        /// Collar id (omit to unlink)
        collar: Option<i64>,
    },
}

/// Accepted gender values. The backend stores free-form text; the CLI
/// restricts input to what the service's own clients offer.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES (collars)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DeviceArgs {
    #[command(subcommand)]
    pub command: DeviceCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// List your collars
    #[command(alias = "ls")]
    List,

    /// Register a new collar
    Add {
        /// Collar serial number
        serial: i64,

        /// Hardware model
        #[arg(long)]
        model: String,
    },

    /// Delete a collar
    #[command(alias = "delete")]
    Rm {
        /// Collar id
        id: i64,
    },

    /// Assign a pet to a collar
    Assign {
        /// Collar id
        id: i64,

        /// Pet id
        pet: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GEOFENCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GeofenceArgs {
    #[command(subcommand)]
    pub command: GeofenceCommand,
}

#[derive(Debug, Subcommand)]
pub enum GeofenceCommand {
    /// List your geofences
    #[command(alias = "ls")]
    List,

    /// Create a new geofence
    Add {
        /// Geofence name
        name: String,

        /// Center latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Center longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Radius in meters
        #[arg(long)]
        radius: u32,
    },

    /// Update a geofence
    Update {
        /// Geofence id
        id: i64,

        /// Geofence name
        #[arg(long)]
        name: String,

        /// Center latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Center longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Radius in meters
        #[arg(long)]
        radius: u32,
    },

    /// Delete a geofence
    #[command(alias = "delete")]
    Rm {
        /// Geofence id
        id: i64,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
