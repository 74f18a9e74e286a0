//! Reactive session and entity-state layer between `collarlink-api` and
//! UI consumers.
//!
//! This crate owns the pieces with real invariants:
//!
//! - **[`CredentialStore`]** — process-wide holder of the bearer token and
//!   username. Single writer (the [`AuthController`] or the host app),
//!   many concurrent readers, subscribable via a `watch` channel.
//!
//! - **Entity stores** ([`DeviceStore`], [`PetStore`], [`GeofenceStore`]) —
//!   one published [`EntityState`] slot each. Every intent resolves the
//!   current credential, builds a fresh API client bound to that token,
//!   issues the call, and publishes the outcome. Successful mutations
//!   always re-fetch the owning collection (refresh-after-write) rather
//!   than patching it locally.
//!
//! - **[`AuthController`]** — sign-in/sign-up flow. Writes credentials
//!   into the [`CredentialStore`] *before* its `Success` state becomes
//!   observable.
//!
//! Intents never raise: every failure lands in the published state as a
//! `Failed`/`Error` variant carrying a rendered message.

pub mod auth;
pub mod config;
pub mod convert;
pub mod credentials;
pub mod error;
pub mod model;
pub mod state;
pub mod store;

pub use auth::{AuthController, AuthGrant, AuthState};
pub use config::{DEFAULT_BASE_URL, ServiceConfig};
pub use credentials::{CredentialStore, Session};
pub use error::CoreError;
pub use model::{Device, Geofence, Pet, PetRef, Position};
pub use state::{EntityState, MutationKind};
pub use store::{DeviceStore, GeofenceShape, GeofenceStore, PetDetails, PetStore};
