// ── Entity stores ──
//
// One store per entity domain, each owning a single published
// `EntityState` slot. All three follow the same intent protocol:
// publish `Loading`, resolve the session, build a client bound to the
// token read at call time, issue the call, publish the outcome.
// Successful mutations re-fetch the whole collection instead of
// patching it locally.

mod devices;
mod geofences;
mod pets;

pub use devices::DeviceStore;
pub use geofences::{GeofenceShape, GeofenceStore};
pub use pets::{PetDetails, PetStore};

use std::sync::Arc;

use collarlink_api::ApiClient;

use crate::config::ServiceConfig;
use crate::credentials::CredentialStore;
use crate::error::CoreError;

/// Shared plumbing behind every store: where the service lives and
/// where the session comes from.
pub(crate) struct StoreContext {
    pub(crate) config: ServiceConfig,
    pub(crate) credentials: Arc<CredentialStore>,
}

impl StoreContext {
    /// Resolve the current session and build a client bound to its
    /// token. Fails fast with [`CoreError::NotSignedIn`] before any
    /// call goes out -- an unusable session never reaches the wire.
    ///
    /// Clients are rebuilt per intent so the token is never stale
    /// relative to a concurrent sign-out/sign-in.
    pub(crate) fn authed_client(&self) -> Result<(ApiClient, String), CoreError> {
        let session = self
            .credentials
            .current()
            .filter(crate::credentials::Session::is_usable)
            .ok_or(CoreError::NotSignedIn)?;

        let client = ApiClient::new(
            self.config.base_url.as_str(),
            Some(&session.token),
            &self.config.transport,
        )?;

        Ok((client, session.username))
    }
}
