// ── Credential store ──
//
// Process-wide, explicitly-owned holder of the current session. Passed
// to the stores and controllers that need it -- no module-level global.
//
// Single-writer, multi-reader: only the AuthController (or the host app
// seeding a persisted session) writes; every store intent does a point
// read at call time. Reads always observe a value no older than the
// last completed write.

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

/// One signed-in session: the bearer token and the username it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub token: SecretString,
}

impl Session {
    pub fn new(username: impl Into<String>, token: SecretString) -> Self {
        Self {
            username: username.into(),
            token,
        }
    }

    /// A session with an empty token cannot authenticate anything.
    pub fn is_usable(&self) -> bool {
        !self.username.is_empty() && !self.token.expose_secret().is_empty()
    }
}

/// Shared holder of the current [`Session`], observable via `watch`.
#[derive(Debug)]
pub struct CredentialStore {
    slot: watch::Sender<Option<Session>>,
}

impl CredentialStore {
    /// An empty store: signed out.
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    /// A store seeded with a persisted session.
    pub fn with_session(session: Session) -> Self {
        let (slot, _) = watch::channel(Some(session));
        Self { slot }
    }

    /// Replace the current session.
    pub fn store(&self, session: Session) {
        self.slot.send_replace(Some(session));
    }

    /// Sign out: drop the current session.
    pub fn clear(&self) {
        self.slot.send_replace(None);
    }

    /// Point read of the latest session.
    pub fn current(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    pub fn username(&self) -> Option<String> {
        self.slot.borrow().as_ref().map(|s| s.username.clone())
    }

    pub fn token(&self) -> Option<SecretString> {
        self.slot.borrow().as_ref().map(|s| s.token.clone())
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.slot.subscribe()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
