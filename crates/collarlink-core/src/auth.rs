// ── Auth controller ──
//
// Owns the sign-in/sign-up flow and its observable state. On a
// successful sign-in the credential store is written *before* the
// `Success` state is published, so any concurrent reader of the
// credential store sees the new session no later than observers see
// `Success`.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use collarlink_api::ApiClient;

use crate::config::ServiceConfig;
use crate::credentials::{CredentialStore, Session};
use crate::error::CoreError;

/// Role attached to every self-service registration.
const DEFAULT_ROLE: &str = "ROLE_USER";

/// Observable authentication state.
#[derive(Debug, Clone)]
pub enum AuthState {
    Initial,
    Loading,
    Success(AuthGrant),
    Error(String),
}

/// What a terminal [`AuthState::Success`] carries.
#[derive(Debug, Clone)]
pub enum AuthGrant {
    /// Fresh bearer token from sign-in. Also written to the credential
    /// store; observers should prefer reading it from there.
    Token(SecretString),
    /// Confirmation message from sign-up. The session stays signed out.
    Message(String),
}

/// Sign-in / sign-up flow controller.
///
/// The source of truth for "am I signed in" is always the
/// [`CredentialStore`], never this controller's transient state.
pub struct AuthController {
    config: ServiceConfig,
    credentials: Arc<CredentialStore>,
    state: watch::Sender<AuthState>,
}

impl AuthController {
    pub fn new(config: ServiceConfig, credentials: Arc<CredentialStore>) -> Self {
        let (state, _) = watch::channel(AuthState::Initial);
        Self {
            config,
            credentials,
            state,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn publish(&self, next: AuthState) {
        self.state.send_replace(next);
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Authenticate and store the resulting session.
    pub async fn sign_in(&self, username: &str, password: &SecretString) {
        self.publish(AuthState::Loading);
        match self.sign_in_inner(username, password).await {
            Ok(token) => {
                debug!(username, "sign-in successful");
                self.publish(AuthState::Success(AuthGrant::Token(token)));
            }
            Err(err) => {
                warn!(username, error = %err, "sign-in failed");
                self.publish(AuthState::Error(err.to_string()));
            }
        }
    }

    /// Register a new account. Does NOT authenticate the session --
    /// the credential store is untouched; sign in afterwards.
    pub async fn sign_up(&self, username: &str, password: &SecretString) {
        self.publish(AuthState::Loading);
        match self.sign_up_inner(username, password).await {
            Ok(registered) => {
                debug!(username = registered, "sign-up successful");
                self.publish(AuthState::Success(AuthGrant::Message(format!(
                    "account '{registered}' registered"
                ))));
            }
            Err(err) => {
                warn!(username, error = %err, "sign-up failed");
                self.publish(AuthState::Error(err.to_string()));
            }
        }
    }

    /// Point read of the credential store's token.
    pub fn current_token(&self) -> Option<SecretString> {
        self.credentials.token()
    }

    /// Point read of the credential store's username.
    pub fn current_username(&self) -> Option<String> {
        self.credentials.username()
    }

    // ── Call helpers ─────────────────────────────────────────────────

    fn anonymous_client(&self) -> Result<ApiClient, CoreError> {
        Ok(ApiClient::new(
            self.config.base_url.as_str(),
            None,
            &self.config.transport,
        )?)
    }

    async fn sign_in_inner(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<SecretString, CoreError> {
        let client = self.anonymous_client()?;
        let resp = client.sign_in(username, password).await?;
        let token = SecretString::from(resp.token);

        // Persist before Success becomes observable.
        self.credentials
            .store(Session::new(resp.username, token.clone()));

        Ok(token)
    }

    async fn sign_up_inner(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<String, CoreError> {
        let client = self.anonymous_client()?;
        let resp = client
            .sign_up(username, password, &[DEFAULT_ROLE.to_owned()])
            .await?;
        Ok(resp.username)
    }
}
