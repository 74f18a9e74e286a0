// ── Device (collar) store ──

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use collarlink_api::types::{AssignPetRequest, CreateCollarRequest};

use crate::config::ServiceConfig;
use crate::credentials::CredentialStore;
use crate::error::CoreError;
use crate::model::Device;
use crate::state::{EntityState, MutationKind};

use super::StoreContext;

/// Reactive store for the signed-in user's collars.
pub struct DeviceStore {
    ctx: StoreContext,
    state: watch::Sender<EntityState<Device>>,
}

impl DeviceStore {
    pub fn new(config: ServiceConfig, credentials: Arc<CredentialStore>) -> Self {
        let (state, _) = watch::channel(EntityState::Idle);
        Self {
            ctx: StoreContext {
                config,
                credentials,
            },
            state,
        }
    }

    /// Point read of the published state.
    pub fn state(&self) -> EntityState<Device> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes. Last-publish-wins: a slow observer
    /// sees the latest state, not every intermediate one.
    pub fn subscribe(&self) -> watch::Receiver<EntityState<Device>> {
        self.state.subscribe()
    }

    fn publish(&self, next: EntityState<Device>) {
        self.state.send_replace(next);
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Fetch all collars owned by the current user.
    pub async fn load(&self) {
        self.publish(EntityState::Loading);
        match self.fetch().await {
            Ok(devices) => {
                debug!(count = devices.len(), "collar load complete");
                self.publish(EntityState::Loaded(devices));
            }
            Err(err) => {
                warn!(error = %err, "collar load failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Register a new collar, then reload the collection so the visible
    /// list reflects server-computed fields.
    pub async fn create(&self, serial_number: i64, model: String) {
        self.publish(EntityState::Loading);
        match self.create_inner(serial_number, model).await {
            Ok(device) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Created,
                    entity: Some(device),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, "collar create failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Delete a collar. The reload after success is the only mechanism
    /// that removes it from the visible collection; a failed delete
    /// does not reload.
    pub async fn delete(&self, device_id: i64) {
        self.publish(EntityState::Loading);
        match self.delete_inner(device_id).await {
            Ok(()) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Deleted,
                    entity: None,
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, device_id, "collar delete failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Associate a pet with a collar, then reload the collar collection.
    ///
    /// Only this store's view refreshes: the pet side (`collar_id`) is
    /// a separate store with no shared transaction. A caller that needs
    /// both views coherent must reload the pet store as well.
    pub async fn assign_pet(&self, device_id: i64, pet_id: i64) {
        self.publish(EntityState::Loading);
        match self.assign_inner(device_id, pet_id).await {
            Ok(device) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Updated,
                    entity: Some(device),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, device_id, pet_id, "pet assignment failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    // ── Call helpers ─────────────────────────────────────────────────

    async fn fetch(&self) -> Result<Vec<Device>, CoreError> {
        let (client, username) = self.ctx.authed_client()?;
        let collars = client.collars_by_username(&username).await?;
        Ok(collars.into_iter().map(Device::from).collect())
    }

    async fn create_inner(&self, serial_number: i64, model: String) -> Result<Device, CoreError> {
        let (client, username) = self.ctx.authed_client()?;
        let collar = client
            .create_collar(&CreateCollarRequest {
                serial_number,
                model,
                username,
            })
            .await?;
        Ok(collar.into())
    }

    async fn delete_inner(&self, device_id: i64) -> Result<(), CoreError> {
        let (client, _) = self.ctx.authed_client()?;
        client.delete_collar(device_id).await?;
        Ok(())
    }

    async fn assign_inner(&self, device_id: i64, pet_id: i64) -> Result<Device, CoreError> {
        let (client, _) = self.ctx.authed_client()?;
        let collar = client
            .assign_pet(device_id, &AssignPetRequest { pet_id })
            .await?;
        Ok(collar.into())
    }
}
