// ── Geofence store ──

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use collarlink_api::types::{CreateGeofenceRequest, UpdateGeofenceRequest};

use crate::config::ServiceConfig;
use crate::credentials::CredentialStore;
use crate::error::CoreError;
use crate::model::Geofence;
use crate::state::{EntityState, MutationKind};

use super::StoreContext;

/// The caller-editable shape of a geofence, shared by create and update.
#[derive(Debug, Clone)]
pub struct GeofenceShape {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters.
    pub radius: u32,
}

/// Reactive store for the signed-in user's geofences.
pub struct GeofenceStore {
    ctx: StoreContext,
    state: watch::Sender<EntityState<Geofence>>,
}

impl GeofenceStore {
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

    pub fn state(&self) -> EntityState<Geofence> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EntityState<Geofence>> {
        self.state.subscribe()
    }

    fn publish(&self, next: EntityState<Geofence>) {
        self.state.send_replace(next);
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Fetch all geofences owned by the current user.
    pub async fn load(&self) {
        self.publish(EntityState::Loading);
        match self.fetch().await {
            Ok(fences) => {
                debug!(count = fences.len(), "geofence load complete");
                self.publish(EntityState::Loaded(fences));
            }
            Err(err) => {
                warn!(error = %err, "geofence load failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Create a geofence, then reload the collection.
    pub async fn create(&self, shape: GeofenceShape) {
        self.publish(EntityState::Loading);
        match self.create_inner(shape).await {
            Ok(fence) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Created,
                    entity: Some(fence),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, "geofence create failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Update a geofence, then reload the collection.
    pub async fn update(&self, geofence_id: i64, shape: GeofenceShape) {
        self.publish(EntityState::Loading);
        match self.update_inner(geofence_id, shape).await {
            Ok(fence) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Updated,
                    entity: Some(fence),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, geofence_id, "geofence update failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Delete a geofence (empty response body), then reload.
    pub async fn delete(&self, geofence_id: i64) {
        self.publish(EntityState::Loading);
        match self.delete_inner(geofence_id).await {
            Ok(()) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Deleted,
                    entity: None,
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, geofence_id, "geofence delete failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    // ── Call helpers ─────────────────────────────────────────────────

    async fn fetch(&self) -> Result<Vec<Geofence>, CoreError> {
        let (client, username) = self.ctx.authed_client()?;
        let fences = client.geofences_by_username(&username).await?;
        Ok(fences.into_iter().map(Geofence::from).collect())
    }

    async fn create_inner(&self, shape: GeofenceShape) -> Result<Geofence, CoreError> {
        let (client, username) = self.ctx.authed_client()?;
        let fence = client
            .create_geofence(&CreateGeofenceRequest {
                name: shape.name,
                latitude: shape.latitude,
                longitude: shape.longitude,
                radius: shape.radius,
                username,
            })
            .await?;
        Ok(fence.into())
    }

    async fn update_inner(
        &self,
        geofence_id: i64,
        shape: GeofenceShape,
    ) -> Result<Geofence, CoreError> {
        let (client, _) = self.ctx.authed_client()?;
        let fence = client
            .update_geofence(
                geofence_id,
                &UpdateGeofenceRequest {
                    name: shape.name,
                    latitude: shape.latitude,
                    longitude: shape.longitude,
                    radius: shape.radius,
                },
            )
            .await?;
        Ok(fence.into())
    }

    async fn delete_inner(&self, geofence_id: i64) -> Result<(), CoreError> {
        let (client, _) = self.ctx.authed_client()?;
        client.delete_geofence(geofence_id).await?;
        Ok(())
    }
}
