// ── Pet store ──

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use collarlink_api::types::{CreatePetRequest, UpdatePetCollarRequest, UpdatePetRequest};

use crate::config::ServiceConfig;
use crate::credentials::CredentialStore;
use crate::error::CoreError;
use crate::model::Pet;
use crate::state::{EntityState, MutationKind};

use super::StoreContext;

/// The caller-editable fields of a pet, shared by create and update.
#[derive(Debug, Clone)]
pub struct PetDetails {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub age: u32,
}

/// Reactive store for the signed-in user's pets.
pub struct PetStore {
    ctx: StoreContext,
    state: watch::Sender<EntityState<Pet>>,
}

impl PetStore {
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

    pub fn state(&self) -> EntityState<Pet> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EntityState<Pet>> {
        self.state.subscribe()
    }

    fn publish(&self, next: EntityState<Pet>) {
        self.state.send_replace(next);
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Fetch all pets owned by the current user.
    pub async fn load(&self) {
        self.publish(EntityState::Loading);
        match self.fetch().await {
            Ok(pets) => {
                debug!(count = pets.len(), "pet load complete");
                self.publish(EntityState::Loaded(pets));
            }
            Err(err) => {
                warn!(error = %err, "pet load failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Register a new pet, optionally pre-linked to a collar, then
    /// reload the collection.
    pub async fn create(&self, details: PetDetails, collar_id: Option<i64>) {
        self.publish(EntityState::Loading);
        match self.create_inner(details, collar_id).await {
            Ok(pet) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Created,
                    entity: Some(pet),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, "pet create failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Update a pet's editable fields, then reload the collection.
    pub async fn update(&self, pet_id: i64, details: PetDetails) {
        self.publish(EntityState::Loading);
        match self.update_inner(pet_id, details).await {
            Ok(pet) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Updated,
                    entity: Some(pet),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, pet_id, "pet update failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Delete a pet, then reload the collection. The backend returns
    /// the deleted pet, which rides along in the `Mutated` state.
    pub async fn delete(&self, pet_id: i64) {
        self.publish(EntityState::Loading);
        match self.delete_inner(pet_id).await {
            Ok(pet) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Deleted,
                    entity: Some(pet),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, pet_id, "pet delete failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    /// Link (or with `None`, unlink) a pet's collar via the dedicated
    /// endpoint, then reload the pet collection.
    ///
    /// The device side (`assigned_pet`) refreshes only when the device
    /// store's own `load` runs -- no shared transaction between stores.
    pub async fn update_collar_link(&self, pet_id: i64, collar_id: Option<i64>) {
        self.publish(EntityState::Loading);
        match self.link_inner(pet_id, collar_id).await {
            Ok(pet) => {
                self.publish(EntityState::Mutated {
                    kind: MutationKind::Updated,
                    entity: Some(pet),
                });
                self.load().await;
            }
            Err(err) => {
                warn!(error = %err, pet_id, "collar link update failed");
                self.publish(EntityState::Failed(err.to_string()));
            }
        }
    }

    // ── Call helpers ─────────────────────────────────────────────────

    async fn fetch(&self) -> Result<Vec<Pet>, CoreError> {
        let (client, username) = self.ctx.authed_client()?;
        let pets = client.pets_by_username(&username).await?;
        Ok(pets.into_iter().map(Pet::from).collect())
    }

    async fn create_inner(
        &self,
        details: PetDetails,
        collar_id: Option<i64>,
    ) -> Result<Pet, CoreError> {
        let (client, username) = self.ctx.authed_client()?;
        let pet = client
            .create_pet(&CreatePetRequest {
                username,
                collar_id,
                name: details.name,
                species: details.species,
                breed: details.breed,
                gender: details.gender,
                age: details.age,
            })
            .await?;
        Ok(pet.into())
    }

    async fn update_inner(&self, pet_id: i64, details: PetDetails) -> Result<Pet, CoreError> {
        let (client, _) = self.ctx.authed_client()?;
        let pet = client
            .update_pet(
                pet_id,
                &UpdatePetRequest {
                    name: details.name,
                    species: details.species,
                    breed: details.breed,
                    gender: details.gender,
                    age: details.age,
                },
            )
            .await?;
        Ok(pet.into())
    }

    async fn delete_inner(&self, pet_id: i64) -> Result<Pet, CoreError> {
        let (client, _) = self.ctx.authed_client()?;
        let pet = client.delete_pet(pet_id).await?;
        Ok(pet.into())
    }

    async fn link_inner(&self, pet_id: i64, collar_id: Option<i64>) -> Result<Pet, CoreError> {
        let (client, _) = self.ctx.authed_client()?;
        let pet = client
            .update_pet_collar(pet_id, &UpdatePetCollarRequest { collar_id })
            .await?;
        Ok(pet.into())
    }
}
