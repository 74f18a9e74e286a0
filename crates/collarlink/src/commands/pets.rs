//! Pet command handlers.

use tabled::Tabled;

use collarlink_core::{DeviceStore, Pet, PetDetails, PetStore};

use crate::cli::{GlobalOpts, PetArgs, PetCommand};
use crate::error::CliError;
use crate::output;

use super::{AppContext, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct PetRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Breed")]
    breed: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Age")]
    age: u32,
    #[tabled(rename = "Collar")]
    collar: String,
}

impl output::Listable for Pet {
    type Row = PetRow;

    fn row(&self) -> PetRow {
        PetRow {
            id: self.id,
            name: self.name.clone(),
            species: self.species.clone(),
            breed: self.breed.clone(),
            gender: self.gender.clone(),
            age: self.age,
            collar: self.collar_id.map(|c| c.to_string()).unwrap_or_default(),
        }
    }

    fn id(&self) -> String {
        self.id.to_string()
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &AppContext, args: PetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store = PetStore::new(ctx.service.clone(), ctx.credentials.clone());

    match args.command {
        PetCommand::List => {
            store.load().await;
            let pets = util::expect_loaded(store.state())?;
            print_pets(&pets, global);
            Ok(())
        }

        PetCommand::Add {
            name,
            species,
            breed,
            gender,
            age,
            collar,
        } => {
            let details = PetDetails {
                name,
                species,
                breed,
                gender: gender.as_str().to_owned(),
                age,
            };
            store.create(details, collar).await;
            util::expect_loaded(store.state())?;
            util::note("Pet registered", global.quiet);
            Ok(())
        }

        PetCommand::Update {
            id,
            name,
            species,
            breed,
            gender,
            age,
        } => {
            let details = PetDetails {
                name,
                species,
                breed,
                gender: gender.as_str().to_owned(),
                age,
            };
            store.update(id, details).await;
            util::expect_loaded(store.state())?;
            util::note("Pet updated", global.quiet);
            Ok(())
        }

        PetCommand::Rm { id } => {
            if !util::confirm(&format!("Delete pet {id}?"), global.yes)? {
                return Ok(());
            }
            store.delete(id).await;
            util::expect_loaded(store.state())?;
            util::note("Pet deleted", global.quiet);
            Ok(())
        }

        PetCommand::SetCollar { id, collar } => {
            store.update_collar_link(id, collar).await;
            let pets = util::expect_loaded(store.state())?;

            // The collar side of the link only refreshes when the device
            // collection is re-fetched; sequence that here so both views
            // agree before the process exits.
            let devices = DeviceStore::new(ctx.service.clone(), ctx.credentials.clone());
            devices.load().await;
            util::expect_loaded(devices.state())?;

            match collar {
                Some(c) => util::note(&format!("Pet {id} linked to collar {c}"), global.quiet),
                None => util::note(&format!("Pet {id} unlinked"), global.quiet),
            }
            print_pets(&pets, global);
            Ok(())
        }
    }
}

fn print_pets(pets: &[Pet], global: &GlobalOpts) {
    let out = output::render_list(&global.output, pets);
    output::print_output(&out, global.quiet);
}
