//! Collar (device) command handlers.

use tabled::Tabled;

use collarlink_core::{Device, DeviceStore, PetStore};

use crate::cli::{DeviceArgs, DeviceCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{AppContext, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct DeviceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Serial")]
    serial: i64,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Pet")]
    pet: String,
    #[tabled(rename = "Last position")]
    position: String,
}

impl output::Listable for Device {
    type Row = DeviceRow;

    fn row(&self) -> DeviceRow {
        DeviceRow {
            id: self.id,
            serial: self.serial_number,
            model: self.model.clone(),
            pet: self
                .assigned_pet
                .as_ref()
                .map(|p| format!("{} (#{})", p.name, p.id))
                .unwrap_or_default(),
            position: self
                .last_known_position
                .map(|pos| format!("{:.5}, {:.5}", pos.latitude, pos.longitude))
                .unwrap_or_default(),
        }
    }

    fn id(&self) -> String {
        self.id.to_string()
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &AppContext,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = DeviceStore::new(ctx.service.clone(), ctx.credentials.clone());

    match args.command {
        DeviceCommand::List => {
            store.load().await;
            let devices = util::expect_loaded(store.state())?;
            print_devices(&devices, global);
            Ok(())
        }

        DeviceCommand::Add { serial, model } => {
            store.create(serial, model).await;
            util::expect_loaded(store.state())?;
            util::note("Collar registered", global.quiet);
            Ok(())
        }

        DeviceCommand::Rm { id } => {
            if !util::confirm(&format!("Delete collar {id}?"), global.yes)? {
                return Ok(());
            }
            store.delete(id).await;
            util::expect_loaded(store.state())?;
            util::note("Collar deleted", global.quiet);
            Ok(())
        }

        DeviceCommand::Assign { id, pet } => {
            store.assign_pet(id, pet).await;
            let devices = util::expect_loaded(store.state())?;

            // Refresh the pet side of the link too, so `pet list` run
            // right after reflects the new collar id.
            let pets = PetStore::new(ctx.service.clone(), ctx.credentials.clone());
            pets.load().await;
            util::expect_loaded(pets.state())?;

            util::note(&format!("Pet {pet} assigned to collar {id}"), global.quiet);
            print_devices(&devices, global);
            Ok(())
        }
    }
}

fn print_devices(devices: &[Device], global: &GlobalOpts) {
    let out = output::render_list(&global.output, devices);
    output::print_output(&out, global.quiet);
}
