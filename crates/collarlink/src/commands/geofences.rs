//! Geofence command handlers.

use tabled::Tabled;

use collarlink_core::{Geofence, GeofenceShape, GeofenceStore};

use crate::cli::{GeofenceArgs, GeofenceCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{AppContext, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct GeofenceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
    #[tabled(rename = "Radius (m)")]
    radius: u32,
}

impl output::Listable for Geofence {
    type Row = GeofenceRow;

    fn row(&self) -> GeofenceRow {
        GeofenceRow {
            id: self.id,
            name: self.name.clone(),
            latitude: format!("{:.5}", self.latitude),
            longitude: format!("{:.5}", self.longitude),
            radius: self.radius,
        }
    }

    fn id(&self) -> String {
        self.id.to_string()
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &AppContext,
    args: GeofenceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = GeofenceStore::new(ctx.service.clone(), ctx.credentials.clone());

    match args.command {
        GeofenceCommand::List => {
            store.load().await;
            let fences = util::expect_loaded(store.state())?;
            print_geofences(&fences, global);
            Ok(())
        }

        GeofenceCommand::Add {
            name,
            lat,
            lon,
            radius,
        } => {
            store
                .create(GeofenceShape {
                    name,
                    latitude: lat,
                    longitude: lon,
                    radius,
                })
                .await;
            util::expect_loaded(store.state())?;
            util::note("Geofence created", global.quiet);
            Ok(())
        }

        GeofenceCommand::Update {
            id,
            name,
            lat,
            lon,
            radius,
        } => {
            store
                .update(
                    id,
                    GeofenceShape {
                        name,
                        latitude: lat,
                        longitude: lon,
                        radius,
                    },
                )
                .await;
            util::expect_loaded(store.state())?;
            util::note("Geofence updated", global.quiet);
            Ok(())
        }

        GeofenceCommand::Rm { id } => {
            if !util::confirm(&format!("Delete geofence {id}?"), global.yes)? {
                return Ok(());
            }
            store.delete(id).await;
            util::expect_loaded(store.state())?;
            util::note("Geofence deleted", global.quiet);
            Ok(())
        }
    }
}

fn print_geofences(fences: &[Geofence], global: &GlobalOpts) {
    let out = output::render_list(&global.output, fences);
    output::print_output(&out, global.quiet);
}
