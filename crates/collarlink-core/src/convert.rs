// ── Wire → domain conversion ──

use collarlink_api::types;

use crate::model::{Device, Geofence, Pet, PetRef, Position};

impl From<types::Collar> for Device {
    fn from(c: types::Collar) -> Self {
        // A position needs both coordinates; a lone latitude (or
        // longitude) from the backend is treated as "never reported".
        let last_known_position = match (c.last_latitude, c.last_longitude) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Self {
            id: c.id,
            owner: c.username,
            serial_number: c.serial_number,
            model: c.model,
            last_known_position,
            assigned_pet: c.pet.map(|p| PetRef {
                id: p.id,
                name: p.name,
            }),
        }
    }
}

impl From<types::Pet> for Pet {
    fn from(p: types::Pet) -> Self {
        Self {
            id: p.id,
            owner: p.username,
            collar_id: p.collar_id,
            name: p.name,
            species: p.species,
            breed: p.breed,
            gender: p.gender,
            age: p.age,
        }
    }
}

impl From<types::Geofence> for Geofence {
    fn from(g: types::Geofence) -> Self {
        Self {
            id: g.id,
            owner: g.username,
            name: g.name,
            latitude: g.latitude,
            longitude: g.longitude,
            radius: g.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collar(last_latitude: Option<f64>, last_longitude: Option<f64>) -> types::Collar {
        types::Collar {
            id: 3,
            username: "alice".into(),
            serial_number: 12345,
            model: "CL-100".into(),
            last_latitude,
            last_longitude,
            pet: None,
        }
    }

    #[test]
    fn position_requires_both_coordinates() {
        assert!(Device::from(collar(None, None)).last_known_position.is_none());
        assert!(Device::from(collar(Some(19.4), None)).last_known_position.is_none());
        assert!(Device::from(collar(None, Some(-99.1))).last_known_position.is_none());

        let device = Device::from(collar(Some(19.4), Some(-99.1)));
        assert_eq!(
            device.last_known_position,
            Some(Position {
                latitude: 19.4,
                longitude: -99.1
            })
        );
    }

    #[test]
    fn embedded_pet_becomes_pet_ref() {
        let mut c = collar(None, None);
        c.pet = Some(types::CollarPet {
            id: 2,
            name: "Miau".into(),
        });

        let device = Device::from(c);
        assert_eq!(
            device.assigned_pet,
            Some(PetRef {
                id: 2,
                name: "Miau".into()
            })
        );
    }
}
