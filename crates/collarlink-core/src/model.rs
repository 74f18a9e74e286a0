// ── Domain model ──
//
// Canonical entity types, decoupled from the wire structs in
// `collarlink-api`. Conversion lives in `convert.rs`.

use serde::Serialize;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// A tracking collar. Has at most one assigned pet at any time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    /// Server-assigned, immutable.
    pub id: i64,
    pub owner: String,
    /// Caller-supplied at creation, immutable thereafter.
    pub serial_number: i64,
    pub model: String,
    /// Server-authored; present only once the collar has reported.
    pub last_known_position: Option<Position>,
    /// Embedded summary of the assigned pet, if any.
    pub assigned_pet: Option<PetRef>,
}

/// Lightweight pet summary embedded in a [`Device`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PetRef {
    pub id: i64,
    pub name: String,
}

/// A pet. If `collar_id` references a device, that device's
/// `assigned_pet` should reference back -- kept coherent eventually via
/// reload, never transactionally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pet {
    pub id: i64,
    pub owner: String,
    /// `None` means unassigned; the wire layer normalizes the backend's
    /// legacy `0` sentinel before it gets here.
    pub collar_id: Option<i64>,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub age: u32,
}

/// A circular geofence. No client-side range validation on coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geofence {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters.
    pub radius: u32,
}
