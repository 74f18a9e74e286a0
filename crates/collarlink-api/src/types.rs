// Wire types for the CollarLink REST API (`/api/v1/`).
//
// All bodies are camelCase JSON. The `collarId` field carries a
// compatibility shim: the backend emits both `null` and the literal `0`
// for "no collar assigned" -- absence is canonical on this side of the
// boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ── Authentication ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub id: i64,
    pub username: String,
    pub token: String,
}

// ── Pets ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub username: String,
    #[serde(default, deserialize_with = "collar_id_compat")]
    pub collar_id: Option<i64>,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub age: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collar_id: Option<i64>,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub age: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub age: u32,
}

/// Body for `PUT pet/updatePetCollar/{petId}`.
///
/// The endpoint's `collarId` field is non-optional, so "unassign" is
/// expressed by serializing `None` as `0`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetCollarRequest {
    #[serde(serialize_with = "collar_id_or_zero")]
    pub collar_id: Option<i64>,
}

// ── Collars ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collar {
    pub id: i64,
    pub username: String,
    pub serial_number: i64,
    pub model: String,
    #[serde(default)]
    pub last_latitude: Option<f64>,
    #[serde(default)]
    pub last_longitude: Option<f64>,
    /// Embedded summary of the assigned pet, if any. Server-authored.
    #[serde(default)]
    pub pet: Option<CollarPet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollarPet {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollarRequest {
    pub serial_number: i64,
    pub model: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPetRequest {
    pub pet_id: i64,
}

// ── Geofences ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGeofenceRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGeofenceRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
}

// ── Sentinel shims ──────────────────────────────────────────────────

/// Deserialize `collarId`, mapping both `null` and `0` to `None`.
fn collar_id_compat<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id != 0))
}

/// Serialize an optional collar id, with `None` encoded as `0`.
fn collar_id_or_zero<S>(id: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(id.unwrap_or(0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn collar_id_zero_normalizes_to_none() {
        let pet: Pet = serde_json::from_str(
            r#"{"id":1,"username":"alice","collarId":0,"name":"Rex",
                "species":"dog","breed":"mutt","gender":"male","age":3}"#,
        )
        .unwrap();
        assert_eq!(pet.collar_id, None);
    }

    #[test]
    fn collar_id_null_and_absent_are_none() {
        let with_null: Pet = serde_json::from_str(
            r#"{"id":1,"username":"alice","collarId":null,"name":"Rex",
                "species":"dog","breed":"mutt","gender":"male","age":3}"#,
        )
        .unwrap();
        let absent: Pet = serde_json::from_str(
            r#"{"id":1,"username":"alice","name":"Rex",
                "species":"dog","breed":"mutt","gender":"male","age":3}"#,
        )
        .unwrap();
        assert_eq!(with_null.collar_id, None);
        assert_eq!(absent.collar_id, None);
    }

    #[test]
    fn collar_id_nonzero_survives() {
        let pet: Pet = serde_json::from_str(
            r#"{"id":1,"username":"alice","collarId":42,"name":"Rex",
                "species":"dog","breed":"mutt","gender":"male","age":3}"#,
        )
        .unwrap();
        assert_eq!(pet.collar_id, Some(42));
    }

    #[test]
    fn unassign_serializes_as_zero() {
        let body = serde_json::to_value(UpdatePetCollarRequest { collar_id: None }).unwrap();
        assert_eq!(body, serde_json::json!({ "collarId": 0 }));

        let body = serde_json::to_value(UpdatePetCollarRequest {
            collar_id: Some(7),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "collarId": 7 }));
    }

    #[test]
    fn create_pet_omits_absent_collar() {
        let body = serde_json::to_value(CreatePetRequest {
            username: "alice".into(),
            collar_id: None,
            name: "Rex".into(),
            species: "dog".into(),
            breed: "mutt".into(),
            gender: "male".into(),
            age: 3,
        })
        .unwrap();
        assert!(body.get("collarId").is_none());
    }
}
