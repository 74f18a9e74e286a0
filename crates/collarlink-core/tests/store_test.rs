// Store-boundary tests against a wiremock backend: refresh-after-write,
// failure short-circuit, fail-fast without a session, cross-store
// non-atomicity.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use collarlink_core::{
    CredentialStore, DeviceStore, EntityState, GeofenceShape, GeofenceStore, PetStore,
    ServiceConfig, Session,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn signed_in() -> Arc<CredentialStore> {
    Arc::new(CredentialStore::with_session(Session::new(
        "alice",
        SecretString::from("tok".to_owned()),
    )))
}

fn config(server: &MockServer) -> ServiceConfig {
    ServiceConfig::new(server.uri().parse().unwrap())
}

fn yard_fence() -> serde_json::Value {
    json!({
        "id": 7,
        "name": "Yard",
        "latitude": 19.4,
        "longitude": -99.1,
        "radius": 500,
        "username": "alice"
    })
}

// ── Refresh-after-write ─────────────────────────────────────────────

#[tokio::test]
async fn geofence_create_reloads_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/geofence"))
        .respond_with(ResponseTemplate::new(200).set_body_json(yard_fence()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/geofence/username/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([yard_fence()])))
        .expect(1)
        .mount(&server)
        .await;

    let store = GeofenceStore::new(config(&server), signed_in());
    store
        .create(GeofenceShape {
            name: "Yard".into(),
            latitude: 19.4,
            longitude: -99.1,
            radius: 500,
        })
        .await;

    let loaded = store.state();
    let fences = loaded.loaded().expect("terminal state should be Loaded");
    assert_eq!(fences.len(), 1);
    assert_eq!(fences[0].id, 7);
    assert_eq!(fences[0].name, "Yard");
    assert_eq!(fences[0].owner, "alice");
}

#[tokio::test]
async fn device_create_reflects_server_assigned_fields() {
    let server = MockServer::start().await;

    let collar = json!({
        "id": 3,
        "username": "alice",
        "serialNumber": 12345,
        "model": "CL-100"
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/collar"))
        .and(body_json(json!({
            "serialNumber": 12345,
            "model": "CL-100",
            "username": "alice"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&collar))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/collar/username/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([collar])))
        .mount(&server)
        .await;

    let store = DeviceStore::new(config(&server), signed_in());
    store.create(12345, "CL-100".into()).await;

    let state = store.state();
    let devices = state.loaded().expect("terminal state should be Loaded");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].id, 3);
    assert_eq!(devices[0].serial_number, 12345);
    assert!(devices[0].assigned_pet.is_none());
}

#[tokio::test]
async fn pet_delete_then_reload_shows_absence() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/pet/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "username": "alice", "collarId": null, "name": "Miau",
            "species": "cat", "breed": "siamese", "gender": "female", "age": 2
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pet/username/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = PetStore::new(config(&server), signed_in());
    store.delete(2).await;

    let state = store.state();
    assert_eq!(state.loaded().map(<[_]>::len), Some(0));
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn failed_device_delete_does_not_reload() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/collar/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    // A failed mutation must NOT trigger the refresh-after-write load.
    Mock::given(method("GET"))
        .and(path("/api/v1/collar/username/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let store = DeviceStore::new(config(&server), signed_in());
    store.delete(3).await;

    let state = store.state();
    let message = state.failure().expect("terminal state should be Failed");
    assert!(
        message.contains("500 - internal error"),
        "message was: {message}"
    );
}

#[tokio::test]
async fn load_without_session_fails_fast() {
    let server = MockServer::start().await;

    // No session: nothing may reach the wire.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let store = PetStore::new(config(&server), Arc::new(CredentialStore::new()));
    store.load().await;

    assert_eq!(store.state().failure(), Some("not signed in"));
}

#[tokio::test]
async fn connection_failure_surfaces_as_failed() {
    // Bind a port to learn a free address, then release it so nothing
    // is listening there.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let cfg = ServiceConfig::new(format!("http://{addr}").parse().unwrap());

    let store = GeofenceStore::new(cfg, signed_in());
    store.load().await;

    let state = store.state();
    let message = state.failure().expect("terminal state should be Failed");
    assert!(message.contains("connection"), "message was: {message}");
}

// ── Observability ───────────────────────────────────────────────────

#[tokio::test]
async fn loading_is_observable_while_request_in_flight() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/geofence/username/alice"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let store = Arc::new(GeofenceStore::new(config(&server), signed_in()));
    let mut rx = store.subscribe();
    assert_eq!(store.state(), EntityState::Idle);

    let task = {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.load().await })
    };

    // First publish is Loading, while the response is still delayed.
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_loading());

    task.await.unwrap();
    assert_eq!(store.state().loaded().map(<[_]>::len), Some(0));
}

// ── Cross-store consistency ─────────────────────────────────────────

#[tokio::test]
async fn collar_link_update_reloads_only_the_pet_store() {
    let server = MockServer::start().await;

    let linked_pet = json!({
        "id": 2, "username": "alice", "collarId": 9, "name": "Miau",
        "species": "cat", "breed": "siamese", "gender": "female", "age": 2
    });

    Mock::given(method("PUT"))
        .and(path("/api/v1/pet/updatePetCollar/2"))
        .and(body_json(json!({ "collarId": 9 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&linked_pet))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pet/username/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([linked_pet])))
        .expect(1)
        .mount(&server)
        .await;

    // The device collection is NOT refreshed by the pet-side intent.
    Mock::given(method("GET"))
        .and(path("/api/v1/collar/username/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let credentials = signed_in();
    let pets = PetStore::new(config(&server), Arc::clone(&credentials));
    let devices = DeviceStore::new(config(&server), credentials);

    pets.update_collar_link(2, Some(9)).await;

    let state = pets.state();
    let listed = state.loaded().expect("terminal state should be Loaded");
    assert_eq!(listed[0].collar_id, Some(9));

    // Device store never moved past construction.
    assert_eq!(devices.state(), EntityState::Idle);
}
