// Hand-crafted async HTTP client for the CollarLink service.
//
// Base path: /api/v1/
// Auth: `Authorization: Bearer <token>` (attached by the transport factory)

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

/// Async client for the CollarLink REST API.
///
/// Stateless request/response mapping: one method per backend
/// capability, no retries, no local caches. Bound to a single token
/// value at construction -- intents that need a fresh token build a
/// fresh client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client bound to the given bearer token (or none).
    pub fn new(
        base_url: &str,
        token: Option<&SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL ending in `/api/v1/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api/v1") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v1/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"pet/username/alice"`) onto the base.
    fn url(&self, path: &str) -> Result<Url, Error> {
        // base_url always ends with `/api/v1/`, so joining works.
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete_with_response<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Uniform outcome mapping: 2xx with body, 2xx with an empty body
    /// (an error -- the caller expected a payload), or non-2xx.
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            if body.trim().is_empty() {
                return Err(Error::EmptyResponse);
            }
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })
        } else {
            Err(Self::status_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, resp).await)
        }
    }

    async fn status_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        Error::Status {
            status: status.as_u16(),
            body: (!raw.is_empty()).then_some(raw),
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Authentication ───────────────────────────────────────────────

    pub async fn sign_up(
        &self,
        username: &str,
        password: &SecretString,
        roles: &[String],
    ) -> Result<types::SignUpResponse, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
            password: &'a str,
            roles: &'a [String],
        }

        self.post(
            "authentication/sign-up",
            &Body {
                username,
                password: password.expose_secret(),
                roles,
            },
        )
        .await
    }

    pub async fn sign_in(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<types::SignInResponse, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
            password: &'a str,
        }

        self.post(
            "authentication/sign-in",
            &Body {
                username,
                password: password.expose_secret(),
            },
        )
        .await
    }

    // ── Pets ─────────────────────────────────────────────────────────

    pub async fn get_pet(&self, pet_id: i64) -> Result<types::Pet, Error> {
        self.get(&format!("pet/{pet_id}")).await
    }

    pub async fn update_pet(
        &self,
        pet_id: i64,
        req: &types::UpdatePetRequest,
    ) -> Result<types::Pet, Error> {
        self.put(&format!("pet/{pet_id}"), req).await
    }

    /// DELETE returns the deleted pet.
    pub async fn delete_pet(&self, pet_id: i64) -> Result<types::Pet, Error> {
        self.delete_with_response(&format!("pet/{pet_id}")).await
    }

    pub async fn update_pet_collar(
        &self,
        pet_id: i64,
        req: &types::UpdatePetCollarRequest,
    ) -> Result<types::Pet, Error> {
        self.put(&format!("pet/updatePetCollar/{pet_id}"), req).await
    }

    pub async fn create_pet(&self, req: &types::CreatePetRequest) -> Result<types::Pet, Error> {
        self.post("pet", req).await
    }

    pub async fn pets_by_username(&self, username: &str) -> Result<Vec<types::Pet>, Error> {
        self.get(&format!("pet/username/{username}")).await
    }

    pub async fn pet_by_collar(&self, collar_id: i64) -> Result<types::Pet, Error> {
        self.get(&format!("pet/collarId/{collar_id}")).await
    }

    // ── Geofences ────────────────────────────────────────────────────

    pub async fn get_geofence(&self, geofence_id: i64) -> Result<types::Geofence, Error> {
        self.get(&format!("geofence/{geofence_id}")).await
    }

    pub async fn update_geofence(
        &self,
        geofence_id: i64,
        req: &types::UpdateGeofenceRequest,
    ) -> Result<types::Geofence, Error> {
        self.put(&format!("geofence/{geofence_id}"), req).await
    }

    pub async fn delete_geofence(&self, geofence_id: i64) -> Result<(), Error> {
        self.delete(&format!("geofence/{geofence_id}")).await
    }

    pub async fn create_geofence(
        &self,
        req: &types::CreateGeofenceRequest,
    ) -> Result<types::Geofence, Error> {
        self.post("geofence", req).await
    }

    pub async fn geofences_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<types::Geofence>, Error> {
        self.get(&format!("geofence/username/{username}")).await
    }

    // ── Collars ──────────────────────────────────────────────────────

    pub async fn collars_by_username(&self, username: &str) -> Result<Vec<types::Collar>, Error> {
        self.get(&format!("collar/username/{username}")).await
    }

    pub async fn create_collar(
        &self,
        req: &types::CreateCollarRequest,
    ) -> Result<types::Collar, Error> {
        self.post("collar", req).await
    }

    pub async fn delete_collar(&self, collar_id: i64) -> Result<(), Error> {
        self.delete(&format!("collar/{collar_id}")).await
    }

    pub async fn assign_pet(
        &self,
        collar_id: i64,
        req: &types::AssignPetRequest,
    ) -> Result<types::Collar, Error> {
        self.put(&format!("collar/{collar_id}/pet"), req).await
    }
}
