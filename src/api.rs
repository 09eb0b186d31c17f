// HTTP gateway to the CaravanShare backend services.
// Each service is a separate trait so a workflow only depends on the calls
// it makes; `BackendClient` implements all of them over one reqwest client.
// Calls are independent: no retries, no cancellation, a failure surfaces
// straight to the workflow that issued the call.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::AuthenticatedUser;
use crate::catalog::RemoteCaravan;
use crate::reservation::NewReservation;

// Error types for the service boundary
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure: the request never produced an HTTP
    /// response.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status. `detail` is the
    /// body's `detail` field when present, else a per-endpoint fallback.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// A success response whose body could not be decoded.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Auth service: `POST /api/auth/login` and `POST /api/auth/register`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, ApiError>;

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, ApiError>;
}

/// Catalog service: `GET /api/caravans`, an ordered list of records.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn fetch_caravans(&self) -> Result<Vec<RemoteCaravan>, ApiError>;
}

/// Reservations service: `POST /api/reservations`. The success body is
/// implementation-defined and unused, so it is discarded.
#[async_trait]
pub trait ReservationsApi: Send + Sync {
    async fn create_reservation(&self, request: &NewReservation) -> Result<(), ApiError>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Failure for a non-success response: takes the body's `detail` message
/// when one is present, else the per-endpoint fallback.
fn rejection(status: u16, body: &str, fallback: &str) -> ApiError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string());
    ApiError::Rejected { status, detail }
}

/// Reqwest-backed implementation of the three service traits.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClientError::Config(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_for_user<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<AuthenticatedUser, ApiError> {
        debug!(path, "sending auth request");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "auth request rejected");
            return Err(rejection(status.as_u16(), &text, fallback));
        }
        serde_json::from_str(&text).map_err(|err| ApiError::InvalidBody(err.to_string()))
    }
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, ApiError> {
        self.post_for_user("/api/auth/login", &LoginBody { email, password }, "Login failed.")
            .await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, ApiError> {
        self.post_for_user(
            "/api/auth/register",
            &RegisterBody {
                name,
                email,
                password,
            },
            "Registration failed.",
        )
        .await
    }
}

#[async_trait]
impl CatalogApi for BackendClient {
    async fn fetch_caravans(&self) -> Result<Vec<RemoteCaravan>, ApiError> {
        debug!("fetching caravan catalog");
        let response = self
            .http
            .get(self.url("/api/caravans"))
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "catalog fetch rejected");
            return Err(rejection(
                status.as_u16(),
                &text,
                "Failed to fetch caravans.",
            ));
        }
        serde_json::from_str(&text).map_err(|err| ApiError::InvalidBody(err.to_string()))
    }
}

#[async_trait]
impl ReservationsApi for BackendClient {
    async fn create_reservation(&self, request: &NewReservation) -> Result<(), ApiError> {
        debug!(caravan_id = %request.caravan_id, "creating reservation");
        let response = self
            .http
            .post(self.url("/api/reservations"))
            .json(request)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            // nothing in the success body is used
            return Ok(());
        }
        let text = response
            .text()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        warn!(status = status.as_u16(), "reservation rejected");
        Err(rejection(
            status.as_u16(),
            &text,
            "Failed to create the reservation.",
        ))
    }
}
