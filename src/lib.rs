// Client library for the CaravanShare rental marketplace backend: catalog
// loading and merging, booking price computation, and the reservation and
// auth workflows, with a reqwest gateway to the HTTP/JSON services.

pub mod api;
pub mod app;
pub mod auth;
pub mod catalog;
pub mod pricing;
pub mod reservation;

// Re-export key types for convenience
pub use api::{
    ApiError, AuthApi, BackendClient, CatalogApi, ClientConfig, ClientError, ReservationsApi,
};
pub use app::{AppShell, SUCCESS_NOTICE_TTL};
pub use auth::{AuthMode, AuthPanel, AuthenticatedUser, Role};
pub use catalog::{local_catalog, merge_catalog, CaravanView, LocalCaravan, RemoteCaravan};
pub use pricing::{effective_daily_rate, inclusive_days, total_price};
pub use reservation::{FormPhase, NewReservation, ReservationForm, SubmitOutcome, MIN_LEAD_DAYS};
