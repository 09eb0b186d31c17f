// Page shell: the single owner of session state. Composes the auth panel,
// the merged catalog, and the reservation form; children report back
// through explicit method calls, never through shared globals.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::api::{AuthApi, CatalogApi, ReservationsApi};
use crate::auth::{AuthPanel, AuthenticatedUser};
use crate::catalog::{self, CaravanView};
use crate::reservation::{ReservationForm, SubmitOutcome};

/// How long a reservation success notice stays visible.
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Top-level state for one session. Everything resets when the shell is
/// dropped; nothing is persisted.
pub struct AppShell {
    pub current_user: Option<AuthenticatedUser>,
    pub auth: AuthPanel,
    pub catalog: Vec<CaravanView>,
    pub loading: bool,
    pub error: Option<String>,
    booking: Option<ReservationForm>,
    notice: Option<(String, Instant)>,
    catalog_loaded: bool,
}

impl AppShell {
    pub fn new() -> Self {
        Self {
            current_user: None,
            auth: AuthPanel::new(),
            catalog: Vec::new(),
            loading: true,
            error: None,
            booking: None,
            notice: None,
            catalog_loaded: false,
        }
    }

    /// Fetches the backend catalog and merges it with the local dataset.
    /// Runs at most once per shell; the loading flag flips true -> false
    /// exactly once whether the fetch succeeds or fails. On failure the
    /// catalog stays empty and the shell's error message is set.
    pub async fn load_catalog(&mut self, catalog_api: &dyn CatalogApi) {
        if self.catalog_loaded {
            return;
        }
        self.catalog_loaded = true;
        match catalog_api.fetch_caravans().await {
            Ok(remote) => {
                self.catalog = catalog::merge_catalog(&catalog::local_catalog(), &remote);
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed");
                self.error = Some("Could not load the caravan catalog.".to_string());
            }
        }
        self.loading = false;
    }

    pub fn booking(&self) -> Option<&ReservationForm> {
        self.booking.as_ref()
    }

    pub fn booking_mut(&mut self) -> Option<&mut ReservationForm> {
        self.booking.as_mut()
    }

    /// Opens the reservation form for a listed unit, clearing any lingering
    /// success notice first. Returns false when the id matches nothing.
    pub fn book_now(&mut self, local_id: u32) -> bool {
        let Some(caravan) = self
            .catalog
            .iter()
            .find(|unit| unit.local_id == local_id)
            .cloned()
        else {
            return false;
        };
        self.notice = None;
        self.booking = Some(ReservationForm::open(caravan));
        true
    }

    /// Discards the draft without submitting anything.
    pub fn close_booking(&mut self) {
        self.booking = None;
    }

    /// Drives the open form through validation and submission. On success
    /// the form is discarded and a transient notice is posted; on rejection
    /// the form keeps its own alert and stays open.
    pub async fn submit_booking(&mut self, reservations: &dyn ReservationsApi) {
        let Some(form) = self.booking.as_mut() else {
            return;
        };
        match form.submit(reservations).await {
            SubmitOutcome::Confirmed {
                booker_name,
                caravan_name,
            } => {
                self.booking = None;
                self.notice = Some((
                    format!("Success! {booker_name}, your booking of {caravan_name} is confirmed."),
                    Instant::now(),
                ));
            }
            SubmitOutcome::Rejected => {}
        }
    }

    /// The transient success banner, if one is still within its display
    /// window at `now`.
    pub fn success_notice(&self, now: Instant) -> Option<&str> {
        self.notice.as_ref().and_then(|(text, posted)| {
            (now.duration_since(*posted) < SUCCESS_NOTICE_TTL).then_some(text.as_str())
        })
    }

    /// Runs a login or registration attempt through the auth panel and
    /// stores the resulting identity, if any.
    pub async fn submit_auth(&mut self, auth_api: &dyn AuthApi) {
        if let Some(user) = self.auth.submit(auth_api).await {
            self.current_user = Some(user);
        }
    }

    pub fn logout(&mut self) {
        self.current_user = None;
    }
}

impl Default for AppShell {
    fn default() -> Self {
        Self::new()
    }
}
