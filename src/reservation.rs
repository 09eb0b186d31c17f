// Reservation workflow: the transient booking draft, its validation rules,
// and submission to the reservations service. The page shell owns the form
// while a booking target is set and discards it on close or success.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::api::{ApiError, ReservationsApi};
use crate::catalog::CaravanView;
use crate::pricing;

/// Minimum number of days between "now" and the earliest allowed start
/// date.
pub const MIN_LEAD_DAYS: i64 = 2;

/// Body of `POST /api/reservations`. Dates serialize as `YYYY-MM-DD`.
/// Not retained after submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReservation {
    pub caravan_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Whether the form is taking input or has a request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

/// Outcome of a submission attempt, for the shell to route.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend confirmed the booking; the form should be discarded and
    /// a success notice shown.
    Confirmed {
        booker_name: String,
        caravan_name: String,
    },
    /// Local validation or the backend rejected the attempt. The form stays
    /// open with its alert set and nothing cleared, so the user can correct
    /// and resubmit.
    Rejected,
}

/// Transient booking draft for one unit. Exists only while the booking
/// modal is open.
#[derive(Debug, Clone)]
pub struct ReservationForm {
    caravan: CaravanView,
    pub booker_name: String,
    pub guests: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub alert: Option<String>,
    phase: FormPhase,
}

impl ReservationForm {
    /// Opens a draft for `caravan`: guest count seeded to the unit's base
    /// guest count, dates empty.
    pub fn open(caravan: CaravanView) -> Self {
        Self {
            booker_name: String::new(),
            guests: caravan.base_guests,
            start_date: None,
            end_date: None,
            alert: None,
            phase: FormPhase::Editing,
            caravan,
        }
    }

    pub fn caravan(&self) -> &CaravanView {
        &self.caravan
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Earliest selectable start date: a fixed lead time after `today`.
    /// This bounds the date picker; submission does not re-check it.
    pub fn earliest_start(today: NaiveDate) -> NaiveDate {
        today + Duration::days(MIN_LEAD_DAYS)
    }

    /// Guest-count input coercion: floor of 1, ceiling at unit capacity.
    pub fn set_guests(&mut self, requested: u32) {
        self.guests = requested.clamp(1, self.caravan.max_guests.max(1));
    }

    /// Total for the draft as currently filled. Zero until a valid date
    /// range is picked; recomputed on every call, no side effects.
    pub fn total(&self) -> f64 {
        pricing::total_price(
            self.caravan.base_price,
            self.caravan.base_guests,
            self.caravan.extra_person_price,
            self.guests,
            self.start_date,
            self.end_date,
        )
    }

    /// Pre-flight validation, in a fixed order, stopping at the first
    /// failure. Returns the user-facing message for that failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.booker_name.trim().is_empty() {
            return Err("Please enter the booker's name.".to_string());
        }
        if self.start_date.is_none() {
            return Err("Please pick a start date.".to_string());
        }
        if self.end_date.is_none() {
            return Err("Please pick an end date.".to_string());
        }
        if self.guests == 0 {
            return Err("At least one guest is required.".to_string());
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err("The start date must not be after the end date.".to_string());
            }
        }
        if self.guests > self.caravan.max_guests {
            return Err(format!(
                "This caravan hosts at most {} guests.",
                self.caravan.max_guests
            ));
        }
        // a zero total means the date range never produced a price
        if self.total() <= 0.0 {
            return Err("Pick valid dates so a price can be computed.".to_string());
        }
        if self.caravan.remote_id.is_none() {
            return Err("This caravan cannot be booked right now.".to_string());
        }
        Ok(())
    }

    /// Validates the draft and, if it is sound, submits it to the
    /// reservations service. Validation failures never reach the network.
    pub async fn submit(&mut self, reservations: &dyn ReservationsApi) -> SubmitOutcome {
        self.alert = None;
        if let Err(message) = self.validate() {
            self.alert = Some(message);
            return SubmitOutcome::Rejected;
        }

        let (Some(start_date), Some(end_date), Some(caravan_id)) = (
            self.start_date,
            self.end_date,
            self.caravan.remote_id.clone(),
        ) else {
            // unreachable after validate(), but never worth panicking over
            self.alert = Some("This caravan cannot be booked right now.".to_string());
            return SubmitOutcome::Rejected;
        };

        let request = NewReservation {
            caravan_id,
            start_date,
            end_date,
        };

        self.phase = FormPhase::Submitting;
        match reservations.create_reservation(&request).await {
            Ok(()) => {
                info!(caravan = %self.caravan.name, "reservation confirmed");
                SubmitOutcome::Confirmed {
                    booker_name: self.booker_name.clone(),
                    caravan_name: self.caravan.name.clone(),
                }
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.alert = Some(failure_message(&err));
                SubmitOutcome::Rejected
            }
        }
    }
}

/// Service rejections carry their own message; transport failures render
/// as a generic one.
fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected { detail, .. } => detail.clone(),
        ApiError::Network(_) | ApiError::InvalidBody(_) => {
            "Something went wrong while processing the reservation.".to_string()
        }
    }
}
