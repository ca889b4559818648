// --- File: crates/booking_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! The handler talks to the calendar through the [`CalendarService`] trait so tests can
//! substitute a stub for the real API.

use booking_common::BoxFuture;
use google_calendar3::api::Event;
use thiserror::Error;
use tracing::debug;

use crate::auth::{create_calendar_hub, ServiceCredentials, CALENDAR_SCOPE};
use crate::logic::BookingStage;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(google_calendar3::Error),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Authentication failed: {0}")]
    AuthError(String),
}

impl GcalServiceError {
    /// The underlying message, without the error kind prefix.
    pub fn message(&self) -> String {
        match self {
            GcalServiceError::ApiError(err) => err.to_string(),
            GcalServiceError::Transport(message) | GcalServiceError::AuthError(message) => {
                message.clone()
            }
        }
    }
}

impl From<google_calendar3::Error> for GcalServiceError {
    fn from(err: google_calendar3::Error) -> Self {
        match err {
            google_calendar3::Error::HttpError(e) => GcalServiceError::Transport(e.to_string()),
            google_calendar3::Error::Io(e) => GcalServiceError::Transport(e.to_string()),
            google_calendar3::Error::MissingToken(e) => GcalServiceError::AuthError(e.to_string()),
            other => GcalServiceError::ApiError(other),
        }
    }
}

/// Creates events in the calendar addressed by the credentials.
pub trait CalendarService: Send + Sync {
    /// Inserts `event` and returns the provider's stored representation,
    /// including any generated conference data.
    fn insert_event<'a>(
        &'a self,
        credentials: &'a ServiceCredentials,
        event: Event,
    ) -> BoxFuture<'a, Event, GcalServiceError>;
}

/// Google Calendar service implementation.
///
/// Holds no client: every call authenticates and connects afresh, so nothing is shared
/// between concurrent bookings.
#[derive(Debug, Default, Clone)]
pub struct GoogleCalendarService;

impl GoogleCalendarService {
    pub fn new() -> Self {
        Self
    }
}

impl CalendarService for GoogleCalendarService {
    /// Inserts the event with `conferenceDataVersion=1` so Google generates the Meet link.
    fn insert_event<'a>(
        &'a self,
        credentials: &'a ServiceCredentials,
        event: Event,
    ) -> BoxFuture<'a, Event, GcalServiceError> {
        Box::pin(async move {
            debug!(
                stage = %BookingStage::Authenticating,
                client_email = %credentials.client_email(),
                subject = ?credentials.subject(),
                "Building service account authenticator"
            );
            let hub = create_calendar_hub(credentials)
                .await
                .map_err(|e| GcalServiceError::AuthError(e.to_string()))?;

            debug!(
                stage = %BookingStage::Submitting,
                calendar_id = %credentials.calendar_id,
                "Inserting calendar event"
            );
            let mut call = hub
                .events()
                .insert(event, &credentials.calendar_id)
                .conference_data_version(1)
                .add_scope(CALENDAR_SCOPE);
            if let Some(mode) = credentials.send_updates.as_deref() {
                call = call.send_updates(mode);
            }

            let (_response, created_event) = call.doit().await?;
            Ok(created_event)
        })
    }
}
