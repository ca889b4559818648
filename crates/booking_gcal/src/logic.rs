// --- File: crates/booking_gcal/src/logic.rs ---
use booking_common::{
    auth_error, config_error, external_service_error, validation_error, BookingError,
};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use google_calendar3::api::{
    ConferenceData, ConferenceSolutionKey, CreateConferenceRequest, Event, EventAttendee,
    EventDateTime,
};
use serde::{Deserialize, Serialize};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::auth::{CredentialsError, ServiceCredentials};
use crate::service::GcalServiceError;

pub const SUCCESS_MESSAGE: &str = "Booking successful!";

/// Conference solution requested for every booking (Google Meet).
pub const CONFERENCE_SOLUTION_TYPE: &str = "hangoutsMeet";

const SERVICE_NAME: &str = "Google Calendar";
const REDACTED: &str = "[redacted]";
const BEARER_REPLACEMENT: &str = "${1} [redacted]";

/// PEM armour, up to the matching END line or to the end of an unterminated block.
static PEM_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)-----BEGIN [^-]+-----(?:.*?-----END [^-]+-----|.*)")
        .expect("Invalid PEM regex")
});

/// `Bearer <token>` in any case, with any whitespace before the token.
static BEARER_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(bearer)\s+[^\s"',]+"#).expect("Invalid bearer token regex")
});

/// Naive forms accepted for `dateTime`, read in the configured time zone.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

// --- Data Structures ---

/// Booking details as posted by the scheduling page. Nothing here is trusted.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingRequest {
    /// Event start, RFC 3339 (or naive local time in the calendar's zone)
    #[cfg_attr(feature = "openapi", schema(example = "2025-03-01T10:00:00Z"))]
    pub date_time: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Ann"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "ann@example.com"))]
    pub email: Option<String>,
    /// Minutes; a JSON integer or a numeric string
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>, example = 30))]
    pub duration: Option<serde_json::Value>,
    #[cfg_attr(feature = "openapi", schema(example = "Consult"))]
    pub title: Option<String>,
}

/// A booking that passed validation; `end` is always `start + duration_minutes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    pub name: String,
    pub email: String,
    pub title: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingSuccessResponse {
    #[cfg_attr(feature = "openapi", schema(example = "Booking successful!"))]
    pub message: String,
    /// The event as stored by Google Calendar
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub event: serde_json::Value,
}

/// Progress of a single booking, used as a tracing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    Received,
    Authenticating,
    Submitting,
    Succeeded,
    Failed,
}

impl fmt::Display for BookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            BookingStage::Received => "received",
            BookingStage::Authenticating => "authenticating",
            BookingStage::Submitting => "submitting",
            BookingStage::Succeeded => "succeeded",
            BookingStage::Failed => "failed",
        };
        f.write_str(stage)
    }
}

// --- Validation ---

/// Parses the raw request body. Any JSON object is accepted; field checks happen in
/// [`validate_booking_request`].
pub fn parse_booking_request(body: &[u8]) -> Result<BookingRequest, BookingError> {
    serde_json::from_slice(body).map_err(|err| {
        validation_error(
            None,
            format!("request body must be a JSON booking object: {err}"),
        )
    })
}

/// Checks every field before anything is sent to the calendar.
pub fn validate_booking_request(
    request: BookingRequest,
    time_zone: Tz,
) -> Result<ValidatedBooking, BookingError> {
    let raw_start = required_text(request.date_time, "dateTime")?;
    let start = parse_start_time(&raw_start, time_zone).ok_or_else(|| {
        validation_error(
            Some("dateTime"),
            format!("dateTime '{raw_start}' is not a valid date and time"),
        )
    })?;

    let duration_minutes = parse_duration_minutes(request.duration.as_ref())?;
    let end = Duration::try_minutes(duration_minutes)
        .and_then(|duration| start.checked_add_signed(duration))
        .ok_or_else(|| validation_error(Some("duration"), "duration is too large"))?;

    Ok(ValidatedBooking {
        start,
        end,
        duration_minutes,
        name: required_text(request.name, "name")?,
        email: required_text(request.email, "email")?,
        title: required_text(request.title, "title")?,
    })
}

fn required_text(value: Option<String>, field: &str) -> Result<String, BookingError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| validation_error(Some(field), format!("{field} is required")))
}

/// RFC 3339 with offset, or a naive local time read in `time_zone`.
pub fn parse_start_time(raw: &str, time_zone: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        // A local time skipped by a DST change has no instant and is rejected.
        .and_then(|naive| time_zone.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

fn parse_duration_minutes(value: Option<&serde_json::Value>) -> Result<i64, BookingError> {
    use serde_json::Value;

    let invalid = || {
        validation_error(
            Some("duration"),
            "duration must be a whole number of minutes",
        )
    };

    let minutes = match value {
        None | Some(Value::Null) => {
            return Err(validation_error(Some("duration"), "duration is required"))
        }
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
            _ => return Err(invalid()),
        },
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };

    if minutes <= 0 {
        return Err(validation_error(
            Some("duration"),
            "duration must be a positive number of minutes",
        ));
    }
    Ok(minutes)
}

// --- Event Construction ---

/// A fresh conference request id. Random, so concurrent bookings never share one.
pub fn new_conference_request_id() -> String {
    format!("booking-{}", Uuid::new_v4())
}

/// Builds the Google Calendar event for a validated booking.
pub fn build_calendar_event(
    booking: &ValidatedBooking,
    time_zone: &str,
    conference_request_id: String,
) -> Event {
    Event {
        summary: Some(format!("{} with {}", booking.title, booking.name)),
        description: Some(format!(
            "Scheduled via your custom scheduling tool.\n\nAttendee Name: {}\nAttendee Email: {}",
            booking.name, booking.email
        )),
        start: Some(EventDateTime {
            date_time: Some(booking.start),
            time_zone: Some(time_zone.to_string()),
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(booking.end),
            time_zone: Some(time_zone.to_string()),
            ..Default::default()
        }),
        attendees: Some(vec![EventAttendee {
            email: Some(booking.email.clone()),
            ..Default::default()
        }]),
        conference_data: Some(ConferenceData {
            create_request: Some(CreateConferenceRequest {
                request_id: Some(conference_request_id),
                conference_solution_key: Some(ConferenceSolutionKey {
                    type_: Some(CONFERENCE_SOLUTION_TYPE.to_string()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// --- Error Mapping ---

impl From<CredentialsError> for BookingError {
    fn from(err: CredentialsError) -> Self {
        config_error(err)
    }
}

/// Converts a calendar failure into the relayed error, with secrets removed.
pub fn service_failure(err: &GcalServiceError, credentials: &ServiceCredentials) -> BookingError {
    let message = redact_secrets(&err.message(), Some(credentials));
    match err {
        GcalServiceError::AuthError(_) => auth_error(message),
        GcalServiceError::ApiError(_) | GcalServiceError::Transport(_) => {
            external_service_error(SERVICE_NAME, message)
        }
    }
}

/// Removes the private key, PEM blocks and bearer tokens from a message.
pub fn redact_secrets(message: &str, credentials: Option<&ServiceCredentials>) -> String {
    let mut text = message.to_string();
    if let Some(credentials) = credentials {
        let key = credentials.key.private_key.trim();
        if !key.is_empty() {
            text = text.replace(key, REDACTED);
            // Keys often show up JSON-escaped inside provider messages.
            text = text.replace(&key.replace('\n', "\\n"), REDACTED);
        }
    }
    strip_bearer_tokens(&strip_pem_blocks(&text))
}

fn strip_pem_blocks(text: &str) -> String {
    PEM_BLOCK_REGEX.replace_all(text, REDACTED).into_owned()
}

fn strip_bearer_tokens(text: &str) -> String {
    BEARER_TOKEN_REGEX
        .replace_all(text, BEARER_REPLACEMENT)
        .into_owned()
}
