// File: crates/booking_gcal/src/handlers.rs
use crate::auth::ServiceCredentials;
use crate::logic::{
    build_calendar_event, new_conference_request_id, parse_booking_request, service_failure,
    validate_booking_request, BookingStage, BookingSuccessResponse, SUCCESS_MESSAGE,
};
use crate::service::CalendarService;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json},
};
use booking_common::{log_error, BookingError};
use booking_config::AppConfig;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Methods the booking endpoint answers, as advertised in `Allow` and CORS headers.
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

// Shared state for the booking routes; both fields are read-only after startup.
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub calendar: Arc<dyn CalendarService>,
}

/// Creates a calendar event with a Meet link for the posted booking.
///
/// Credentials are built from the injected configuration on every call, so a broken
/// configuration fails each request with a 500 instead of taking the server down.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/schedule",
    request_body = crate::logic::BookingRequest,
    responses(
        (status = 200, description = "Event created", body = BookingSuccessResponse),
        (status = 400, description = "Invalid booking request", body = booking_common::ErrorResponse),
        (status = 405, description = "Method not allowed", body = String),
        (status = 500, description = "Configuration, authentication or calendar failure", body = booking_common::ErrorResponse)
    ),
    tag = "Booking"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    body: Bytes,
) -> Result<Json<BookingSuccessResponse>, BookingError> {
    debug!(stage = %BookingStage::Received, bytes = body.len(), "Booking request received");

    let credentials = ServiceCredentials::from_config(&state.config).map_err(|err| {
        log_error(&err, "Calendar credentials unavailable");
        BookingError::from(err)
    })?;

    let request = parse_booking_request(&body)?;
    let booking = validate_booking_request(request, credentials.time_zone).map_err(|err| {
        info!(field = ?err.field(), "Rejected booking request: {}", err);
        err
    })?;

    let event = build_calendar_event(
        &booking,
        credentials.time_zone_label(),
        new_conference_request_id(),
    );

    match state.calendar.insert_event(&credentials, event).await {
        Ok(created_event) => {
            info!(
                stage = %BookingStage::Succeeded,
                event_id = ?created_event.id,
                start = %booking.start,
                duration_minutes = booking.duration_minutes,
                "Calendar event created"
            );
            Ok(Json(BookingSuccessResponse {
                message: SUCCESS_MESSAGE.to_string(),
                event: serde_json::to_value(&created_event)?,
            }))
        }
        Err(err) => {
            let failure = service_failure(&err, &credentials);
            log_error(&failure, &format!("Error creating calendar event ({})", BookingStage::Failed));
            Err(failure)
        }
    }
}

/// Answers CORS preflight requests; the CORS headers come from the router layers.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Fallback for every method other than POST and OPTIONS.
pub async fn method_not_allowed_handler(method: Method) -> impl IntoResponse {
    warn!("Rejected {} request to booking endpoint", method);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
        format!("Method {} Not Allowed", method),
    )
}
