// --- File: crates/booking_gcal/src/routes.rs ---

use crate::handlers::{
    create_booking_handler, method_not_allowed_handler, preflight_handler, BookingState,
    ALLOWED_METHODS,
};
use crate::service::{CalendarService, GoogleCalendarService};
use axum::{
    http::{header, HeaderValue},
    routing::{post, MethodRouter},
    Router,
};
use booking_config::{AppConfig, DEFAULT_ALLOW_ORIGIN};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

/// Path of the booking endpoint, relative to where the router is mounted.
pub const SCHEDULE_PATH: &str = "/schedule";

/// Creates the booking router backed by the real Google Calendar API.
pub fn routes(config: Arc<AppConfig>) -> Router {
    routes_with_service(config, Arc::new(GoogleCalendarService::new()))
}

/// Creates the booking router with an explicit calendar service.
///
/// Every response, including preflight and 405 responses, carries the CORS headers.
pub fn routes_with_service(config: Arc<AppConfig>, calendar: Arc<dyn CalendarService>) -> Router {
    let allow_origin = HeaderValue::from_str(config.allow_origin()).unwrap_or_else(|_| {
        warn!(
            "Invalid cors.allow_origin '{}', falling back to '{}'",
            config.allow_origin(),
            DEFAULT_ALLOW_ORIGIN
        );
        HeaderValue::from_static(DEFAULT_ALLOW_ORIGIN)
    });

    let booking_state = Arc::new(BookingState { config, calendar });

    Router::new()
        .route(SCHEDULE_PATH, schedule_methods())
        .with_state(booking_state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            allow_origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

// POST creates, OPTIONS answers preflight, anything else is a 405.
fn schedule_methods() -> MethodRouter<Arc<BookingState>> {
    post(create_booking_handler)
        .options(preflight_handler)
        .fallback(method_not_allowed_handler)
}
