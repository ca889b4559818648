// --- File: crates/booking_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{BookingError, HttpStatusCode};

/// `message` of every failed booking that reached credential loading or later.
pub const FAILURE_MESSAGE: &str = "Error creating event.";

/// `message` of a booking rejected by validation.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid booking request.";

/// JSON body of an error response.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    #[cfg_attr(feature = "openapi", schema(example = "Error creating event."))]
    pub message: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Extension trait for BookingError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for BookingError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match self {
            BookingError::ValidationError { .. } => INVALID_REQUEST_MESSAGE,
            _ => FAILURE_MESSAGE,
        };

        let body = Json(ErrorResponse {
            message: message.to_string(),
            field: self.field().map(str::to_string),
            error: self.detail().to_string(),
        });

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for BookingError to make it easier to use in Axum handlers.
impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
