// --- File: crates/booking_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for the booking service.
///
/// Provider crates convert their own errors into this type at the handler boundary,
/// so every failure is rendered through the same HTTP mapping.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Missing or invalid configuration (credential blob, calendar id, time zone)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Signing or delegation rejected, or no token could be obtained
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The inbound booking request failed validation
    #[error("{message}")]
    ValidationError {
        field: Option<String>,
        message: String,
    },

    /// Network failure or provider-side rejection
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::ValidationError { .. } => 400,
            BookingError::ConfigError(_)
            | BookingError::AuthError(_)
            | BookingError::ExternalServiceError { .. }
            | BookingError::InternalError(_) => 500,
        }
    }
}

impl BookingError {
    /// Field the error refers to, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            BookingError::ValidationError { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// The message text without the category prefix; this is what callers see as `error`.
    pub fn detail(&self) -> &str {
        match self {
            BookingError::ConfigError(message)
            | BookingError::AuthError(message)
            | BookingError::InternalError(message)
            | BookingError::ValidationError { message, .. }
            | BookingError::ExternalServiceError { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        internal_error(err)
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> BookingError {
    BookingError::ConfigError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> BookingError {
    BookingError::AuthError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(field: Option<&str>, message: T) -> BookingError {
    BookingError::ValidationError {
        field: field.map(str::to_string),
        message: message.to_string(),
    }
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> BookingError {
    BookingError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> BookingError {
    BookingError::InternalError(message.to_string())
}
