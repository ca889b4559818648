// --- File: crates/booking_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP error responses
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    auth_error, config_error, external_service_error, internal_error, validation_error,
    BookingError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    ErrorResponse, IntoHttpResponse, FAILURE_MESSAGE, INVALID_REQUEST_MESSAGE,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_str, init_with_level, log_error};

pub use services::BoxFuture;
