// File: crates/booking_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use booking_common::ErrorResponse;
use utoipa::OpenApi;

use crate::logic::{BookingRequest, BookingSuccessResponse};

#[utoipa::path(
    options,
    path = "/schedule",
    responses(
        (status = 204, description = "Preflight accepted; CORS headers only, empty body")
    ),
    tag = "Booking"
)]
fn doc_preflight_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_booking_handler,
        doc_preflight_handler
    ),
    components(
        schemas(
            BookingRequest,
            BookingSuccessResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Booking", description = "Calendar booking with Google Meet link")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
