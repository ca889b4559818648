// File: crates/services/booking_backend/src/main.rs
use axum::{routing::get, Router};
use booking_common::logging;
use booking_config::{load_config, AppConfig};
use booking_gcal::routes as gcal_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const WELCOME_MESSAGE: &str = "Welcome to the booking API!";

/// Builds the full application: liveness route and booking endpoint under `/api`.
fn app(config: Arc<AppConfig>) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { WELCOME_MESSAGE }))
        .merge(gcal_routes::routes(config));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use booking_gcal::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        info!("Adding Swagger UI at /api/docs");
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", BookingApiDoc::openapi());
        app = app.merge(swagger_ui);
    }

    app.layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(err) => {
            logging::init();
            error!("Failed to load config: {}", err);
            return Err(err.into());
        }
    };
    logging::init_from_str(config.log_level.as_deref());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("Booking endpoint available at http://{}/api/schedule", addr);

    axum::serve(listener, app(config).into_make_service()).await?;
    Ok(())
}
