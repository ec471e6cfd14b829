//! # Carehive API
//!
//! The API crate provides the web server for the Carehive shift scheduler.
//! It exposes the agency calendar, date selection helpers and the shift
//! actions (create, bulk create, confirm, cancel, copy) as JSON endpoints.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into scheduler operations
//! - **Middleware**: Acting user extraction and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! Shifts and agency data live in external services reached through the
//! traits of `carehive-service`.

/// Configuration module for API settings
pub mod config;
/// Request handlers that call into the scheduler
pub mod handlers;
/// Acting user extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use carehive_service::{
    http::{HttpAgencyDirectory, HttpShiftService, ServiceEndpoint},
    memory::{InMemoryDirectory, InMemoryShiftService},
    AgencyDirectory, ShiftService,
};
use config::{ApiConfig, Backend};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use carehive_api::ApiState;
/// use carehive_service::memory::{InMemoryDirectory, InMemoryShiftService};
///
/// let state = Arc::new(ApiState {
///     shifts: Arc::new(InMemoryShiftService::new()),
///     directory: Arc::new(InMemoryDirectory::with_admin("admin-1", "agency-1")),
/// });
/// let app = carehive_api::router(state);
/// ```
pub struct ApiState {
    /// Scheduling backend
    pub shifts: Arc<dyn ShiftService>,
    /// Agency people: caregivers, care recipients and user profiles
    pub directory: Arc<dyn AgencyDirectory>,
}

/// Builds the shared state for the configured backend.
pub fn build_state(config: &ApiConfig) -> Result<Arc<ApiState>> {
    let state = match &config.backend {
        Backend::Remote {
            shift_service_url,
            directory_url,
            api_key,
        } => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout))
                .build()
                .wrap_err("Failed to build HTTP client")?;

            info!("Using scheduling service at {}", shift_service_url);
            ApiState {
                shifts: Arc::new(HttpShiftService::new(
                    client.clone(),
                    ServiceEndpoint::new(shift_service_url.as_str(), api_key.clone()),
                )),
                directory: Arc::new(HttpAgencyDirectory::new(
                    client,
                    ServiceEndpoint::new(directory_url.as_str(), api_key.clone()),
                )),
            }
        }
        Backend::InMemory {
            admin_id,
            agency_id,
        } => {
            warn!(
                "Using the in-memory backend; admin {} manages agency {}",
                admin_id, agency_id
            );
            ApiState {
                shifts: Arc::new(InMemoryShiftService::new()),
                directory: Arc::new(InMemoryDirectory::with_admin(admin_id, agency_id)),
            }
        }
    };

    Ok(Arc::new(state))
}

/// Builds the application router with all routes attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Agency calendar
        .merge(routes::calendar::routes())
        // Date selection helpers
        .merge(routes::selection::routes())
        // Shift actions
        .merge(routes::shifts::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(middleware::actor::USER_ID_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and state
///
/// This function sets up logging, configures routes and layers, and serves
/// until the listener fails.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = carehive_api::config::ApiConfig::from_env()?;
/// let state = carehive_api::build_state(&config)?;
/// carehive_api::start_server(config, state).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
