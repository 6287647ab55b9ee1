//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the waitlist API, the health probe and the
//! cross-cutting tower layers into the service `main` serves.

pub mod waitlist;

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use waitlist::{waitlist_router, WaitlistAppState};

/// Build the full application router.
pub fn app_router(
    state: WaitlistAppState,
    server: &ServerConfig,
    admin_routes_enabled: bool,
) -> Router {
    Router::new()
        .route("/health", get(waitlist::health))
        .nest("/api", waitlist_router(admin_routes_enabled))
        .with_state(state)
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
}

/// Allow the configured origins, or any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}
