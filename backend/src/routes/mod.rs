//! Route definitions for the AdaFit API
//!
//! This module organizes all API routes and applies middleware.

use crate::auth::require_session;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod nutrition;
mod profile;
mod today;
mod workout;

pub use auth::auth_routes;
pub use nutrition::nutrition_routes;
pub use profile::profile_routes;
pub use today::today_routes;
pub use workout::workout_routes;

/// Largest accepted request body; profiles and check-ins are a few KiB
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    // Must outlast the mocked agent delay
    let timeout = Duration::from_millis(state.config().agent.mock_delay_ms)
        + Duration::from_secs(state.config().agent.timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api", api_routes(state.clone()))
        // Apply middleware layers
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes; everything except auth needs a session
fn api_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(workout::workout_routes())
        .merge(today::today_routes())
        .nest("/profile", profile::profile_routes())
        .nest("/nutrition", nutrition::nutrition_routes())
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/", get(|| async { "AdaFit API" }))
        .nest("/auth", auth::auth_routes())
        .merge(protected)
}
