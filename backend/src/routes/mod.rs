//! Route definitions for the FitPlan API
//!
//! This module organizes all API routes and applies middleware.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method},
    routing::get,
    BoxError, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::time::Duration;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

mod admin;
mod auth;
mod feedback;
mod health;
mod plans;
mod records;
mod stats;
mod templates;
mod user;

#[cfg(test)]
mod auth_tests;

/// JSON body whose rejection renders as the API envelope
pub(crate) type JsonBody<T> = WithRejection<Json<T>, ApiError>;

/// Query string whose rejection renders as the API envelope
pub(crate) type QueryParams<T> = WithRejection<axum::extract::Query<T>, ApiError>;

/// Parse a path id, rejecting malformed values with 400
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("Invalid {} ID", entity)))
}

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(health::prometheus_metrics))
        .nest("/api", api_routes())
        .layer(CompressionLayer::new())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render middleware failures in the API envelope
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(anyhow::anyhow!("Unhandled middleware error: {}", err))
    }
}

/// Routes under `/api`
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::auth_routes())
        .nest("/user", user::user_routes())
        .nest("/templates", templates::template_routes())
        .nest("/admin", admin::admin_routes())
        .nest("/plans", plans::plan_routes())
        .nest("/training/records", records::record_routes())
        .nest("/stats", stats::stats_routes())
        .nest("/feedback", feedback::feedback_routes())
}
