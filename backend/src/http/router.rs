//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Event forms are small; anything larger is rejected before parsing.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS; the portal front end is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Events
        .route("/events", get(handlers::list_events).post(handlers::create_event))
        .route("/events/schedule/validate", post(handlers::validate_schedule))
        .route(
            "/events/{event_id}",
            get(handlers::get_event).put(handlers::update_event),
        )
        .route("/events/{event_id}/status", get(handlers::get_event_status))
        // Reviews
        .route(
            "/events/{event_id}/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        .route("/reviews/{review_id}", put(handlers::edit_review))
        .route(
            "/reviews/{review_id}/evaluations",
            post(handlers::add_evaluation).delete(handlers::remove_evaluation),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .fallback(handlers::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
