//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. The current instant always comes from the clock in [`AppState`].

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    Json,
};
use tracing::{debug, info};

use super::dto::{
    EventListResponse, EventSubmission, EventWithPhase, HealthResponse, PhaseResponse,
    RawEventSchedule, Review, ReviewDraft, ReviewEditRequest, ReviewListResponse,
    ValidationResponse,
};
use super::error::AppError;
use super::extract::{ApiJson, ApiPath};
use super::state::AppState;
use crate::db::repository::EventRepository;
use crate::models::{EventId, ReviewId};
use crate::services::{events, reviews};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// Fallback for unmatched routes.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

// =============================================================================
// Events
// =============================================================================

/// GET /v1/events
pub async fn list_events(State(state): State<AppState>) -> HandlerResult<EventListResponse> {
    let events = events::list_events(state.repository.as_ref(), state.clock.now()).await?;
    let total = events.len();
    Ok(Json(EventListResponse { events, total }))
}

/// POST /v1/events
///
/// Create an event. An inconsistent schedule is answered with 422 and every
/// violation message.
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(submission): ApiJson<EventSubmission>,
) -> CreatedResult<EventWithPhase> {
    let now = state.clock.now();
    let event = events::create_event(state.repository.as_ref(), &submission, now).await?;
    info!(event_id = %event.id, "event created");
    Ok((StatusCode::CREATED, Json(EventWithPhase::at(event, now))))
}

/// GET /v1/events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
) -> HandlerResult<EventWithPhase> {
    let event =
        events::get_event(state.repository.as_ref(), EventId::new(event_id), state.clock.now())
            .await?;
    Ok(Json(event))
}

/// PUT /v1/events/{event_id}
///
/// Replace an event. Schedule fields left out of the body are cleared.
pub async fn update_event(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
    ApiJson(submission): ApiJson<EventSubmission>,
) -> HandlerResult<EventWithPhase> {
    let now = state.clock.now();
    let event = events::update_event(
        state.repository.as_ref(),
        EventId::new(event_id),
        &submission,
        now,
    )
    .await?;
    info!(event_id = %event.id, "event updated");
    Ok(Json(EventWithPhase::at(event, now)))
}

/// GET /v1/events/{event_id}/status
pub async fn get_event_status(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
) -> HandlerResult<PhaseResponse> {
    let event_id = EventId::new(event_id);
    let now = state.clock.now();
    let phase = events::event_phase(state.repository.as_ref(), event_id, now).await?;
    Ok(Json(PhaseResponse::new(event_id, phase, now)))
}

/// POST /v1/events/schedule/validate
///
/// Dry-run validation for the admin form. Always 200; problems are reported
/// in the body.
pub async fn validate_schedule(
    ApiJson(schedule): ApiJson<RawEventSchedule>,
) -> HandlerResult<ValidationResponse> {
    let response = ValidationResponse::from(events::check_schedule(&schedule));
    debug!(valid = response.valid, "schedule dry-run");
    Ok(Json(response))
}

// =============================================================================
// Reviews
// =============================================================================

/// GET /v1/events/{event_id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
) -> HandlerResult<ReviewListResponse> {
    let event_id = EventId::new(event_id);
    let reviews = reviews::list_reviews(state.repository.as_ref(), event_id).await?;
    let total = reviews.len();
    Ok(Json(ReviewListResponse {
        event_id,
        reviews,
        total,
    }))
}

/// POST /v1/events/{event_id}/reviews
///
/// Only accepted while the event is in its posting window.
pub async fn create_review(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
    ApiJson(draft): ApiJson<ReviewDraft>,
) -> CreatedResult<Review> {
    let review = reviews::create_review(
        state.repository.as_ref(),
        EventId::new(event_id),
        &draft,
        state.clock.now(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /v1/reviews/{review_id}
pub async fn edit_review(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<i64>,
    ApiJson(request): ApiJson<ReviewEditRequest>,
) -> HandlerResult<Review> {
    let review = reviews::edit_review(
        state.repository.as_ref(),
        ReviewId::new(review_id),
        &request.body,
        state.clock.now(),
    )
    .await?;
    Ok(Json(review))
}

/// POST /v1/reviews/{review_id}/evaluations
///
/// Only accepted while the event is in its voting window.
pub async fn add_evaluation(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<i64>,
) -> HandlerResult<Review> {
    let review = reviews::increment_evaluation(
        state.repository.as_ref(),
        ReviewId::new(review_id),
        state.clock.now(),
    )
    .await?;
    Ok(Json(review))
}

/// DELETE /v1/reviews/{review_id}/evaluations
pub async fn remove_evaluation(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<i64>,
) -> HandlerResult<Review> {
    let review = reviews::decrement_evaluation(
        state.repository.as_ref(),
        ReviewId::new(review_id),
        state.clock.now(),
    )
    .await?;
    Ok(Json(review))
}
