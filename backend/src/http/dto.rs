//! Data Transfer Objects for the HTTP API.
//!
//! Events, reviews and event submissions already derive
//! Serialize/Deserialize and are re-exported as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::{Event, EventId, Review, ReviewDraft, ReviewId};
pub use crate::services::events::{EventSubmission, EventWithPhase};
pub use crate::services::schedule_validation::RawEventSchedule;
use crate::services::{EventPhase, ScheduleViolation};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}

/// Event list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<EventWithPhase>,
    pub total: usize,
}

/// Review list response for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListResponse {
    pub event_id: EventId,
    pub reviews: Vec<Review>,
    pub total: usize,
}

/// Current phase of an event and the actions it permits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResponse {
    pub event_id: EventId,
    pub phase: EventPhase,
    pub allows_posting: bool,
    pub allows_voting: bool,
    /// Instant the phase was computed at
    pub evaluated_at: DateTime<Utc>,
}

impl PhaseResponse {
    pub fn new(event_id: EventId, phase: EventPhase, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            event_id,
            phase,
            allows_posting: phase.allows_posting(),
            allows_voting: phase.allows_voting(),
            evaluated_at,
        }
    }
}

/// Result of a dry-run schedule validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    /// Violation messages in rule order; empty when valid
    pub violations: Vec<String>,
}

impl From<Option<Vec<ScheduleViolation>>> for ValidationResponse {
    fn from(result: Option<Vec<ScheduleViolation>>) -> Self {
        match result {
            None => Self {
                valid: true,
                violations: Vec::new(),
            },
            Some(violations) => Self {
                valid: false,
                violations: violations.iter().map(ToString::to_string).collect(),
            },
        }
    }
}

/// Request body for editing a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEditRequest {
    pub body: String,
}
