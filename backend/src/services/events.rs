//! Event creation and editing for the admin back-office.
//!
//! Every write runs the submitted schedule through
//! [`validate_schedule`](super::schedule_validation::validate_schedule) first;
//! an inconsistent schedule is rejected with all of its violations and the
//! repository is never touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{ServiceError, ServiceResult};
use super::event_status::{compute_status, EventPhase};
use super::schedule_validation::{
    validate_schedule, PartialEventSchedule, RawEventSchedule, ScheduleViolation,
};
use crate::db::repository::{EventRepository, FullRepository};
use crate::models::{Event, EventDraft, EventId};

/// Event form as submitted by an administrator. Schedule values are raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubmission {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: RawEventSchedule,
}

/// An event together with its phase at the time of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventWithPhase {
    #[serde(flatten)]
    pub event: Event,
    pub phase: EventPhase,
}

impl EventWithPhase {
    pub fn at(event: Event, now: DateTime<Utc>) -> Self {
        let phase = compute_status(&event.schedule, now);
        Self { event, phase }
    }
}

/// Dry-run the schedule checks on a raw submission.
pub fn check_schedule(raw: &RawEventSchedule) -> Option<Vec<ScheduleViolation>> {
    validate_schedule(&PartialEventSchedule::from_raw(raw))
}

fn prepare_draft(submission: &EventSubmission) -> ServiceResult<EventDraft> {
    let title = submission.title.trim();
    if title.is_empty() {
        return Err(ServiceError::InvalidInput("Event title must not be empty".to_string()));
    }

    let candidate = PartialEventSchedule::from_raw(&submission.schedule);
    if let Some(violations) = validate_schedule(&candidate) {
        return Err(ServiceError::InvalidSchedule(violations));
    }
    let schedule = candidate.into_schedule().ok_or_else(|| {
        ServiceError::InvalidInput("Schedule contains unparseable values".to_string())
    })?;

    Ok(EventDraft {
        title: title.to_string(),
        description: submission.description.clone(),
        schedule,
    })
}

pub async fn create_event<R: FullRepository + ?Sized>(
    repo: &R,
    submission: &EventSubmission,
    now: DateTime<Utc>,
) -> ServiceResult<Event> {
    let draft = prepare_draft(submission).inspect_err(|e| {
        log::warn!("Rejected new event {:?}: {}", submission.title, e);
    })?;
    let event = repo.insert_event(&draft, now).await?;
    log::info!("Created event {} ({})", event.id, event.title);
    Ok(event)
}

/// Replace an event. Schedule fields missing from the submission are cleared.
pub async fn update_event<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
    submission: &EventSubmission,
    now: DateTime<Utc>,
) -> ServiceResult<Event> {
    let draft = prepare_draft(submission).inspect_err(|e| {
        log::warn!("Rejected update of event {}: {}", event_id, e);
    })?;
    let event = repo.update_event(event_id, &draft, now).await?;
    log::info!("Updated event {}", event.id);
    Ok(event)
}

pub async fn get_event<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
    now: DateTime<Utc>,
) -> ServiceResult<EventWithPhase> {
    let event = repo.get_event(event_id).await?;
    Ok(EventWithPhase::at(event, now))
}

pub async fn list_events<R: FullRepository + ?Sized>(
    repo: &R,
    now: DateTime<Utc>,
) -> ServiceResult<Vec<EventWithPhase>> {
    let events = repo.list_events().await?;
    Ok(events
        .into_iter()
        .map(|event| EventWithPhase::at(event, now))
        .collect())
}

pub async fn event_phase<R: FullRepository + ?Sized>(
    repo: &R,
    event_id: EventId,
    now: DateTime<Utc>,
) -> ServiceResult<EventPhase> {
    let event = repo.get_event(event_id).await?;
    Ok(compute_status(&event.schedule, now))
}
