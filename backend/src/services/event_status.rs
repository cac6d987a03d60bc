//! Phase derivation for an event schedule.
//!
//! Given the six configured instants of an event and the current instant, this
//! module classifies "now" into exactly one [`EventPhase`]. The posting and
//! voting windows are tested first because they are the only phases in which a
//! mutating action is allowed; every other instant uniformly denies mutation.
//!
//! Window bounds are inclusive on both ends, so an action submitted exactly at
//! `posting_end` is still accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EventSchedule, ScheduleWindow};

/// Temporal classification of an instant relative to an event schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPhase {
    /// Before the event (or its first phase) has started
    PreEvent,
    /// Inside the posting window; reviews may be created and edited
    Posting,
    /// Inside the voting window; evaluations may be cast and withdrawn
    Voting,
    /// At or after the end of the event
    Ended,
    /// Outside every named window; nothing may be mutated
    Gap,
}

impl EventPhase {
    pub fn allows_posting(&self) -> bool {
        matches!(self, EventPhase::Posting)
    }

    pub fn allows_voting(&self) -> bool {
        matches!(self, EventPhase::Voting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventPhase::PreEvent => "PRE_EVENT",
            EventPhase::Posting => "POSTING",
            EventPhase::Voting => "VOTING",
            EventPhase::Ended => "ENDED",
            EventPhase::Gap => "GAP",
        }
    }
}

impl std::fmt::Display for EventPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the phase of `schedule` at instant `now`.
///
/// Absent bounds disable the rule that needs them. Total over all inputs: an
/// empty schedule yields [`EventPhase::Gap`].
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use event_portal::models::EventSchedule;
/// use event_portal::services::event_status::{compute_status, EventPhase};
///
/// let schedule = EventSchedule {
///     posting_start: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
///     posting_end: Some(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()),
///     ..Default::default()
/// };
/// let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
/// assert_eq!(compute_status(&schedule, now), EventPhase::Posting);
/// ```
pub fn compute_status(schedule: &EventSchedule, now: DateTime<Utc>) -> EventPhase {
    let within = |window: ScheduleWindow| {
        schedule
            .window(window)
            .is_some_and(|(start, end)| start <= now && now <= end)
    };

    if within(ScheduleWindow::Posting) {
        return EventPhase::Posting;
    }
    if within(ScheduleWindow::Voting) {
        return EventPhase::Voting;
    }
    if schedule.event_end.is_some_and(|end| now >= end) {
        return EventPhase::Ended;
    }
    if schedule.event_start.is_some_and(|start| now < start) {
        return EventPhase::PreEvent;
    }
    EventPhase::Gap
}

/// Derive the phase of `schedule` at the current instant.
pub fn compute_status_now(schedule: &EventSchedule) -> EventPhase {
    compute_status(schedule, Utc::now())
}
