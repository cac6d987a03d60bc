//! Consistency checks for a proposed event schedule.
//!
//! Administrators submit the six schedule instants as raw form values. Each
//! value is first classified as [`FieldValue::Unset`], [`FieldValue::Invalid`]
//! or [`FieldValue::Valid`]; every rule below pattern-matches on that
//! classification, so a field that failed to parse is reported once and then
//! ignored by all cross-field rules.
//!
//! Rules run in a fixed order and each contributes at most one violation:
//!
//! 1. format of each field
//! 2. start before end inside each window (event, posting, voting)
//! 3. the full chain `event_start < posting_start < posting_end < voting_start < voting_end < event_end`,
//!    only when all six fields are valid
//! 4. posting and voting windows do not overlap (half-open intervals)
//! 5. posting and voting windows lie inside the event window
//!
//! Problems are returned as data so the caller can report all of them at once.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EventSchedule, ScheduleField, ScheduleWindow};

/// Naive layouts accepted in addition to RFC 3339 (HTML `datetime-local` and friends).
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Order the full chain check walks through.
const CHAIN: [ScheduleField; 6] = [
    ScheduleField::EventStart,
    ScheduleField::PostingStart,
    ScheduleField::PostingEnd,
    ScheduleField::VotingStart,
    ScheduleField::VotingEnd,
    ScheduleField::EventEnd,
];

/// Classification of one submitted schedule field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Not submitted; every rule that needs it is skipped
    Unset,
    /// Submitted but not a recognizable timestamp
    Invalid(String),
    Valid(DateTime<Utc>),
}

impl FieldValue {
    /// Classify a raw form value.
    ///
    /// Blank input counts as unset. RFC 3339 timestamps keep their offset;
    /// naive `YYYY-MM-DDTHH:MM[:SS]` values are read as UTC.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            None | Some("") => return FieldValue::Unset,
            Some(raw) => raw,
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return FieldValue::Valid(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| FieldValue::Valid(naive.and_utc()))
            .unwrap_or_else(|| FieldValue::Invalid(raw.to_string()))
    }

    pub fn valid(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Valid(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldValue::Invalid(_))
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Unset, FieldValue::Valid)
    }
}

/// Schedule fields exactly as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventSchedule {
    pub event_start: Option<String>,
    pub event_end: Option<String>,
    pub posting_start: Option<String>,
    pub posting_end: Option<String>,
    pub voting_start: Option<String>,
    pub voting_end: Option<String>,
}

impl RawEventSchedule {
    pub fn get(&self, field: ScheduleField) -> Option<&str> {
        let value = match field {
            ScheduleField::EventStart => &self.event_start,
            ScheduleField::EventEnd => &self.event_end,
            ScheduleField::PostingStart => &self.posting_start,
            ScheduleField::PostingEnd => &self.posting_end,
            ScheduleField::VotingStart => &self.voting_start,
            ScheduleField::VotingEnd => &self.voting_end,
        };
        value.as_deref()
    }
}

/// Candidate schedule with every field classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialEventSchedule {
    pub event_start: FieldValue,
    pub event_end: FieldValue,
    pub posting_start: FieldValue,
    pub posting_end: FieldValue,
    pub voting_start: FieldValue,
    pub voting_end: FieldValue,
}

impl Default for PartialEventSchedule {
    fn default() -> Self {
        Self {
            event_start: FieldValue::Unset,
            event_end: FieldValue::Unset,
            posting_start: FieldValue::Unset,
            posting_end: FieldValue::Unset,
            voting_start: FieldValue::Unset,
            voting_end: FieldValue::Unset,
        }
    }
}

impl PartialEventSchedule {
    pub fn from_raw(raw: &RawEventSchedule) -> Self {
        let parse = |field: ScheduleField| FieldValue::parse(raw.get(field));
        Self {
            event_start: parse(ScheduleField::EventStart),
            event_end: parse(ScheduleField::EventEnd),
            posting_start: parse(ScheduleField::PostingStart),
            posting_end: parse(ScheduleField::PostingEnd),
            voting_start: parse(ScheduleField::VotingStart),
            voting_end: parse(ScheduleField::VotingEnd),
        }
    }

    pub fn get(&self, field: ScheduleField) -> &FieldValue {
        match field {
            ScheduleField::EventStart => &self.event_start,
            ScheduleField::EventEnd => &self.event_end,
            ScheduleField::PostingStart => &self.posting_start,
            ScheduleField::PostingEnd => &self.posting_end,
            ScheduleField::VotingStart => &self.voting_start,
            ScheduleField::VotingEnd => &self.voting_end,
        }
    }

    fn valid(&self, field: ScheduleField) -> Option<DateTime<Utc>> {
        self.get(field).valid()
    }

    fn valid_window(&self, window: ScheduleWindow) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.valid(window.start_field())?, self.valid(window.end_field())?))
    }

    /// Convert into a storable schedule, or `None` if any field is invalid.
    pub fn into_schedule(self) -> Option<EventSchedule> {
        let mut schedule = EventSchedule::default();
        for field in ScheduleField::ALL {
            match self.get(field) {
                FieldValue::Invalid(_) => return None,
                value => schedule.set(field, value.valid()),
            }
        }
        Some(schedule)
    }
}

impl From<&EventSchedule> for PartialEventSchedule {
    fn from(schedule: &EventSchedule) -> Self {
        Self {
            event_start: schedule.event_start.into(),
            event_end: schedule.event_end.into(),
            posting_start: schedule.posting_start.into(),
            posting_end: schedule.posting_end.into(),
            voting_start: schedule.voting_start.into(),
            voting_end: schedule.voting_end.into(),
        }
    }
}

/// One detected schedule inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleViolation {
    InvalidFormat(ScheduleField),
    /// A window's start is not strictly before its end
    WindowOrder(ScheduleWindow),
    /// Adjacent instants of the full chain are out of order
    ChainOrder {
        earlier: ScheduleField,
        later: ScheduleField,
    },
    PostingVotingOverlap,
    /// A phase window extends outside the event window
    OutsideEvent(ScheduleWindow),
}

impl std::fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleViolation::InvalidFormat(field) => {
                write!(f, "{}の形式が正しくありません", field.label())
            }
            ScheduleViolation::WindowOrder(window) => write!(
                f,
                "{w}開始日時は{w}終了日時より前に設定してください",
                w = window.label()
            ),
            ScheduleViolation::ChainOrder { earlier, later } => write!(
                f,
                "{}は{}より後に設定してください",
                later.label(),
                earlier.label()
            ),
            ScheduleViolation::PostingVotingOverlap => {
                f.write_str("投稿期間と投票期間が重複しています")
            }
            ScheduleViolation::OutsideEvent(window) => write!(
                f,
                "{}期間はイベント期間内に設定してください",
                window.label()
            ),
        }
    }
}

/// Check a candidate schedule.
///
/// Returns `None` when the schedule is consistent, otherwise every violation
/// in rule order.
pub fn validate_schedule(candidate: &PartialEventSchedule) -> Option<Vec<ScheduleViolation>> {
    let mut violations = Vec::new();

    for field in ScheduleField::ALL {
        if candidate.get(field).is_invalid() {
            violations.push(ScheduleViolation::InvalidFormat(field));
        }
    }

    for window in ScheduleWindow::ALL {
        if let Some((start, end)) = candidate.valid_window(window) {
            if start >= end {
                violations.push(ScheduleViolation::WindowOrder(window));
            }
        }
    }

    let chain: Option<Vec<DateTime<Utc>>> =
        CHAIN.iter().map(|field| candidate.valid(*field)).collect();
    if let Some(chain) = chain {
        for (i, pair) in chain.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                violations.push(ScheduleViolation::ChainOrder {
                    earlier: CHAIN[i],
                    later: CHAIN[i + 1],
                });
            }
        }
    }

    if let (Some((posting_start, posting_end)), Some((voting_start, voting_end))) = (
        candidate.valid_window(ScheduleWindow::Posting),
        candidate.valid_window(ScheduleWindow::Voting),
    ) {
        if posting_start < voting_end && voting_start < posting_end {
            violations.push(ScheduleViolation::PostingVotingOverlap);
        }
    }

    if let Some((event_start, event_end)) = candidate.valid_window(ScheduleWindow::Event) {
        for window in [ScheduleWindow::Posting, ScheduleWindow::Voting] {
            if let Some((start, end)) = candidate.valid_window(window) {
                if start < event_start || end > event_end {
                    violations.push(ScheduleViolation::OutsideEvent(window));
                }
            }
        }
    }

    if violations.is_empty() {
        None
    } else {
        log::debug!("schedule rejected with {} violation(s)", violations.len());
        Some(violations)
    }
}

/// Same as [`validate_schedule`], rendered as the messages shown to administrators.
pub fn validate_schedule_messages(candidate: &PartialEventSchedule) -> Option<Vec<String>> {
    validate_schedule(candidate).map(|violations| violations.iter().map(ToString::to_string).collect())
}
