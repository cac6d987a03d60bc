//! Event records and their six-instant schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, EventId);

/// One of the six configurable schedule instants of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleField {
    EventStart,
    EventEnd,
    PostingStart,
    PostingEnd,
    VotingStart,
    VotingEnd,
}

impl ScheduleField {
    /// All fields in form order (the order format violations are reported in).
    pub const ALL: [ScheduleField; 6] = [
        ScheduleField::EventStart,
        ScheduleField::EventEnd,
        ScheduleField::PostingStart,
        ScheduleField::PostingEnd,
        ScheduleField::VotingStart,
        ScheduleField::VotingEnd,
    ];

    /// Wire name used in request and response bodies.
    pub fn key(&self) -> &'static str {
        match self {
            ScheduleField::EventStart => "event_start",
            ScheduleField::EventEnd => "event_end",
            ScheduleField::PostingStart => "posting_start",
            ScheduleField::PostingEnd => "posting_end",
            ScheduleField::VotingStart => "voting_start",
            ScheduleField::VotingEnd => "voting_end",
        }
    }

    /// Label shown to administrators in violation messages.
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleField::EventStart => "イベント開始日時",
            ScheduleField::EventEnd => "イベント終了日時",
            ScheduleField::PostingStart => "投稿開始日時",
            ScheduleField::PostingEnd => "投稿終了日時",
            ScheduleField::VotingStart => "投票開始日時",
            ScheduleField::VotingEnd => "投票終了日時",
        }
    }
}

impl std::fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The three windows of an event: the outer event period and its two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleWindow {
    Event,
    Posting,
    Voting,
}

impl ScheduleWindow {
    pub const ALL: [ScheduleWindow; 3] = [
        ScheduleWindow::Event,
        ScheduleWindow::Posting,
        ScheduleWindow::Voting,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScheduleWindow::Event => "イベント",
            ScheduleWindow::Posting => "投稿",
            ScheduleWindow::Voting => "投票",
        }
    }

    pub fn start_field(&self) -> ScheduleField {
        match self {
            ScheduleWindow::Event => ScheduleField::EventStart,
            ScheduleWindow::Posting => ScheduleField::PostingStart,
            ScheduleWindow::Voting => ScheduleField::VotingStart,
        }
    }

    pub fn end_field(&self) -> ScheduleField {
        match self {
            ScheduleWindow::Event => ScheduleField::EventEnd,
            ScheduleWindow::Posting => ScheduleField::PostingEnd,
            ScheduleWindow::Voting => ScheduleField::VotingEnd,
        }
    }
}

/// Six independently optional instants describing when an event runs.
///
/// An absent instant means the corresponding boundary is not configured.
/// A fully configured, consistent schedule satisfies
/// `event_start < posting_start < posting_end < voting_start < voting_end < event_end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSchedule {
    #[serde(default)]
    pub event_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub event_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub posting_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub posting_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voting_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub voting_end: Option<DateTime<Utc>>,
}

impl EventSchedule {
    pub fn get(&self, field: ScheduleField) -> Option<DateTime<Utc>> {
        match field {
            ScheduleField::EventStart => self.event_start,
            ScheduleField::EventEnd => self.event_end,
            ScheduleField::PostingStart => self.posting_start,
            ScheduleField::PostingEnd => self.posting_end,
            ScheduleField::VotingStart => self.voting_start,
            ScheduleField::VotingEnd => self.voting_end,
        }
    }

    pub fn set(&mut self, field: ScheduleField, value: Option<DateTime<Utc>>) {
        let slot = match field {
            ScheduleField::EventStart => &mut self.event_start,
            ScheduleField::EventEnd => &mut self.event_end,
            ScheduleField::PostingStart => &mut self.posting_start,
            ScheduleField::PostingEnd => &mut self.posting_end,
            ScheduleField::VotingStart => &mut self.voting_start,
            ScheduleField::VotingEnd => &mut self.voting_end,
        };
        *slot = value;
    }

    /// Both bounds of a window, if both are configured.
    pub fn window(&self, window: ScheduleWindow) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.get(window.start_field())?, self.get(window.end_field())?))
    }

    /// True when no instant is configured.
    pub fn is_empty(&self) -> bool {
        ScheduleField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Stored event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub schedule: EventSchedule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event contents supplied when creating or replacing an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: EventSchedule,
}
