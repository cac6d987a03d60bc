//! Reviews posted to an event and their evaluation (vote) counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventId;

crate::define_id_type!(i64, ReviewId);

/// Stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub event_id: EventId,
    pub author: String,
    pub body: String,
    /// Number of votes the review has received during the voting phase
    pub evaluation_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review contents supplied by a poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub author: String,
    pub body: String,
}
