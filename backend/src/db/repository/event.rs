//! Repository trait for event records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::{Event, EventDraft, EventId};

/// Storage operations for events.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request handlers.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Check if the storage backend is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a new event and assign it an ID. `now` becomes both timestamps.
    async fn insert_event(&self, draft: &EventDraft, now: DateTime<Utc>) -> RepositoryResult<Event>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the event doesn't exist
    async fn get_event(&self, event_id: EventId) -> RepositoryResult<Event>;

    /// All events ordered by ID.
    async fn list_events(&self) -> RepositoryResult<Vec<Event>>;

    /// Replace title, description and schedule of an existing event.
    ///
    /// # Returns
    /// * `Ok(Event)` - The stored event with `updated_at` set to `now`
    /// * `Err(RepositoryError::NotFound)` - If the event doesn't exist
    async fn update_event(
        &self,
        event_id: EventId,
        draft: &EventDraft,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Event>;
}
