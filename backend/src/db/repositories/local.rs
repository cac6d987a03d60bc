//! In-memory local repository implementation.
//!
//! Stores events and reviews in `HashMap`s behind a single `parking_lot::RwLock`.
//! Suitable for unit tests and local development: fast, deterministic and
//! isolated per instance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::{Event, EventDraft, EventId, Review, ReviewDraft, ReviewId};
use crate::services::schedule_validation::{validate_schedule_messages, PartialEventSchedule};

/// In-memory local repository.
///
/// Cloning shares the underlying storage.
///
/// # Example
/// ```
/// use event_portal::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.event_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    events: HashMap<EventId, Event>,
    reviews: HashMap<ReviewId, Review>,

    // ID counters
    next_event_id: EventId,
    next_review_id: ReviewId,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            events: HashMap::new(),
            reviews: HashMap::new(),
            next_event_id: EventId(1),
            next_review_id: ReviewId(1),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-populated from a JSON file holding an array of
    /// [`EventDraft`]s. Every schedule goes through the same validation as an
    /// administrator submission; one inconsistent event rejects the whole file.
    pub fn from_seed_file<P: AsRef<Path>>(path: P, now: DateTime<Utc>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        let drafts: Vec<EventDraft> = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to parse seed file {}: {}",
                path.display(),
                e
            ))
        })?;

        for draft in &drafts {
            let candidate = PartialEventSchedule::from(&draft.schedule);
            if let Some(messages) = validate_schedule_messages(&candidate) {
                return Err(RepositoryError::configuration(format!(
                    "Seed event {:?} in {} has an invalid schedule: {}",
                    draft.title,
                    path.display(),
                    messages.join("; ")
                )));
            }
        }

        let repo = Self::new();
        for draft in &drafts {
            repo.insert_event_impl(draft, now);
        }
        log::info!("Seeded {} event(s) from {}", drafts.len(), path.display());
        Ok(repo)
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn event_count(&self) -> usize {
        self.data.read().events.len()
    }

    pub fn review_count(&self) -> usize {
        self.data.read().reviews.len()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Repository is not healthy"));
        }
        Ok(())
    }

    fn insert_event_impl(&self, draft: &EventDraft, now: DateTime<Utc>) -> Event {
        let mut data = self.data.write();
        let id = data.next_event_id;
        data.next_event_id = EventId(id.0 + 1);

        let event = Event {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            schedule: draft.schedule,
            created_at: now,
            updated_at: now,
        };
        data.events.insert(id, event.clone());
        event
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn event_not_found(event_id: EventId, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Event {} not found", event_id),
        ErrorContext::new(operation)
            .with_entity("event")
            .with_entity_id(event_id),
    )
}

fn review_not_found(review_id: ReviewId, operation: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Review {} not found", review_id),
        ErrorContext::new(operation)
            .with_entity("review")
            .with_entity_id(review_id),
    )
}

#[async_trait]
impl EventRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_event(&self, draft: &EventDraft, now: DateTime<Utc>) -> RepositoryResult<Event> {
        self.check_health()?;
        Ok(self.insert_event_impl(draft, now))
    }

    async fn get_event(&self, event_id: EventId) -> RepositoryResult<Event> {
        self.check_health()?;
        self.data
            .read()
            .events
            .get(&event_id)
            .cloned()
            .ok_or_else(|| event_not_found(event_id, "get_event"))
    }

    async fn list_events(&self) -> RepositoryResult<Vec<Event>> {
        self.check_health()?;
        let mut events: Vec<Event> = self.data.read().events.values().cloned().collect();
        events.sort_by_key(|e| e.id);
        Ok(events)
    }

    async fn update_event(
        &self,
        event_id: EventId,
        draft: &EventDraft,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Event> {
        self.check_health()?;
        let mut data = self.data.write();
        let event = data
            .events
            .get_mut(&event_id)
            .ok_or_else(|| event_not_found(event_id, "update_event"))?;

        event.title = draft.title.clone();
        event.description = draft.description.clone();
        event.schedule = draft.schedule;
        event.updated_at = now;
        Ok(event.clone())
    }
}

#[async_trait]
impl ReviewRepository for LocalRepository {
    async fn insert_review(
        &self,
        event_id: EventId,
        draft: &ReviewDraft,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Review> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.events.contains_key(&event_id) {
            return Err(event_not_found(event_id, "insert_review"));
        }

        let id = data.next_review_id;
        data.next_review_id = ReviewId(id.0 + 1);
        let review = Review {
            id,
            event_id,
            author: draft.author.clone(),
            body: draft.body.clone(),
            evaluation_count: 0,
            created_at: now,
            updated_at: now,
        };
        data.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn get_review(&self, review_id: ReviewId) -> RepositoryResult<Review> {
        self.check_health()?;
        self.data
            .read()
            .reviews
            .get(&review_id)
            .cloned()
            .ok_or_else(|| review_not_found(review_id, "get_review"))
    }

    async fn list_reviews(&self, event_id: EventId) -> RepositoryResult<Vec<Review>> {
        self.check_health()?;
        let data = self.data.read();
        if !data.events.contains_key(&event_id) {
            return Err(event_not_found(event_id, "list_reviews"));
        }
        let mut reviews: Vec<Review> = data
            .reviews
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        reviews.sort_by_key(|r| r.id);
        Ok(reviews)
    }

    async fn update_review_body(
        &self,
        review_id: ReviewId,
        body: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Review> {
        self.check_health()?;
        let mut data = self.data.write();
        let review = data
            .reviews
            .get_mut(&review_id)
            .ok_or_else(|| review_not_found(review_id, "update_review_body"))?;
        review.body = body.to_string();
        review.updated_at = now;
        Ok(review.clone())
    }

    async fn adjust_evaluation(&self, review_id: ReviewId, delta: i32) -> RepositoryResult<Review> {
        self.check_health()?;
        let mut data = self.data.write();
        let review = data
            .reviews
            .get_mut(&review_id)
            .ok_or_else(|| review_not_found(review_id, "adjust_evaluation"))?;

        let next = i64::from(review.evaluation_count) + i64::from(delta);
        let next = u32::try_from(next).map_err(|_| {
            RepositoryError::validation_with_context(
                format!(
                    "Evaluation count of review {} cannot become {}",
                    review_id, next
                ),
                ErrorContext::new("adjust_evaluation")
                    .with_entity("review")
                    .with_entity_id(review_id),
            )
        })?;
        review.evaluation_count = next;
        Ok(review.clone())
    }
}
