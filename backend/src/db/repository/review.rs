//! Repository trait for reviews and their evaluation counters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::{EventId, Review, ReviewDraft, ReviewId};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Store a review for an event.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the event doesn't exist
    async fn insert_review(
        &self,
        event_id: EventId,
        draft: &ReviewDraft,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Review>;

    async fn get_review(&self, review_id: ReviewId) -> RepositoryResult<Review>;

    /// Reviews of one event ordered by ID.
    async fn list_reviews(&self, event_id: EventId) -> RepositoryResult<Vec<Review>>;

    async fn update_review_body(
        &self,
        review_id: ReviewId,
        body: &str,
        now: DateTime<Utc>,
    ) -> RepositoryResult<Review>;

    /// Apply `delta` to the evaluation count as a single atomic step.
    ///
    /// Concurrent callers never lose updates. A result below zero is rejected
    /// with `RepositoryError::ValidationError` and leaves the count unchanged.
    async fn adjust_evaluation(&self, review_id: ReviewId, delta: i32) -> RepositoryResult<Review>;
}
