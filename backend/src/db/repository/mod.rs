//! Repository trait definitions for storage operations.
//!
//! - [`error`]: Error types for repository operations
//! - [`event`]: Event records and their schedules
//! - [`review`]: Reviews and evaluation counters
//!
//! Functions that need both capabilities take the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn gate<R: FullRepository + ?Sized>(repo: &R, review_id: ReviewId) -> RepositoryResult<()> {
//!     let review = repo.get_review(review_id).await?;
//!     let event = repo.get_event(review.event_id).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event;
pub mod review;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use event::EventRepository;
pub use review::ReviewRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: EventRepository + ReviewRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: EventRepository + ReviewRepository {}
