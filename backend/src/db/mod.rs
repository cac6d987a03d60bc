//! Storage layer for events and reviews.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Service layer (crate::services) - phase gating, checks │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/) - abstract interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  LocalRepository (repositories/local.rs) - in-memory    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The repository is built once by [`RepositoryFactory`] and passed around
//! explicitly; there is no process-wide instance.

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, EventRepository, FullRepository, RepositoryError, RepositoryResult,
    ReviewRepository,
};
