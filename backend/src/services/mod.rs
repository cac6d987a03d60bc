//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository. The two pure
//! rules live here as plain functions:
//!
//! - [`event_status::compute_status`] derives an event's phase from its schedule
//! - [`schedule_validation::validate_schedule`] checks an administrator's schedule
//!
//! [`events`] and [`reviews`] combine them with repository calls.

pub mod error;
pub mod event_status;
pub mod events;
pub mod reviews;
pub mod schedule_validation;

pub use error::{ServiceError, ServiceResult};
pub use event_status::{compute_status, compute_status_now, EventPhase};
pub use events::{EventSubmission, EventWithPhase};
pub use schedule_validation::{
    validate_schedule, validate_schedule_messages, FieldValue, PartialEventSchedule,
    RawEventSchedule, ScheduleViolation,
};
