//! Errors raised by the service layer.

use crate::db::repository::RepositoryError;
use crate::services::event_status::EventPhase;
use crate::services::schedule_validation::ScheduleViolation;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The submitted schedule is inconsistent; nothing was stored.
    #[error("Invalid schedule: {} violation(s)", .0.len())]
    InvalidSchedule(Vec<ScheduleViolation>),

    /// The event is not in the phase the action requires.
    #[error("Action requires the {required} phase but the event is in {actual}")]
    PhaseClosed {
        required: EventPhase,
        actual: EventPhase,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Violation messages in rule order, for `InvalidSchedule`.
    pub fn violation_messages(&self) -> Vec<String> {
        match self {
            ServiceError::InvalidSchedule(violations) => {
                violations.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }
}
