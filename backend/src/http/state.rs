//! Application state for the HTTP server.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for event and review storage
    pub repository: Arc<dyn FullRepository>,
    /// Source of "now" for phase computation
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new application state backed by the system clock.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: Arc<dyn FullRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}
