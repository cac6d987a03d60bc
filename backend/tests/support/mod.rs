#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use event_portal::models::{EventDraft, EventSchedule};
use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// 2024-01-01T00:00:00Z
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

/// Event Jan 1..31, posting Jan 2..10, voting Jan 12..20.
pub fn standard_schedule() -> EventSchedule {
    EventSchedule {
        event_start: Some(jan(1)),
        posting_start: Some(jan(2)),
        posting_end: Some(jan(10)),
        voting_start: Some(jan(12)),
        voting_end: Some(jan(20)),
        event_end: Some(jan(31)),
    }
}

pub fn standard_draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: String::new(),
        schedule: standard_schedule(),
    }
}

/// Instants falling in each phase of [`standard_schedule`].
pub fn during_posting() -> DateTime<Utc> {
    jan(5)
}

pub fn during_gap() -> DateTime<Utc> {
    jan(11)
}

pub fn during_voting() -> DateTime<Utc> {
    jan(15)
}

pub fn after_event() -> DateTime<Utc> {
    jan(31) + Duration::days(1)
}
