//! # Event Portal Backend
//!
//! Back end for a community event portal. Administrators schedule events with
//! three nested windows (the event itself, a posting window and a voting
//! window); participants post reviews during posting and vote on them during
//! voting.
//!
//! ## Architecture
//!
//! - [`models`]: Events, reviews and their schedules
//! - [`services`]: Phase computation, schedule validation and phase-gated actions
//! - [`db`]: Repository traits and the in-memory repository
//! - [`config`]: TOML and environment configuration
//! - [`clock`]: Injectable source of "now"
//! - [`http`]: Axum-based HTTP server and request handlers

// RepositoryError carries structured context
#![allow(clippy::result_large_err)]

pub mod clock;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
