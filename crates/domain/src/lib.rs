//! Domain layer for the nexus data plane.
//!
//! This crate provides the signal read-model entities:
//! - [`SignalEvent`] — the mutation event flowing through the log
//! - [`Signal`] — the materialized read-model entity served by the API
//! - [`Action`] and [`Priority`] — the event discriminator and the closed
//!   priority enum used for index scoring

pub mod event;
pub mod signal;

pub use event::{Action, EventParseError, SignalEvent};
pub use signal::{Priority, Signal, timestamp_score};
