//! Event log consumer for the nexus data plane.
//!
//! This crate drains the signal topic and drives the materialized view:
//! - [`EventLog`] trait over the partitioned log (fetch / commit)
//! - [`KafkaEventLog`] — the production log client
//! - [`Consumer`] — the sequential consume loop with at-least-once apply
//!
//! Offsets are committed only after the view update succeeds (or the event
//! is declared poison), so a crash never skips an unapplied event; the
//! view's idempotence absorbs the resulting redeliveries.

pub mod consumer;
pub mod error;
pub mod kafka;
pub mod log;

pub use consumer::Consumer;
pub use error::{ConsumerError, Result};
pub use kafka::{GROUP_ID, KafkaEventLog, TOPIC};
pub use log::{EventLog, LogMessage};
