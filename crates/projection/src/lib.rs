//! Materialized signal view for the nexus data plane.
//!
//! This crate provides the query side of the signal store:
//! - [`SignalStore`] trait for applying events and serving read queries
//! - [`RedisSignalStore`] — the production view backed by Redis hashes and
//!   sorted sets
//! - [`InMemorySignalStore`] — same semantics, held in process memory, for
//!   tests
//!
//! The view keeps one primary record per signal plus two secondary indexes
//! (chronological and priority). Every write touches all three keys in a
//! single atomic batch so readers never observe a partially applied event.

pub mod error;
pub mod memory;
pub mod redis_store;
pub mod store;

pub use error::{ProjectionError, Result};
pub use memory::InMemorySignalStore;
pub use redis_store::RedisSignalStore;
pub use store::SignalStore;
