//! Core trait for materialized-view implementations.

use async_trait::async_trait;
use nexus_domain::{Action, Signal, SignalEvent};

use crate::Result;

/// A materialized view over the signal collection.
///
/// Implementations hold one primary record per signal plus two secondary
/// indexes: a chronological index scored by `created_at` as Unix seconds and
/// a priority index scored by the priority ordinal. All implementations must
/// be thread-safe (Send + Sync).
///
/// The view is effectively idempotent: replaying a `created`/`updated` event
/// leaves the same state, and evicting an absent id succeeds silently. This
/// is what lets the consumer upgrade at-least-once delivery to
/// effectively-once.
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Applies one event to the view, dispatching on its action.
    ///
    /// `created` and `updated` share the upsert path: an update for an
    /// absent id resurrects the record with whatever fields the event
    /// carries. Unknown actions succeed without touching the view.
    async fn apply(&self, event: &SignalEvent) -> Result<()> {
        match event.action {
            Action::Created | Action::Updated => self.upsert(event).await,
            Action::Deleted => self.evict(&event.id).await,
            Action::Unknown => Ok(()),
        }
    }

    /// Writes the primary record and both index entries in one atomic batch,
    /// overwriting any previous state for the id.
    async fn upsert(&self, event: &SignalEvent) -> Result<()>;

    /// Removes the primary record and both index entries in one atomic
    /// batch. Absent records succeed silently.
    async fn evict(&self, id: &str) -> Result<()>;

    /// Returns a single signal, or [`ProjectionError::NotFound`] when the
    /// primary record is empty.
    ///
    /// [`ProjectionError::NotFound`]: crate::ProjectionError::NotFound
    async fn find_by_id(&self, id: &str) -> Result<Signal>;

    /// Returns signals in the inclusive chronological index range
    /// `[start, stop]`, newest first.
    ///
    /// Ids whose primary record vanished between the index scan and
    /// hydration are dropped, so the result may be shorter than the
    /// requested span.
    async fn list_by_created_at(&self, start: isize, stop: isize) -> Result<Vec<Signal>>;

    /// Returns every signal whose priority ordinal equals the input's
    /// ordinal. Result order is not contractual.
    async fn list_by_priority(&self, priority: &str) -> Result<Vec<Signal>>;

    /// Cheap liveness probe against the underlying store.
    async fn health(&self) -> Result<()>;
}
