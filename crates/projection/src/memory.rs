//! In-memory materialized view for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nexus_domain::{Priority, Signal, SignalEvent};
use tokio::sync::RwLock;

use crate::Result;
use crate::error::ProjectionError;
use crate::store::SignalStore;

/// The three view keys, held together under one lock so every apply is
/// atomic the same way the Redis transaction is.
#[derive(Default)]
struct ViewState {
    records: HashMap<String, HashMap<String, String>>,
    by_created_at: HashMap<String, f64>,
    by_priority: HashMap<String, f64>,
}

/// In-memory signal view implementation for testing.
///
/// Provides the same interface and ordering semantics as the Redis
/// implementation, including reverse-lexicographic tie-breaking in the
/// chronological scan.
#[derive(Clone, Default)]
pub struct InMemorySignalStore {
    state: Arc<RwLock<ViewState>>,
}

impl InMemorySignalStore {
    /// Creates a new empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of signals in the primary record.
    pub async fn signal_count(&self) -> usize {
        self.state.read().await.records.len()
    }

    /// Clears the whole view.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.records.clear();
        state.by_created_at.clear();
        state.by_priority.clear();
    }
}

/// Normalizes a Redis-style inclusive range (negative indexes count from the
/// end) against a collection of `len` elements.
fn slice_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let mut start = if start < 0 { start + len } else { start };
    let mut stop = if stop < 0 { stop + len } else { stop };
    if start < 0 {
        start = 0;
    }
    if stop >= len {
        stop = len - 1;
    }
    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait]
impl SignalStore for InMemorySignalStore {
    async fn upsert(&self, event: &SignalEvent) -> Result<()> {
        let mut state = self.state.write().await;
        let fields = event
            .fields()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        state.records.insert(event.id.clone(), fields);
        state
            .by_created_at
            .insert(event.id.clone(), event.created_at_score());
        state
            .by_priority
            .insert(event.id.clone(), event.priority_score());
        Ok(())
    }

    async fn evict(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.records.remove(id);
        state.by_created_at.remove(id);
        state.by_priority.remove(id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Signal> {
        let state = self.state.read().await;
        match state.records.get(id) {
            Some(data) if !data.is_empty() => Ok(Signal::from_map(data)),
            _ => Err(ProjectionError::NotFound),
        }
    }

    async fn list_by_created_at(&self, start: isize, stop: isize) -> Result<Vec<Signal>> {
        let state = self.state.read().await;

        // ZREVRANGE order: score descending, ties broken by member in
        // reverse lexicographic order.
        let mut entries: Vec<(&String, f64)> = state
            .by_created_at
            .iter()
            .map(|(id, score)| (id, *score))
            .collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(a.0))
        });

        let Some((start, stop)) = slice_range(entries.len(), start, stop) else {
            return Ok(Vec::new());
        };

        Ok(entries[start..=stop]
            .iter()
            .filter_map(|(id, _)| state.records.get(*id))
            .filter(|data| !data.is_empty())
            .map(Signal::from_map)
            .collect())
    }

    async fn list_by_priority(&self, priority: &str) -> Result<Vec<Signal>> {
        let target = Priority::score(priority);
        let state = self.state.read().await;

        let mut ids: Vec<&String> = state
            .by_priority
            .iter()
            .filter(|(_, score)| **score == target)
            .map(|(id, _)| id)
            .collect();
        ids.sort();

        Ok(ids
            .into_iter()
            .filter_map(|id| state.records.get(id))
            .filter(|data| !data.is_empty())
            .map(Signal::from_map)
            .collect())
    }

    async fn health(&self) -> Result<()> {
        Ok(())
    }
}
