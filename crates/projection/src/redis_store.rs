//! Redis-backed materialized view.

use std::collections::HashMap;

use async_trait::async_trait;
use nexus_domain::{Priority, Signal, SignalEvent};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use crate::Result;
use crate::error::ProjectionError;
use crate::store::SignalStore;

/// Chronological index: ids scored by `created_at` as Unix seconds.
const KEY_BY_CREATED_AT: &str = "signals:by_created_at";

/// Priority index: ids scored by priority ordinal.
const KEY_BY_PRIORITY: &str = "signals:by_priority";

fn signal_key(id: &str) -> String {
    format!("signal:{id}")
}

/// The production signal view, backed by Redis hashes and sorted sets.
///
/// Holds one multiplexed connection; clones share the same underlying
/// connection, so handler and consumer copies all reach the store through a
/// single pooled client.
#[derive(Clone)]
pub struct RedisSignalStore {
    conn: MultiplexedConnection,
}

impl RedisSignalStore {
    /// Connects to Redis at the given address (`host:port`).
    pub async fn connect(addr: &str) -> Result<Self> {
        let client = redis::Client::open(format!("redis://{addr}"))?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn })
    }

    /// Wraps an already-established multiplexed connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Pipelined batch hydration: one `HGETALL` per id in a single round
    /// trip, dropping ids whose record is empty.
    async fn fetch_many(&self, ids: &[String]) -> Result<Vec<Signal>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        for id in ids {
            pipe.hgetall(signal_key(id));
        }
        let rows: Vec<HashMap<String, String>> = pipe.query_async(&mut conn).await?;

        Ok(rows
            .iter()
            .filter(|data| !data.is_empty())
            .map(Signal::from_map)
            .collect())
    }
}

#[async_trait]
impl SignalStore for RedisSignalStore {
    #[tracing::instrument(skip(self, event), fields(id = %event.id))]
    async fn upsert(&self, event: &SignalEvent) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = redis::pipe()
            .atomic()
            .hset_multiple(signal_key(&event.id), &event.fields())
            .ignore()
            .zadd(KEY_BY_CREATED_AT, event.id.as_str(), event.created_at_score())
            .ignore()
            .zadd(KEY_BY_PRIORITY, event.id.as_str(), event.priority_score())
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn evict(&self, id: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = redis::pipe()
            .atomic()
            .del(signal_key(id))
            .ignore()
            .zrem(KEY_BY_CREATED_AT, id)
            .ignore()
            .zrem(KEY_BY_PRIORITY, id)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Signal> {
        let mut conn = self.conn.clone();
        let data: HashMap<String, String> = conn.hgetall(signal_key(id)).await?;
        if data.is_empty() {
            return Err(ProjectionError::NotFound);
        }
        Ok(Signal::from_map(&data))
    }

    async fn list_by_created_at(&self, start: isize, stop: isize) -> Result<Vec<Signal>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.zrevrange(KEY_BY_CREATED_AT, start, stop).await?;
        self.fetch_many(&ids).await
    }

    async fn list_by_priority(&self, priority: &str) -> Result<Vec<Signal>> {
        let score = Priority::score(priority);
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.zrangebyscore(KEY_BY_PRIORITY, score, score).await?;
        self.fetch_many(&ids).await
    }

    async fn health(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
