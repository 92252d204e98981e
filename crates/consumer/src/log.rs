//! Core trait for event log clients.

use async_trait::async_trait;

use crate::Result;

/// A message pulled from the event log.
///
/// Partition and offset together identify the message for the commit that
/// follows a successful apply; the payload is the raw event bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub partition: i32,
    pub offset: i64,
    pub payload: Vec<u8>,
}

/// A partitioned event log consumed by a single consumer-group member.
///
/// The client is expected to handle reconnection internally; `fetch` errors
/// are treated as transient by the consume loop.
#[async_trait]
pub trait EventLog: Send {
    /// Fetches the next message, blocking until one arrives.
    async fn fetch(&mut self) -> Result<LogMessage>;

    /// Commits the message's offset so it is not redelivered after restart.
    async fn commit(&mut self, message: &LogMessage) -> Result<()>;
}
