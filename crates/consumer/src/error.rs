//! Consumer error types.

use thiserror::Error;

/// Errors that can occur while talking to the event log.
#[derive(Debug, Error)]
pub enum ConsumerError {
    /// The Kafka client reported an error.
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}

/// Result type for event log operations.
pub type Result<T> = std::result::Result<T, ConsumerError>;
