//! Kafka-backed event log client.

use async_trait::async_trait;
use rdkafka::Message;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::topic_partition_list::{Offset, TopicPartitionList};

use crate::Result;
use crate::log::{EventLog, LogMessage};

/// Topic carrying signal mutation events.
pub const TOPIC: &str = "nexus.signals";

/// Consumer group for the data plane. One member per group: events are
/// applied in log order by a single sequential consumer.
pub const GROUP_ID: &str = "nexus-data-plane";

/// Event log client backed by a Kafka consumer group.
///
/// Auto-commit is disabled; offsets advance only through [`EventLog::commit`]
/// so the consume loop controls exactly when a message is considered
/// processed. New groups start from the earliest offset, which is also how a
/// view rebuild replays history after the keys are cleared.
pub struct KafkaEventLog {
    consumer: StreamConsumer,
    topic: String,
}

impl KafkaEventLog {
    /// Creates a consumer subscribed to the signal topic.
    pub fn connect(brokers: &str, topic: &str, group: &str) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group)
            .set("auto.offset.reset", "earliest")
            .set("enable.auto.commit", "false")
            .create()?;
        consumer.subscribe(&[topic])?;
        Ok(Self {
            consumer,
            topic: topic.to_string(),
        })
    }
}

#[async_trait]
impl EventLog for KafkaEventLog {
    async fn fetch(&mut self) -> Result<LogMessage> {
        let message = self.consumer.recv().await?;
        Ok(LogMessage {
            partition: message.partition(),
            offset: message.offset(),
            payload: message.payload().unwrap_or_default().to_vec(),
        })
    }

    async fn commit(&mut self, message: &LogMessage) -> Result<()> {
        // Kafka commits point at the next offset to read, not the one
        // just processed.
        let mut offsets = TopicPartitionList::new();
        offsets.add_partition_offset(
            &self.topic,
            message.partition,
            Offset::Offset(message.offset + 1),
        )?;
        self.consumer.commit(&offsets, CommitMode::Async)?;
        Ok(())
    }
}
