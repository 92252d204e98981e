//! Signal mutation events as they arrive from the log.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signal::{Priority, timestamp_score};

/// The mutation that triggered the event.
///
/// Unknown or missing action strings deserialize to [`Action::Unknown`];
/// the projection treats those as no-ops instead of rejecting the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// A signal was created.
    Created,
    /// An existing signal was mutated.
    Updated,
    /// A signal was destroyed.
    Deleted,
    /// Anything else; applied as a no-op.
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Created => "created",
            Action::Updated => "updated",
            Action::Deleted => "deleted",
            Action::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// The payload could not be decoded into a [`SignalEvent`].
#[derive(Debug, Error)]
#[error("malformed signal event: {0}")]
pub struct EventParseError(#[from] serde_json::Error);

/// An event received from the signal topic.
///
/// Only `action` and `id` are required on the wire; every other field
/// defaults to the empty string when absent. Unknown fields are ignored
/// for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalEvent {
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub priority: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

impl SignalEvent {
    /// Deserializes a JSON payload into a `SignalEvent`.
    ///
    /// An empty payload is malformed. No validation beyond JSON shape is
    /// performed here; invalid actions and timestamps are handled downstream.
    pub fn parse(payload: &[u8]) -> Result<Self, EventParseError> {
        Ok(serde_json::from_slice(payload)?)
    }

    /// Returns the event data as a flat field set for hash storage.
    pub fn fields(&self) -> [(&'static str, String); 7] {
        [
            ("id", self.id.clone()),
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            ("priority", self.priority.clone()),
            ("author", self.author.clone()),
            ("created_at", self.created_at.clone()),
            ("updated_at", self.updated_at.clone()),
        ]
    }

    /// Score of this event in the chronological index: `created_at` as Unix
    /// seconds, or 0 when unparseable.
    pub fn created_at_score(&self) -> f64 {
        timestamp_score(&self.created_at)
    }

    /// Score of this event in the priority index: the priority ordinal, or 0
    /// for unknown priority strings.
    pub fn priority_score(&self) -> f64 {
        Priority::score(&self.priority)
    }
}
