//! The signal read model and its index scoring rules.

use std::collections::HashMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Signal priority levels, in ascending ordinal order.
///
/// The ordinal (`Low`=1, `Medium`=2, `High`=3) is the score used by the
/// priority index. Priority strings outside this closed set score 0 and
/// therefore only ever match other unparseable priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parses a priority string, returning `None` for anything outside the
    /// closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }

    /// The index ordinal of this priority.
    pub fn ordinal(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Index score for an arbitrary priority string: the ordinal, or 0 when
    /// the string is not a known priority.
    pub fn score(value: &str) -> f64 {
        Self::parse(value).map_or(0.0, |p| f64::from(p.ordinal()))
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        write!(f, "{name}")
    }
}

/// Index score for an RFC 3339 timestamp string: seconds since the Unix
/// epoch, or 0 when the string does not parse.
pub fn timestamp_score(value: &str) -> f64 {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.timestamp() as f64)
        .unwrap_or(0.0)
}

/// The read-model entity served by the API.
///
/// All fields are transport strings; timestamps are parsed on demand for
/// indexing, never at rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub title: String,
    pub content: String,
    pub priority: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Signal {
    /// Builds a `Signal` from a stored hash field set. Missing keys become
    /// empty strings.
    pub fn from_map(data: &HashMap<String, String>) -> Self {
        let field = |key: &str| data.get(key).cloned().unwrap_or_default();
        Self {
            id: field("id"),
            title: field("title"),
            content: field("content"),
            priority: field("priority"),
            author: field("author"),
            created_at: field("created_at"),
            updated_at: field("updated_at"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Action, SignalEvent};

    #[test]
    fn priority_parse_known_values() {
        assert_eq!(Priority::parse("Low"), Some(Priority::Low));
        assert_eq!(Priority::parse("Medium"), Some(Priority::Medium));
        assert_eq!(Priority::parse("High"), Some(Priority::High));
        assert_eq!(Priority::parse("high"), None);
        assert_eq!(Priority::parse(""), None);
    }

    #[test]
    fn priority_scores_are_ordinals() {
        assert_eq!(Priority::score("Low"), 1.0);
        assert_eq!(Priority::score("Medium"), 2.0);
        assert_eq!(Priority::score("High"), 3.0);
        assert_eq!(Priority::score("Critical"), 0.0);
    }

    #[test]
    fn timestamp_score_honors_timezone_offset() {
        let with_offset = timestamp_score("2026-02-23T15:00:00-03:00");
        let utc_equivalent = timestamp_score("2026-02-23T18:00:00Z");
        assert_eq!(with_offset, utc_equivalent);
        assert!(with_offset > 0.0);
    }

    #[test]
    fn timestamp_score_unparseable_is_zero() {
        assert_eq!(timestamp_score(""), 0.0);
        assert_eq!(timestamp_score("2026-02-23"), 0.0);
    }

    #[test]
    fn from_map_fills_missing_keys_with_empty_strings() {
        let mut data = HashMap::new();
        data.insert("id".to_string(), "s1".to_string());
        data.insert("priority".to_string(), "High".to_string());

        let signal = Signal::from_map(&data);

        assert_eq!(signal.id, "s1");
        assert_eq!(signal.priority, "High");
        assert_eq!(signal.title, "");
        assert_eq!(signal.author, "");
    }

    #[test]
    fn event_fields_round_trip_into_signal() {
        let event = SignalEvent {
            action: Action::Updated,
            id: "s1".to_string(),
            title: "Server Alert".to_string(),
            content: "CPU at 95%".to_string(),
            priority: "Medium".to_string(),
            author: "otavio".to_string(),
            created_at: "2026-02-23T15:00:00-03:00".to_string(),
            updated_at: "2026-02-23T15:05:00-03:00".to_string(),
        };

        let map: HashMap<String, String> = event
            .fields()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        let signal = Signal::from_map(&map);

        assert_eq!(signal.id, event.id);
        assert_eq!(signal.title, event.title);
        assert_eq!(signal.content, event.content);
        assert_eq!(signal.priority, event.priority);
        assert_eq!(signal.author, event.author);
        assert_eq!(signal.created_at, event.created_at);
        assert_eq!(signal.updated_at, event.updated_at);
    }

    #[test]
    fn signal_serializes_with_snake_case_keys() {
        let signal = Signal {
            id: "s1".to_string(),
            created_at: "2026-02-23T15:00:00-03:00".to_string(),
            ..Signal::default()
        };

        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["id"], "s1");
        assert_eq!(json["created_at"], "2026-02-23T15:00:00-03:00");
    }
}
