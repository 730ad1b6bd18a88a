//! Bounded, newest-first log of past classifications.
//!
//! The buffer is plain data owned by the caller. Nothing in the pipeline keeps
//! a reference to it between calls.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{INVALID_JSON_SENTINEL, MAX_HISTORY};
use crate::prompt::ClassificationRequest;
use crate::response::ValidationOutcome;

/// Display format for history timestamps.
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One recorded classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub supplier: String,
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
}

impl HistoryEntry {
    /// Record a finished request. Malformed responses are stored with
    /// `"Invalid JSON"` in L1 and empty L2/L3.
    pub fn from_outcome(
        request: &ClassificationRequest,
        outcome: &ValidationOutcome,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let (l1, l2, l3) = match outcome {
            ValidationOutcome::Valid { result, .. } => {
                (result.l1.clone(), result.l2.clone(), result.l3.clone())
            }
            ValidationOutcome::Malformed { .. } => {
                (INVALID_JSON_SENTINEL.to_string(), String::new(), String::new())
            }
        };

        Self {
            timestamp,
            description: request.description().to_string(),
            supplier: request.supplier().to_string(),
            l1,
            l2,
            l3,
        }
    }

    pub fn display_timestamp(&self) -> String {
        self.timestamp.format(HISTORY_TIMESTAMP_FORMAT).to_string()
    }
}

/// Fixed-capacity history, newest entry first. Pushing past capacity drops
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
