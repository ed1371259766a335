use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub original: String,
    pub translated: String,

    /// Epoch milliseconds.
    #[serde(default)]
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
