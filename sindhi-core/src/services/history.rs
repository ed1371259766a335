use std::sync::Arc;

use tracing::warn;

use crate::error::StoreResult;
use crate::model::history::HistoryEntry;
use crate::services::storage::{KeyValueStore, HISTORY_KEY};

pub const MAX_HISTORY: usize = 10;

/// Newest-first log of successful translations, written through on every change.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// A missing or unreadable stored value yields an empty history.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(data)) => match serde_json::from_str::<Vec<HistoryEntry>>(&data) {
                Ok(mut v) => {
                    v.truncate(MAX_HISTORY);
                    v
                }
                Err(e) => {
                    warn!("failed to load translation history: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("failed to read translation history: {e}");
                Vec::new()
            }
        };

        Self { store, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY);
        self.persist();
    }

    /// Best effort: failures are logged, never returned.
    pub fn persist(&self) {
        if let Err(e) = self.try_persist() {
            warn!("failed to save translation history: {e}");
        }
    }

    fn try_persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &json)
    }
}
