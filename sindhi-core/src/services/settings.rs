use std::sync::Arc;

use tracing::warn;

use crate::services::storage::{KeyValueStore, API_KEY_KEY};

/// Holds the optional API credential.
pub struct Settings {
    store: Arc<dyn KeyValueStore>,
    credential: Option<String>,
}

impl Settings {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let credential = match store.get(API_KEY_KEY) {
            Ok(v) => v.filter(|k| !k.trim().is_empty()),
            Err(e) => {
                warn!("failed to read API key: {e}");
                None
            }
        };

        Self { store, credential }
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Trimmed; blank clears. Written through immediately, best effort.
    pub fn set_credential(&mut self, value: Option<&str>) {
        self.credential = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        let result = match &self.credential {
            Some(key) => self.store.set(API_KEY_KEY, key),
            None => self.store.remove(API_KEY_KEY),
        };

        if let Err(e) = result {
            warn!("failed to persist API key: {e}");
        }
    }

    /// Fills the credential in memory only, if none was stored.
    pub fn seed_credential(&mut self, value: Option<String>) {
        if self.credential.is_none() {
            self.credential = value.filter(|v| !v.trim().is_empty());
        }
    }
}
