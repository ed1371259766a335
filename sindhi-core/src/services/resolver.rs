use std::cell::{Cell, RefCell};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{TranslateError, TranslateResult};
use crate::model::history::HistoryEntry;
use crate::model::request::{Translation, TranslationRequest, TranslationSource};
use crate::services::ai::{RemoteConfig, RemoteStrategy};
use crate::services::delay::{Delay, TokioDelay};
use crate::services::fallback::FallbackStrategy;
use crate::services::history::HistoryStore;
use crate::services::lookup::LookupTable;
use crate::services::settings::Settings;
use crate::services::storage::KeyValueStore;
use crate::services::strategy::{select_strategy, Strategy};

/// Decides the translation source per request and records successes.
///
/// Lives on a single cooperative thread: at most one resolution is in flight,
/// and a second call made while one is pending is rejected with
/// [`TranslateError::Busy`] rather than queued.
pub struct Resolver {
    fallback: FallbackStrategy,
    remote: RemoteStrategy,
    history: RefCell<HistoryStore>,
    settings: RefCell<Settings>,
    busy: Cell<bool>,
}

impl Resolver {
    pub fn new(
        fallback: FallbackStrategy,
        remote: RemoteStrategy,
        history: HistoryStore,
        settings: Settings,
    ) -> Self {
        Self {
            fallback,
            remote,
            history: RefCell::new(history),
            settings: RefCell::new(settings),
            busy: Cell::new(false),
        }
    }

    /// Built-in table, real delay, history and credential loaded from `store`.
    pub fn from_config(cfg: &Config, store: Arc<dyn KeyValueStore>) -> TranslateResult<Self> {
        Self::with_delay(cfg, store, Arc::new(TokioDelay))
    }

    pub fn with_delay(
        cfg: &Config,
        store: Arc<dyn KeyValueStore>,
        delay: Arc<dyn Delay>,
    ) -> TranslateResult<Self> {
        let fallback = FallbackStrategy::new(LookupTable::builtin(), delay, cfg.delay_range());
        let remote = RemoteStrategy::new(RemoteConfig::from(cfg))?;
        let history = HistoryStore::load(store.clone());

        let mut settings = Settings::load(store);
        settings.seed_credential(cfg.api_key.clone());

        Ok(Self::new(fallback, remote, history, settings))
    }

    pub async fn translate(&self, raw: &str) -> TranslateResult<Translation> {
        let request = TranslationRequest::new(raw);
        if request.is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let _guard = BusyGuard::acquire(&self.busy).ok_or(TranslateError::Busy)?;

        // The credential is read per request so a change applies to the next one.
        let credential = self.settings.borrow().credential().map(str::to_owned);

        let translation = match select_strategy(credential.as_deref()) {
            Strategy::Remote { credential } => {
                debug!("using remote translation");
                Translation {
                    text: self.remote.resolve(&request.raw_text, credential).await?,
                    source: TranslationSource::Remote,
                }
            }
            Strategy::Fallback => {
                debug!("no API key configured, using local table");
                Translation {
                    text: self.fallback.resolve(&request).await,
                    source: TranslationSource::Fallback,
                }
            }
        };

        self.history
            .borrow_mut()
            .append(HistoryEntry::new(request.raw_text, translation.text.clone()));

        info!(source = ?translation.source, "translation completed");

        Ok(translation)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.borrow().entries().to_vec()
    }

    pub fn credential(&self) -> Option<String> {
        self.settings.borrow().credential().map(str::to_owned)
    }

    pub fn set_credential(&self, value: Option<&str>) {
        self.settings.borrow_mut().set_credential(value);
    }
}

/// Clears the busy flag when dropped, including when the future is dropped mid-flight.
struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
