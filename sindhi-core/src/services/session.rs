use std::cell::RefCell;
use std::sync::Arc;

use serde::Serialize;
use tracing::error;

use crate::error::{CapabilityError, TranslateError, TranslateResult};
use crate::model::history::HistoryEntry;
use crate::model::notification::{Notification, Severity};
use crate::model::request::Translation;
use crate::services::capabilities::{Clipboard, Speech};
use crate::services::notify::Notifier;
use crate::services::resolver::Resolver;

pub const SPEECH_LANG: &str = "ur";
pub const SPEECH_RATE: f32 = 0.8;

/// What the output area currently shows.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Output {
    Empty,
    Translation(String),
    Error,
}

/// Interface-facing layer over the resolver: owns the displayed output,
/// the notification slot and the host capabilities.
pub struct Session {
    resolver: Resolver,
    notifier: RefCell<Notifier>,
    output: RefCell<Output>,
    clipboard: Arc<dyn Clipboard>,
    speech: Arc<dyn Speech>,
}

impl Session {
    pub fn new(resolver: Resolver, clipboard: Arc<dyn Clipboard>, speech: Arc<dyn Speech>) -> Self {
        Self {
            resolver,
            notifier: RefCell::new(Notifier::default()),
            output: RefCell::new(Output::Empty),
            clipboard,
            speech,
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn output(&self) -> Output {
        self.output.borrow().clone()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.borrow().current().cloned()
    }

    /// Counter that moves every time a notification is raised.
    pub fn notifications_issued(&self) -> u64 {
        self.notifier.borrow().issued()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.resolver.history()
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.borrow_mut().notify(message, severity);
    }

    pub async fn translate_text(&self, raw: &str) -> TranslateResult<Translation> {
        match self.resolver.translate(raw).await {
            Ok(t) => {
                *self.output.borrow_mut() = Output::Translation(t.text.clone());
                self.notify("Translation completed successfully!", Severity::Success);
                Ok(t)
            }
            Err(TranslateError::EmptyInput) => {
                self.notify("Please enter text to translate", Severity::Warning);
                Err(TranslateError::EmptyInput)
            }
            Err(e) if !e.is_user_facing() => Err(e),
            Err(e) => {
                error!("translation error: {e}");
                *self.output.borrow_mut() = Output::Error;
                self.notify("Translation failed. Please try again.", Severity::Error);
                Err(e)
            }
        }
    }

    pub async fn paste_text(&self) -> Result<String, CapabilityError> {
        match self.clipboard.read_text().await {
            Ok(text) => {
                self.notify("Text pasted successfully!", Severity::Success);
                Ok(text)
            }
            Err(e) => {
                self.notify("Failed to paste text", Severity::Error);
                Err(e)
            }
        }
    }

    pub async fn copy_translation(&self) -> Result<(), CapabilityError> {
        let Some(text) = self.displayed_translation() else {
            self.notify("No translation to copy", Severity::Warning);
            return Err(CapabilityError::NoTranslation);
        };

        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.notify("Translation copied to clipboard!", Severity::Success);
                Ok(())
            }
            Err(e) => {
                self.notify("Failed to copy translation", Severity::Error);
                Err(e)
            }
        }
    }

    pub fn speak_translation(&self) -> Result<(), CapabilityError> {
        let Some(text) = self.displayed_translation() else {
            self.notify("No translation to speak", Severity::Warning);
            return Err(CapabilityError::NoTranslation);
        };

        if !self.speech.available() {
            self.notify("Speech synthesis not supported", Severity::Warning);
            return Err(CapabilityError::Unavailable("speech synthesis"));
        }

        self.speech.speak(&text, SPEECH_LANG, SPEECH_RATE);
        self.notify("Playing pronunciation...", Severity::Info);
        Ok(())
    }

    pub fn clear(&self) {
        *self.output.borrow_mut() = Output::Empty;
    }

    /// Stores or clears the API key. Returns whether a key is now configured.
    pub fn configure_api_key(&self, value: Option<&str>) -> bool {
        self.resolver.set_credential(value);
        let configured = self.resolver.credential().is_some();
        if configured {
            self.notify(
                "API key saved! You can now use advanced translations.",
                Severity::Success,
            );
        }
        configured
    }

    pub fn dismiss_notification(&self) {
        self.notifier.borrow_mut().dismiss();
    }

    fn displayed_translation(&self) -> Option<String> {
        match &*self.output.borrow() {
            Output::Translation(text) => Some(text.clone()),
            _ => None,
        }
    }
}
