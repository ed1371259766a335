use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CapabilityError;

#[async_trait]
pub trait Clipboard: Send + Sync {
    fn available(&self) -> bool;
    async fn read_text(&self) -> Result<String, CapabilityError>;
    async fn write_text(&self, text: &str) -> Result<(), CapabilityError>;
}

/// Fire-and-forget speech playback.
pub trait Speech: Send + Sync {
    fn available(&self) -> bool;
    fn speak(&self, text: &str, lang: &str, rate: f32);
}

/// Stand-in for hosts without a clipboard or speech engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

#[async_trait]
impl Clipboard for Unsupported {
    fn available(&self) -> bool {
        false
    }

    async fn read_text(&self) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unavailable("clipboard"))
    }

    async fn write_text(&self, _text: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unavailable("clipboard"))
    }
}

impl Speech for Unsupported {
    fn available(&self) -> bool {
        false
    }

    fn speak(&self, _text: &str, _lang: &str, _rate: f32) {}
}

/// Process-local clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<String>,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(text.into()),
        }
    }

    pub fn contents(&self) -> String {
        self.contents.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    fn available(&self) -> bool {
        true
    }

    async fn read_text(&self) -> Result<String, CapabilityError> {
        self.contents
            .lock()
            .map(|c| c.clone())
            .map_err(|e| CapabilityError::Failed(e.to_string()))
    }

    async fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| CapabilityError::Failed(e.to_string()))?;
        *contents = text.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
}

/// Speech engine that only remembers what it was asked to say.
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<Utterance>>,
}

impl RecordingSpeech {
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Speech for RecordingSpeech {
    fn available(&self) -> bool {
        true
    }

    fn speak(&self, text: &str, lang: &str, rate: f32) {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(Utterance {
                text: text.to_string(),
                lang: lang.to_string(),
                rate,
            });
        }
    }
}
