use thiserror::Error;

/// Failures of a single translation request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Please enter text to translate")]
    EmptyInput,

    #[error("a translation is already in progress")]
    Busy,

    #[error("API request failed: {status} ({message})")]
    Api { status: u16, message: String },

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Invalid AI response: {0}")]
    MalformedResponse(String),
}

impl TranslateError {
    /// `Busy` is dropped silently; everything else reaches the user.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, TranslateError::Busy)
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::Network(err.to_string())
    }
}

/// Failures of the persistent key/value store. Never surfaced to the user.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage Error: {0}")]
    Unavailable(String),
}

/// Failures of the clipboard and speech capabilities.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("no translation is displayed")]
    NoTranslation,

    #[error("{0}")]
    Failed(String),
}

pub type TranslateResult<T> = Result<T, TranslateError>;
pub type StoreResult<T> = Result<T, StoreError>;
