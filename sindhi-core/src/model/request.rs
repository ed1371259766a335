use serde::Serialize;

use crate::services::lookup::normalize::normalize;

/// One translation invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub raw_text: String,
    pub normalized_text: String,
}

impl TranslationRequest {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw_text = raw.into();
        let normalized_text = normalize(&raw_text);
        Self {
            raw_text,
            normalized_text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_text.is_empty()
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TranslationSource {
    Remote,
    Fallback,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub source: TranslationSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_raw_and_normalizes_copy() {
        let req = TranslationRequest::new("  Good Morning \n");
        assert_eq!(req.raw_text, "  Good Morning \n");
        assert_eq!(req.normalized_text, "good morning");
        assert!(!req.is_empty());
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(TranslationRequest::new(" \t\n ").is_empty());
        assert!(TranslationRequest::new("").is_empty());
    }
}
