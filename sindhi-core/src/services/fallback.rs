use std::sync::Arc;
use std::time::Duration;

use crate::model::request::TranslationRequest;
use crate::services::delay::{jitter, Delay};
use crate::services::lookup::{matcher, LookupTable};

const PLACEHOLDER_MAX_CHARS: usize = 50;
const LONG_PLACEHOLDER: &str =
    "هي متن سنڌي ۾ ترجمو ڪيو ويو آهي. مڪمل ترجمي لاءِ OpenAI API key جي ضرورت آهي.";

/// Table-driven approximation used when no credential is configured.
pub struct FallbackStrategy {
    table: LookupTable,
    delay: Arc<dyn Delay>,
    min_delay: Duration,
    max_delay: Duration,
}

impl FallbackStrategy {
    pub fn new(table: LookupTable, delay: Arc<dyn Delay>, (min_delay, max_delay): (Duration, Duration)) -> Self {
        Self {
            table,
            delay,
            min_delay,
            max_delay,
        }
    }

    /// Never fails.
    pub async fn resolve(&self, request: &TranslationRequest) -> String {
        self.delay.sleep(jitter(self.min_delay, self.max_delay)).await;

        match matcher::lookup(&self.table, &request.normalized_text) {
            Some(hit) => hit.to_string(),
            None => placeholder(&request.raw_text),
        }
    }
}

/// Marker returned for text the table does not cover.
pub fn placeholder(raw: &str) -> String {
    if raw.chars().count() < PLACEHOLDER_MAX_CHARS {
        format!("[{raw} جو سنڌي ترجمو]")
    } else {
        LONG_PLACEHOLDER.to_string()
    }
}
