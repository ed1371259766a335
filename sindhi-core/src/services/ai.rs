use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::{TranslateError, TranslateResult};
use crate::services::ai_types::{ChatMessage, ChatRequest, ChatResponse};

pub const SYSTEM_PROMPT: &str = "You are a professional translator. Translate the given text to Sindhi language. Provide only the translation without any additional text or explanation. Use proper Sindhi script (Arabic script).";
pub const UNAVAILABLE: &str = "Translation unavailable";

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.3;
const ERROR_SNIPPET_CHARS: usize = 400;

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl From<&Config> for RemoteConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            timeout: cfg.timeout(),
        }
    }
}

/// Chat-completion client. One request per call, no retry.
pub struct RemoteStrategy {
    client: Client,
    endpoint: String,
    model: String,
}

impl RemoteStrategy {
    pub fn new(cfg: RemoteConfig) -> TranslateResult<Self> {
        let mut builder = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(concat!("sindhi-core/", env!("CARGO_PKG_VERSION")));

        // local model servers are reached directly
        if is_loopback(&cfg.endpoint) {
            builder = builder.no_proxy();
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: cfg.endpoint,
            model: cfg.model,
        })
    }

    pub async fn resolve(&self, raw: &str, api_key: &str) -> TranslateResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(raw)),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "requesting remote translation");

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();

        // Read as text first so an error body is not lost when it is not JSON.
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(TranslateError::Api {
                status: status.as_u16(),
                message: extract_error_message(status, &text),
            });
        }

        parse_reply(&text)
    }
}

pub fn build_prompt(raw: &str) -> String {
    format!("Translate this text to Sindhi: \"{raw}\"")
}

/// Content of a successful reply, or the sentinel when the model said nothing.
pub fn parse_reply(body: &str) -> TranslateResult<String> {
    let reply: ChatResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

    Ok(reply.first_content().unwrap_or(UNAVAILABLE).to_string())
}

pub fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    // { "error": { "message": "..." } } or { "message": "..." }
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
    }

    let trimmed = body_text.trim();
    let snippet = if trimmed.chars().count() > ERROR_SNIPPET_CHARS {
        let cut: String = trimmed.chars().take(ERROR_SNIPPET_CHARS).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    };

    format!("HTTP {}: {}", status.as_u16(), snippet)
}

fn is_loopback(endpoint: &str) -> bool {
    Url::parse(endpoint)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .map(|h| matches!(h.as_str(), "localhost" | "127.0.0.1" | "[::1]" | "::1"))
        .unwrap_or(false)
}
