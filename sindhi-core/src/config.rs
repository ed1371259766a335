use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use tracing::warn;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_DELAY_MIN_MS: u64 = 1000;
const DEFAULT_DELAY_MAX_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    /// Used only when no credential has been stored yet.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            delay_min_ms: DEFAULT_DELAY_MIN_MS,
            delay_max_ms: DEFAULT_DELAY_MAX_MS,
            api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable source; unset or blank values keep defaults.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Config::default();

        if let Some(dir) = var("SINDHI_DATA_DIR") {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Some(endpoint) = var("SINDHI_API_ENDPOINT") {
            cfg.endpoint = endpoint;
        }
        if let Some(model) = var("SINDHI_MODEL") {
            cfg.model = model;
        }

        cfg.timeout_secs = parse_or("SINDHI_TIMEOUT_SECS", var("SINDHI_TIMEOUT_SECS"), cfg.timeout_secs);
        cfg.delay_min_ms = parse_or("SINDHI_DELAY_MIN_MS", var("SINDHI_DELAY_MIN_MS"), cfg.delay_min_ms);
        cfg.delay_max_ms = parse_or("SINDHI_DELAY_MAX_MS", var("SINDHI_DELAY_MAX_MS"), cfg.delay_max_ms);

        cfg.api_key = var("OPENAI_API_KEY");

        cfg
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Bounds of the simulated fallback latency, ordered low to high.
    pub fn delay_range(&self) -> (Duration, Duration) {
        let lo = self.delay_min_ms.min(self.delay_max_ms);
        let hi = self.delay_min_ms.max(self.delay_max_ms);
        (Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

fn parse_or(key: &str, value: Option<String>, default: u64) -> u64 {
    match value {
        None => default,
        Some(raw) => match raw.parse::<u64>() {
            Ok(v) => v,
            Err(e) => {
                warn!("ignoring {key}={raw:?}: {e}");
                default
            }
        },
    }
}

fn default_data_dir() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("com", "sindhi-translator", "sindhi-core") {
        return dirs.data_dir().to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("data")
}
