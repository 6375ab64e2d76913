//! `tracing-subscriber` initialization.
//!
//! The filter comes from `RUST_LOG` (falling back to the configured default)
//! and the output format from `TRACEBUF_LOG_FORMAT` (`json` or `text`).

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "TRACEBUF_LOG_FORMAT";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format: {0:?} (expected `json` or `text`)")]
pub struct LogFormatParseError(String);

impl FromStr for LogFormat {
    type Err = LogFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" | "plain" => Ok(LogFormat::Text),
            _ => Err(LogFormatParseError(s.to_string())),
        }
    }
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    pub format: LogFormat,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl SubscriberConfig {
    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Defaults overridden by `TRACEBUF_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, LogFormatParseError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) against an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LogFormatParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(LOG_FORMAT_ENV) {
            config.format = raw.parse()?;
        }
        Ok(config)
    }
}

/// Initialize tracing/logging for the process from the environment.
///
/// An unknown `TRACEBUF_LOG_FORMAT` falls back to the default format.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(&SubscriberConfig::from_env().unwrap_or_default());
}

/// Initialize tracing/logging with explicit settings.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with(config: &SubscriberConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    match config.format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Text => builder.try_init().is_ok(),
    }
}
