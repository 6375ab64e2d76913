//! Logger configuration.

use serde::{Deserialize, Serialize};
use tracebuf_core::{ConfigError, ConfigResult, Severity};

use crate::trigger::Trigger;

/// Environment variable holding the global occur threshold.
pub const OCCUR_LEVEL_ENV: &str = "TRACEBUF_OCCUR_LEVEL";

/// Environment variable holding the global output threshold.
pub const OUTPUT_LEVEL_ENV: &str = "TRACEBUF_OUTPUT_LEVEL";

/// Initial settings for a [`Logger`](crate::Logger).
///
/// Sinks and formatter hooks are code, so they are registered on the logger
/// itself rather than carried here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Thresholds used by every root without a local trigger.
    pub trigger: Trigger,
}

impl LoggerConfig {
    pub fn with_trigger(mut self, occur: Severity, output: Severity) -> Self {
        self.trigger = Trigger::new(occur, output);
        self
    }

    /// Load from `TRACEBUF_OCCUR_LEVEL` / `TRACEBUF_OUTPUT_LEVEL`.
    ///
    /// Unset variables keep their defaults; unparsable ones are an error.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) against an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(OCCUR_LEVEL_ENV) {
            config.trigger.occur = parse_level(OCCUR_LEVEL_ENV, &raw)?;
        }
        if let Some(raw) = lookup(OUTPUT_LEVEL_ENV) {
            config.trigger.output = parse_level(OUTPUT_LEVEL_ENV, &raw)?;
        }

        Ok(config)
    }

    /// Decode a JSON document such as `{"trigger":{"occur":"error","output":"debug"}}`.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

fn parse_level(key: &str, raw: &str) -> ConfigResult<Severity> {
    raw.parse::<Severity>()
        .map_err(|e| ConfigError::invalid_severity(key, e))
}
