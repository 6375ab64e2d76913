//! Ordered log severity shared by every crate in the workspace.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeverityParseError;

/// Log severity, totally ordered by rank.
///
/// Used both to tag buffered entries and to drive the flush-time routing
/// decision (see `Trigger` in `tracebuf-chain`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// Every severity, lowest first.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Numeric rank (`Debug == 0` .. `Fatal == 4`).
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Human-readable name, as handed to formatter hooks.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = SeverityParseError;

    /// Accepts names case-insensitively, the `warn`/`err` aliases and ranks `0..=4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rank) = trimmed.parse::<u8>() {
            return Self::from_rank(rank).ok_or_else(|| SeverityParseError(s.to_string()));
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(SeverityParseError(s.to_string())),
        }
    }
}
