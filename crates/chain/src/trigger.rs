//! Escalation thresholds.

use serde::{Deserialize, Serialize};
use tracebuf_core::Severity;

use crate::sink::SinkTarget;

/// The pair of thresholds that drive flush-time routing.
///
/// - `occur`: the chain-wide maximum severity must reach this before the
///   chain counts as escalated.
/// - `output`: once escalated, entries at or above this go to the Unified sink.
///
/// Entries that are not diverted still reach their own per-severity sink;
/// nothing is dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Trigger {
    pub occur: Severity,
    pub output: Severity,
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            occur: Severity::Error,
            output: Severity::Info,
        }
    }
}

impl Trigger {
    pub fn new(occur: Severity, output: Severity) -> Self {
        Self { occur, output }
    }

    /// Whether a chain that reached `max_observed` counts as escalated.
    pub fn escalated(&self, max_observed: Severity) -> bool {
        max_observed >= self.occur
    }

    /// Where an entry of `severity` goes for a chain that reached `max_observed`.
    pub fn route(&self, max_observed: Severity, severity: Severity) -> SinkTarget {
        if self.escalated(max_observed) && severity >= self.output {
            SinkTarget::Unified
        } else {
            SinkTarget::Level(severity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracebuf_core::Severity::*;

    #[test]
    fn default_is_error_then_info() {
        assert_eq!(Trigger::default(), Trigger::new(Error, Info));
    }

    #[test]
    fn escalated_chain_diverts_entries_at_or_above_output() {
        let trigger = Trigger::new(Error, Warning);
        assert_eq!(trigger.route(Error, Debug), SinkTarget::Level(Debug));
        assert_eq!(trigger.route(Error, Info), SinkTarget::Level(Info));
        assert_eq!(trigger.route(Error, Warning), SinkTarget::Unified);
        assert_eq!(trigger.route(Fatal, Error), SinkTarget::Unified);
    }

    #[test]
    fn quiet_chain_never_reaches_unified() {
        let trigger = Trigger::new(Error, Debug);
        for severity in Severity::ALL {
            assert_eq!(trigger.route(Warning, severity), SinkTarget::Level(severity));
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let trigger: Trigger = serde_json::from_str(r#"{"output":"debug"}"#).unwrap();
        assert_eq!(trigger, Trigger::new(Error, Debug));
    }
}
