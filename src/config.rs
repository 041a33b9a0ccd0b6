//! Simulation configuration.
//!
//! A plain serde value, so a caller can load it from whatever format it
//! already uses. Every field has a default; `{}` is a valid config.

use serde::{Deserialize, Serialize};

use crate::dispatching::{PriorityDirection, TieBreakPolicy, TieFallback};
use crate::scheduler::UtilizationReference;

/// Options for a [`Simulator`](crate::scheduler::Simulator) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Dispatch ordering.
    pub policy: TieBreakPolicy,
    /// Utilization window anchor.
    pub utilization: UtilizationReference,
    /// Whether to produce the tutorial narrative.
    pub narrative: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: TieBreakPolicy::ordered_with_fallback(),
            utilization: UtilizationReference::FirstInput,
            narrative: true,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the whole policy.
    pub fn with_policy(mut self, policy: TieBreakPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the priority direction.
    pub fn with_direction(mut self, direction: PriorityDirection) -> Self {
        self.policy.direction = direction;
        self
    }

    /// Sets the tie fallback.
    pub fn with_fallback(mut self, fallback: TieFallback) -> Self {
        self.policy.fallback = fallback;
        self
    }

    /// Sets the utilization reference.
    pub fn with_utilization(mut self, utilization: UtilizationReference) -> Self {
        self.utilization = utilization;
        self
    }

    /// Enables or disables the narrative.
    pub fn with_narrative(mut self, narrative: bool) -> Self {
        self.narrative = narrative;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::new();
        assert_eq!(config.policy, TieBreakPolicy::ordered_with_fallback());
        assert_eq!(config.utilization, UtilizationReference::FirstInput);
        assert!(config.narrative);
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::new()
            .with_direction(PriorityDirection::LowFirst)
            .with_fallback(TieFallback::InputOrder)
            .with_utilization(UtilizationReference::EarliestArrival)
            .with_narrative(false);
        assert_eq!(config.policy, TieBreakPolicy::directional(PriorityDirection::LowFirst));
        assert_eq!(config.utilization, UtilizationReference::EarliestArrival);
        assert!(!config.narrative);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SimulationConfig = serde_json::from_str(
            r#"{"policy":{"direction":"low-first"},"utilization":"earliest-arrival"}"#,
        )
        .unwrap();
        assert_eq!(config.policy.direction, PriorityDirection::LowFirst);
        assert_eq!(config.policy.fallback, TieFallback::ArrivalTime);
        assert_eq!(config.utilization, UtilizationReference::EarliestArrival);
        assert!(config.narrative);
    }

    #[test]
    fn test_deserialize_empty() {
        let config: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_roundtrip_json() {
        let config = SimulationConfig::new().with_fallback(TieFallback::InputOrder);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""fallback":"input-order""#));
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
