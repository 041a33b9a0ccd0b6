//! Tie-break policy for preemptive priority dispatch.
//!
//! Orders the eligible set at a tick. The primary key is the priority
//! value, read in the configured direction; the optional secondary key
//! is arrival time; anything still tied keeps input order (stable sort).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::ProcessRecord;

/// Which end of the priority scale wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityDirection {
    /// Smaller number = higher priority (1 beats 5).
    #[default]
    HighFirst,
    /// Larger number = higher priority (5 beats 1).
    LowFirst,
}

/// Secondary key applied when priority values are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieFallback {
    /// Earlier arrival wins, then input order.
    #[default]
    ArrivalTime,
    /// Input order only.
    #[serde(alias = "none")]
    InputOrder,
}

/// Total order over the eligible processes of one tick.
///
/// # Example
/// ```
/// use u_cpusim::dispatching::{PriorityDirection, TieBreakPolicy};
/// use u_cpusim::models::{ProcessRecord, ProcessSpec};
///
/// let records = ProcessRecord::from_specs(&[
///     ProcessSpec::new(0, 3, 2),
///     ProcessSpec::new(0, 2, 4),
/// ]);
/// let low_first = TieBreakPolicy::directional(PriorityDirection::LowFirst);
/// let chosen = low_first.select(records.iter()).unwrap();
/// assert_eq!(chosen.priority, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TieBreakPolicy {
    /// Priority direction.
    pub direction: PriorityDirection,
    /// Secondary key.
    pub fallback: TieFallback,
}

impl TieBreakPolicy {
    /// Creates a policy.
    pub const fn new(direction: PriorityDirection, fallback: TieFallback) -> Self {
        Self {
            direction,
            fallback,
        }
    }

    /// Lower number first, then earlier arrival, then input order.
    pub const fn ordered_with_fallback() -> Self {
        Self::new(PriorityDirection::HighFirst, TieFallback::ArrivalTime)
    }

    /// Priority in the given direction, then input order. Arrival time is
    /// deliberately ignored.
    pub const fn directional(direction: PriorityDirection) -> Self {
        Self::new(direction, TieFallback::InputOrder)
    }

    /// Sets the fallback key.
    pub const fn with_fallback(mut self, fallback: TieFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Compares two candidates; `Less` means `a` runs first.
    ///
    /// Returns `Equal` when only input order separates them, which a
    /// stable sort then preserves.
    pub fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        let by_priority = match self.direction {
            PriorityDirection::HighFirst => a.priority.cmp(&b.priority),
            PriorityDirection::LowFirst => b.priority.cmp(&a.priority),
        };
        match self.fallback {
            TieFallback::ArrivalTime => {
                by_priority.then_with(|| a.arrival_time.cmp(&b.arrival_time))
            }
            TieFallback::InputOrder => by_priority,
        }
    }

    /// Stable-sorts candidates given in input order.
    pub fn sort(&self, candidates: &mut [&ProcessRecord]) {
        candidates.sort_by(|a, b| self.compare(a, b));
    }

    /// Picks the winner among candidates given in input order.
    ///
    /// Equivalent to the head of [`sort`](Self::sort): `min_by` keeps the
    /// first of several equal minima.
    pub fn select<'a, I>(&self, candidates: I) -> Option<&'a ProcessRecord>
    where
        I: IntoIterator<Item = &'a ProcessRecord>,
    {
        candidates.into_iter().min_by(|a, b| self.compare(a, b))
    }
}

impl fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            PriorityDirection::HighFirst => "high-first",
            PriorityDirection::LowFirst => "low-first",
        };
        let fallback = match self.fallback {
            TieFallback::ArrivalTime => "arrival-time",
            TieFallback::InputOrder => "input-order",
        };
        write!(f, "{direction}/{fallback}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessId, ProcessSpec};

    fn records(specs: &[(u64, u64, u8)]) -> Vec<ProcessRecord> {
        let specs: Vec<ProcessSpec> = specs
            .iter()
            .map(|&(a, b, p)| ProcessSpec::new(a, b, p))
            .collect();
        ProcessRecord::from_specs(&specs)
    }

    fn sorted_ids(policy: TieBreakPolicy, recs: &[ProcessRecord]) -> Vec<u32> {
        let mut refs: Vec<&ProcessRecord> = recs.iter().collect();
        policy.sort(&mut refs);
        refs.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn test_high_first_prefers_lower_number() {
        let recs = records(&[(0, 1, 3), (0, 1, 1), (0, 1, 2)]);
        assert_eq!(
            sorted_ids(TieBreakPolicy::ordered_with_fallback(), &recs),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn test_low_first_prefers_higher_number() {
        let recs = records(&[(0, 1, 3), (0, 1, 1), (0, 1, 5)]);
        let policy = TieBreakPolicy::directional(PriorityDirection::LowFirst);
        assert_eq!(sorted_ids(policy, &recs), vec![3, 1, 2]);
    }

    #[test]
    fn test_arrival_fallback_breaks_priority_tie() {
        // P1 arrived later than P2 but comes first in input order.
        let recs = records(&[(2, 1, 1), (0, 1, 1)]);
        assert_eq!(
            sorted_ids(TieBreakPolicy::ordered_with_fallback(), &recs),
            vec![2, 1]
        );
    }

    #[test]
    fn test_no_fallback_keeps_input_order() {
        let recs = records(&[(2, 1, 1), (0, 1, 1)]);
        let policy = TieBreakPolicy::directional(PriorityDirection::HighFirst);
        assert_eq!(sorted_ids(policy, &recs), vec![1, 2]);
    }

    #[test]
    fn test_same_priority_same_arrival_input_order() {
        let recs = records(&[(1, 4, 3), (1, 2, 3), (1, 1, 3)]);
        for policy in [
            TieBreakPolicy::ordered_with_fallback(),
            TieBreakPolicy::directional(PriorityDirection::HighFirst),
            TieBreakPolicy::directional(PriorityDirection::LowFirst),
        ] {
            assert_eq!(sorted_ids(policy, &recs), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_directional_with_arrival_fallback() {
        let recs = records(&[(3, 1, 4), (1, 1, 4), (0, 1, 2)]);
        let policy = TieBreakPolicy::directional(PriorityDirection::LowFirst)
            .with_fallback(TieFallback::ArrivalTime);
        assert_eq!(sorted_ids(policy, &recs), vec![2, 1, 3]);
    }

    #[test]
    fn test_select_matches_sort_head() {
        let recs = records(&[(0, 1, 2), (0, 1, 2), (0, 1, 4), (0, 1, 1)]);
        for policy in [
            TieBreakPolicy::ordered_with_fallback(),
            TieBreakPolicy::directional(PriorityDirection::LowFirst),
        ] {
            let head = sorted_ids(policy, &recs)[0];
            assert_eq!(policy.select(recs.iter()).map(|r| r.id.0), Some(head));
        }
        let tied = records(&[(0, 1, 2), (0, 1, 2)]);
        let chosen = TieBreakPolicy::default().select(tied.iter()).unwrap();
        assert_eq!(chosen.id, ProcessId(1));
    }

    #[test]
    fn test_select_empty() {
        assert!(TieBreakPolicy::default().select(std::iter::empty()).is_none());
    }

    #[test]
    fn test_policy_serde() {
        let policy: TieBreakPolicy =
            serde_json::from_str(r#"{"direction":"low-first","fallback":"none"}"#).unwrap();
        assert_eq!(policy, TieBreakPolicy::directional(PriorityDirection::LowFirst));
        assert_eq!(policy.to_string(), "low-first/input-order");

        let default: TieBreakPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(default, TieBreakPolicy::ordered_with_fallback());
    }
}
