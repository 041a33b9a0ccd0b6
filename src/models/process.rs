//! Process model.
//!
//! A process is one schedulable unit of CPU work. Input rows are
//! [`ProcessSpec`]s; the engine turns each into a mutable
//! [`ProcessRecord`] that carries the run's bookkeeping.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted priority value.
pub const MIN_PRIORITY: u8 = 1;
/// Highest accepted priority value.
pub const MAX_PRIORITY: u8 = 5;

/// Upper bound on the simulated clock.
///
/// The engine records one decision per tick, so a run must finish by this
/// tick. Input is rejected when `max(arrival) + Σburst` exceeds it.
pub const MAX_TICKS: u64 = 1_000_000;

/// Latest tick a run can reach: `max(arrival) + Σburst`.
///
/// Returns `None` if the sum overflows `u64`.
pub fn tick_horizon<I>(rows: I) -> Option<u64>
where
    I: IntoIterator<Item = ProcessSpec>,
{
    let mut latest_arrival: u64 = 0;
    let mut total_burst: u64 = 0;
    for row in rows {
        latest_arrival = latest_arrival.max(row.arrival_time);
        total_burst = total_burst.checked_add(row.burst_time)?;
    }
    latest_arrival.checked_add(total_burst)
}

/// Process identifier, assigned 1-based by input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Identifier for the process at the given 0-based input position.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// 0-based input position of this process.
    pub fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// One validated input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Tick at which the process becomes eligible.
    pub arrival_time: u64,
    /// Total CPU ticks required.
    pub burst_time: u64,
    /// Priority value in `1..=5`. Which end is "better" is policy-defined.
    pub priority: u8,
}

impl ProcessSpec {
    /// Creates a new input row.
    pub fn new(arrival_time: u64, burst_time: u64, priority: u8) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority,
        }
    }
}

/// A process as tracked during (and after) one simulation run.
///
/// `remaining_time` starts at `burst_time` and drops by one for every
/// tick the process holds the CPU. The completion fields stay `None`
/// until it reaches zero; afterwards
/// `completion = arrival + waiting + burst` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique identifier (input order, 1-based).
    pub id: ProcessId,
    /// Tick at which the process becomes eligible.
    pub arrival_time: u64,
    /// Total CPU ticks required.
    pub burst_time: u64,
    /// Priority value in `1..=5`.
    pub priority: u8,
    /// CPU ticks still owed.
    pub remaining_time: u64,
    /// Tick at which the last unit of work finished.
    pub completion_time: Option<u64>,
    /// `completion_time - arrival_time`.
    pub turnaround_time: Option<u64>,
    /// `turnaround_time - burst_time`.
    pub waiting_time: Option<u64>,
}

impl ProcessRecord {
    /// Creates a fresh record from an input row.
    pub fn new(id: ProcessId, spec: ProcessSpec) -> Self {
        Self {
            id,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            remaining_time: spec.burst_time,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    /// Builds records for a whole input table, numbering them by position.
    pub fn from_specs(specs: &[ProcessSpec]) -> Vec<Self> {
        specs
            .iter()
            .enumerate()
            .map(|(i, &spec)| Self::new(ProcessId::from_index(i), spec))
            .collect()
    }

    /// The input row this record was built from.
    pub fn spec(&self) -> ProcessSpec {
        ProcessSpec::new(self.arrival_time, self.burst_time, self.priority)
    }

    /// Whether the process may run at tick `t`.
    #[inline]
    pub fn is_eligible_at(&self, t: u64) -> bool {
        self.arrival_time <= t && self.remaining_time > 0
    }

    /// Whether all work is done.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Whether no tick has been consumed yet.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.remaining_time == self.burst_time && self.completion_time.is_none()
    }

    /// Consumes one tick ending at `now`, stamping the completion fields
    /// when the last unit is done. Returns `true` on completion.
    pub(crate) fn execute_tick(&mut self, now: u64) -> bool {
        debug_assert!(self.remaining_time > 0, "{} executed after completion", self.id);
        self.remaining_time -= 1;
        if self.remaining_time > 0 {
            return false;
        }
        let turnaround = now - self.arrival_time;
        self.completion_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
        true
    }
}
