//! Scheduling performance metrics.
//!
//! Computes the aggregate figures shown after a run from the completed
//! process records and the final clock value.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total / Avg Turnaround | Sum / mean of `completion - arrival` |
//! | Total / Avg Waiting | Sum / mean of `turnaround - burst` |
//! | CPU Utilization | `(T - reference_arrival) / T * 100` |
//! | Throughput | `n / Σburst * 100` (display scale, not a percentage) |
//!
//! Averages, utilization, and throughput are rounded to two decimals.
//!
//! # Reference arrival
//! By default the reference arrival is that of the *first process in
//! input order*, not the earliest arrival, so a later first row shrinks
//! the window. Idle gaps after the reference arrival still count as busy.
//! The [`UtilizationReference::EarliestArrival`] mode uses the true minimum.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::ProcessRecord;

use super::engine::SimulationRun;

/// Which arrival anchors the utilization window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilizationReference {
    /// Arrival of the first process in input order.
    #[default]
    FirstInput,
    /// Minimum arrival across all processes.
    EarliestArrival,
}

/// Aggregate performance figures of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingMetrics {
    /// Sum of turnaround times.
    pub total_turnaround: u64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Sum of waiting times.
    pub total_waiting: u64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// CPU utilization in percent.
    pub cpu_utilization: f64,
    /// Processes per burst tick, times 100.
    pub throughput: f64,
}

/// Computes [`SchedulingMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsCalculator {
    reference: UtilizationReference,
}

impl MetricsCalculator {
    /// Creates a calculator with the given utilization reference.
    pub fn new(reference: UtilizationReference) -> Self {
        Self { reference }
    }

    /// Computes metrics for a finished run.
    pub fn from_run(&self, run: &SimulationRun) -> Result<SchedulingMetrics, SimulationError> {
        self.calculate(&run.processes, run.total_time)
    }

    /// Computes metrics from completed records and the final clock `total_time`.
    ///
    /// # Errors
    /// `PreconditionViolated` when there are no records, the total burst
    /// is zero, the clock is zero, a record has not completed, or a total
    /// does not fit in `u64`.
    pub fn calculate(
        &self,
        processes: &[ProcessRecord],
        total_time: u64,
    ) -> Result<SchedulingMetrics, SimulationError> {
        let first = processes.first().ok_or_else(|| {
            SimulationError::PreconditionViolated("metrics need at least one process".into())
        })?;
        let total_burst = checked_total(processes.iter().map(|p| p.burst_time), "burst")?;
        if total_burst == 0 {
            return Err(SimulationError::PreconditionViolated(
                "total burst time is zero; throughput is undefined".into(),
            ));
        }
        if total_time == 0 {
            return Err(SimulationError::PreconditionViolated(
                "elapsed time is zero; utilization is undefined".into(),
            ));
        }

        let mut total_turnaround: u64 = 0;
        let mut total_waiting: u64 = 0;
        for p in processes {
            match (p.turnaround_time, p.waiting_time) {
                (Some(turnaround), Some(waiting)) => {
                    total_turnaround = checked_total([total_turnaround, turnaround], "turnaround")?;
                    total_waiting = checked_total([total_waiting, waiting], "waiting")?;
                }
                _ => {
                    return Err(SimulationError::PreconditionViolated(format!(
                        "{} has not completed",
                        p.id
                    )))
                }
            }
        }

        let n = processes.len() as f64;
        let reference_arrival = match self.reference {
            UtilizationReference::FirstInput => first.arrival_time,
            UtilizationReference::EarliestArrival => processes
                .iter()
                .map(|p| p.arrival_time)
                .min()
                .unwrap_or(first.arrival_time),
        };
        let busy_window = total_time.saturating_sub(reference_arrival) as f64;

        Ok(SchedulingMetrics {
            total_turnaround,
            avg_turnaround: round2(total_turnaround as f64 / n),
            total_waiting,
            avg_waiting: round2(total_waiting as f64 / n),
            cpu_utilization: round2(busy_window / total_time as f64 * 100.0),
            throughput: round2(n / total_burst as f64 * 100.0),
        })
    }
}

impl fmt::Display for SchedulingMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Turnaround Time: {}", self.total_turnaround)?;
        writeln!(f, "Average Turnaround Time: {:.2}", self.avg_turnaround)?;
        writeln!(f, "Total Waiting Time: {}", self.total_waiting)?;
        writeln!(f, "Average Waiting Time: {:.2}", self.avg_waiting)?;
        writeln!(f, "CPU Utilization: {:.2}%", self.cpu_utilization)?;
        write!(f, "Throughput: {:.2}", self.throughput)
    }
}

fn checked_total<I>(values: I, what: &str) -> Result<u64, SimulationError>
where
    I: IntoIterator<Item = u64>,
{
    values
        .into_iter()
        .try_fold(0u64, u64::checked_add)
        .ok_or_else(|| {
            SimulationError::PreconditionViolated(format!("total {what} time overflows"))
        })
}

/// Rounds half away from zero to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
