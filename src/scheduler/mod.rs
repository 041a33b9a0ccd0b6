//! Preemptive priority engine, Gantt derivation, and metrics.
//!
//! # Algorithm
//!
//! `SchedulerEngine` advances a unit-quantum clock and, on every tick,
//! hands the CPU to the best eligible process under the configured
//! [`TieBreakPolicy`](crate::dispatching::TieBreakPolicy). A higher
//! priority arrival therefore preempts the running process at the next
//! tick boundary.
//!
//! # Outputs
//!
//! - `GanttBuilder` compacts the per-tick trace into segments.
//! - `MetricsCalculator` computes turnaround, waiting, utilization, and
//!   throughput figures.
//! - `Simulator` runs validation, engine, Gantt, metrics, and the
//!   tutorial narrator in one call.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod engine;
mod gantt;
mod kpi;
mod simulator;

pub(crate) use engine::check_preconditions;
pub use engine::{Decision, DecisionTrace, SchedulerEngine, SimulationRun};
pub use gantt::GanttBuilder;
pub use kpi::{MetricsCalculator, SchedulingMetrics, UtilizationReference};
pub use simulator::{SimulationReport, Simulator};
