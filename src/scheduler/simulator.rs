//! One-call simulation pipeline.
//!
//! # Pipeline
//!
//! 1. Validate the input rows.
//! 2. Run the engine on a fresh copy of the rows.
//! 3. Compact the decision trace into a Gantt chart.
//! 4. Compute metrics.
//! 5. Optionally narrate the run (again on its own copy).
//!
//! Nothing is retained between calls; every report is a fresh value.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::models::{GanttChart, Narrative, ProcessRecord, ProcessSpec};
use crate::tutorial::TutorialNarrator;
use crate::validation::validate_input;

use super::engine::SchedulerEngine;
use super::gantt::GanttBuilder;
use super::kpi::{MetricsCalculator, SchedulingMetrics};

/// Everything a presentation layer needs to show a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Completed records, in input order.
    pub processes: Vec<ProcessRecord>,
    /// Final clock value.
    pub total_time: u64,
    /// Execution timeline, idle spans included.
    pub gantt: GanttChart,
    /// Aggregate figures.
    pub metrics: SchedulingMetrics,
    /// Tutorial narrative, when enabled.
    pub narrative: Option<Narrative>,
}

/// Runs the full simulation pipeline.
///
/// # Example
///
/// ```
/// use u_cpusim::config::SimulationConfig;
/// use u_cpusim::models::ProcessSpec;
/// use u_cpusim::scheduler::Simulator;
///
/// let report = Simulator::new(SimulationConfig::default())
///     .simulate(&[ProcessSpec::new(0, 3, 2), ProcessSpec::new(1, 2, 1)])
///     .unwrap();
/// assert_eq!(report.gantt.to_string(), "P1 (0 - 1) | P2 (1 - 3) | P1 (3 - 5)");
/// assert_eq!(report.metrics.total_turnaround, 7);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates the given rows.
    pub fn simulate(&self, specs: &[ProcessSpec]) -> Result<SimulationReport, SimulationError> {
        validate_input(specs)?;

        let run = SchedulerEngine::new(self.config.policy).run_specs(specs)?;
        let gantt = GanttBuilder::from_run(&run);
        let metrics = MetricsCalculator::new(self.config.utilization).from_run(&run)?;

        let narrative = if self.config.narrative {
            Some(TutorialNarrator::new(self.config.policy).narrate(specs)?)
        } else {
            None
        };

        debug!(
            "report ready: {} segments, makespan {}",
            gantt.len(),
            run.total_time
        );
        Ok(SimulationReport {
            processes: run.processes,
            total_time: run.total_time,
            gantt,
            metrics,
            narrative,
        })
    }
}
