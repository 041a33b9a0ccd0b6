//! Compacts a per-tick decision trace into Gantt segments.
//!
//! A new segment opens whenever the executor differs from the previous
//! tick's, including transitions into and out of idle. The last open
//! segment is closed at the final clock value.

use crate::models::{Executor, GanttChart, GanttSegment};

use super::engine::{DecisionTrace, SimulationRun};

/// Builds Gantt charts from decision traces.
#[derive(Debug, Clone, Copy, Default)]
pub struct GanttBuilder;

impl GanttBuilder {
    /// Builds the chart for a trace ending at `total_time`.
    ///
    /// Ticks beyond the trace (if `total_time` exceeds its length) are
    /// not invented; the last segment is simply stretched to `total_time`.
    pub fn build(trace: &DecisionTrace, total_time: u64) -> GanttChart {
        let mut segments: Vec<GanttSegment> = Vec::new();
        let mut open: Option<(Executor, u64)> = None;

        for decision in trace.iter() {
            match open {
                Some((executor, _)) if executor == decision.executor => {}
                Some((executor, start)) => {
                    segments.push(GanttSegment::new(executor, start, decision.tick));
                    open = Some((decision.executor, decision.tick));
                }
                None => open = Some((decision.executor, decision.tick)),
            }
        }

        if let Some((executor, start)) = open {
            let end = total_time.max(start + 1);
            segments.push(GanttSegment::new(executor, start, end));
        }

        GanttChart { segments }
    }

    /// Builds the chart for a finished run.
    pub fn from_run(run: &SimulationRun) -> GanttChart {
        Self::build(&run.trace, run.total_time)
    }
}
