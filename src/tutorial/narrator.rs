//! Step-by-step narration of a scheduling run.
//!
//! Re-runs the tick loop with richer bookkeeping than the engine keeps:
//! at each switch it snapshots the ready queue, which the compact Gantt
//! representation no longer has. Selection goes through the same
//! [`TieBreakPolicy`], so the narrated order always matches the engine.
//!
//! # Events
//! - `Switch` when the selected process differs from the previous tick's
//!   selection. An idle tick clears the previous selection, so a process
//!   resuming after idle is announced again.
//! - `Complete` at the tick a process finishes, alongside any switch that
//!   happened on the same tick.
//! - `Idle` on every tick with nothing eligible.

use log::debug;

use crate::dispatching::TieBreakPolicy;
use crate::error::SimulationError;
use crate::models::{
    ArrivalEntry, Narrative, ProcessId, ProcessRecord, ProcessSpec, ReadyEntry, TimelineEvent,
    IDLE_REASON,
};
use crate::scheduler::check_preconditions;

/// Produces tutorial narratives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TutorialNarrator {
    policy: TieBreakPolicy,
}

impl TutorialNarrator {
    /// Creates a narrator with the given policy.
    pub fn new(policy: TieBreakPolicy) -> Self {
        Self { policy }
    }

    /// Narrates a fresh copy of the given input rows.
    pub fn narrate(&self, specs: &[ProcessSpec]) -> Result<Narrative, SimulationError> {
        self.narrate_records(ProcessRecord::from_specs(specs))
    }

    /// Narrates a run over owned records.
    pub fn narrate_records(
        &self,
        mut processes: Vec<ProcessRecord>,
    ) -> Result<Narrative, SimulationError> {
        check_preconditions(&processes)?;

        let initial_analysis = initial_analysis(&processes);
        let mut events = Vec::new();
        let mut previous: Option<ProcessId> = None;
        let mut time: u64 = 0;
        let mut completed = 0;

        while completed < processes.len() {
            let mut eligible: Vec<&ProcessRecord> =
                processes.iter().filter(|p| p.is_eligible_at(time)).collect();
            self.policy.sort(&mut eligible);

            let Some((selected, waiting)) = eligible.split_first() else {
                events.push(TimelineEvent::Idle {
                    time,
                    reason: IDLE_REASON.to_string(),
                    ready_queue: Vec::new(),
                });
                previous = None;
                time += 1;
                continue;
            };

            let id = selected.id;
            if previous != Some(id) {
                let preempted =
                    previous.filter(|prev| processes[prev.index()].remaining_time > 0);
                events.push(TimelineEvent::Switch {
                    time,
                    process: id,
                    priority: selected.priority,
                    preempted,
                    ready_queue: waiting
                        .iter()
                        .map(|p| ReadyEntry {
                            process: p.id,
                            priority: p.priority,
                            remaining_time: p.remaining_time,
                        })
                        .collect(),
                });
            }
            previous = Some(id);
            time += 1;

            if processes[id.index()].execute_tick(time) {
                events.push(TimelineEvent::Complete { time, process: id });
                completed += 1;
            }
        }

        debug!("narrated {} events over {time} ticks", events.len());
        Ok(Narrative {
            initial_analysis,
            events,
        })
    }
}

/// Processes by arrival time; equal arrivals keep input order.
fn initial_analysis(processes: &[ProcessRecord]) -> Vec<ArrivalEntry> {
    let mut entries: Vec<ArrivalEntry> = processes
        .iter()
        .map(|p| ArrivalEntry {
            process: p.id,
            arrival_time: p.arrival_time,
            burst_time: p.burst_time,
            priority: p.priority,
        })
        .collect();
    entries.sort_by_key(|e| e.arrival_time);
    entries
}
