//! Tick-level preemptive priority engine.
//!
//! # Algorithm
//!
//! At every tick `t`, until all processes have completed:
//! 1. Collect the eligible set (`arrival_time <= t`, `remaining_time > 0`).
//! 2. Empty set → the tick is idle.
//! 3. Otherwise the [`TieBreakPolicy`] picks one process, which runs for
//!    the tick and loses one unit of remaining time.
//! 4. On reaching zero its completion, turnaround, and waiting times are
//!    stamped with the clock value after the tick.
//!
//! # Complexity
//! O(T * n) where T = final clock value, n = processes. Input sizes are
//! interactive, so a linear scan per tick is enough.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::dispatching::TieBreakPolicy;
use crate::error::SimulationError;
use crate::models::{
    tick_horizon, Executor, ProcessId, ProcessRecord, ProcessSpec, MAX_PRIORITY, MAX_TICKS,
    MIN_PRIORITY,
};

/// Who held the CPU during `[tick, tick + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Tick index.
    pub tick: u64,
    /// Process or idle sentinel.
    pub executor: Executor,
}

/// Chronological per-tick decisions of one run.
///
/// `decisions[i].tick == i` for every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionTrace {
    decisions: Vec<Decision>,
}

impl DecisionTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a trace from executors in tick order.
    pub fn from_executors<I: IntoIterator<Item = Executor>>(executors: I) -> Self {
        let decisions = executors
            .into_iter()
            .enumerate()
            .map(|(i, executor)| Decision {
                tick: i as u64,
                executor,
            })
            .collect();
        Self { decisions }
    }

    fn record(&mut self, executor: Executor) {
        let tick = self.decisions.len() as u64;
        self.decisions.push(Decision { tick, executor });
    }

    /// All decisions.
    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    /// Executor at tick `t`.
    pub fn executor_at(&self, t: u64) -> Option<Executor> {
        self.decisions.get(t as usize).map(|d| d.executor)
    }

    /// Number of ticks recorded.
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether no tick was recorded.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Iterates over decisions.
    pub fn iter(&self) -> std::slice::Iter<'_, Decision> {
        self.decisions.iter()
    }
}

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// Records with completion fields stamped, in input order.
    pub processes: Vec<ProcessRecord>,
    /// Final clock value.
    pub total_time: u64,
    /// One decision per tick.
    pub trace: DecisionTrace,
}

impl SimulationRun {
    /// Sum of burst times.
    ///
    /// Bounded by [`MAX_TICKS`] for runs produced by the engine; saturates
    /// for hand-built ones.
    pub fn total_burst(&self) -> u64 {
        self.processes
            .iter()
            .fold(0, |total: u64, p| total.saturating_add(p.burst_time))
    }
}

/// Preemptive priority scheduling engine.
///
/// # Example
///
/// ```
/// use u_cpusim::dispatching::TieBreakPolicy;
/// use u_cpusim::models::ProcessSpec;
/// use u_cpusim::scheduler::SchedulerEngine;
///
/// let engine = SchedulerEngine::new(TieBreakPolicy::ordered_with_fallback());
/// let run = engine
///     .run_specs(&[ProcessSpec::new(0, 3, 2), ProcessSpec::new(1, 2, 1)])
///     .unwrap();
/// assert_eq!(run.total_time, 5);
/// assert_eq!(run.processes[1].completion_time, Some(3));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerEngine {
    policy: TieBreakPolicy,
}

impl SchedulerEngine {
    /// Creates an engine with the given policy.
    pub fn new(policy: TieBreakPolicy) -> Self {
        Self { policy }
    }

    /// The configured policy.
    pub fn policy(&self) -> TieBreakPolicy {
        self.policy
    }

    /// Runs a fresh copy of the given input rows.
    pub fn run_specs(&self, specs: &[ProcessSpec]) -> Result<SimulationRun, SimulationError> {
        self.run(ProcessRecord::from_specs(specs))
    }

    /// Runs the simulation over owned records.
    ///
    /// Fails fast instead of looping forever when a record could never
    /// complete (zero burst), has already been partially executed, or the
    /// run could outlast [`MAX_TICKS`].
    pub fn run(&self, mut processes: Vec<ProcessRecord>) -> Result<SimulationRun, SimulationError> {
        check_preconditions(&processes)?;
        debug!(
            "simulating {} processes with policy {}",
            processes.len(),
            self.policy
        );

        let mut trace = DecisionTrace::new();
        let mut time: u64 = 0;
        let mut completed = 0;

        while completed < processes.len() {
            let selected = self
                .policy
                .select(processes.iter().filter(|p| p.is_eligible_at(time)))
                .map(|p| p.id.index());

            let Some(index) = selected else {
                trace!("t={time} idle");
                trace.record(Executor::Idle);
                time += 1;
                continue;
            };

            let process = &mut processes[index];
            trace!("t={time} run {}", process.id);
            trace.record(Executor::Process(process.id));
            time += 1;

            if process.execute_tick(time) {
                debug!(
                    "{} completed at t={time} (turnaround {:?}, waiting {:?})",
                    process.id, process.turnaround_time, process.waiting_time
                );
                completed += 1;
            }
        }

        debug!("simulation finished at t={time}");
        Ok(SimulationRun {
            processes,
            total_time: time,
            trace,
        })
    }
}

pub(crate) fn check_preconditions(processes: &[ProcessRecord]) -> Result<(), SimulationError> {
    if processes.is_empty() {
        return Err(SimulationError::PreconditionViolated(
            "no processes to schedule".into(),
        ));
    }
    for (i, p) in processes.iter().enumerate() {
        if p.id != ProcessId::from_index(i) {
            return Err(SimulationError::PreconditionViolated(format!(
                "{} is at input position {}; ids must be 1-based input order",
                p.id,
                i + 1
            )));
        }
        if p.burst_time == 0 {
            return Err(SimulationError::PreconditionViolated(format!(
                "{} has a zero burst time and would never complete",
                p.id
            )));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&p.priority) {
            return Err(SimulationError::PreconditionViolated(format!(
                "{} has priority {} outside {MIN_PRIORITY}..={MAX_PRIORITY}",
                p.id, p.priority
            )));
        }
        if !p.is_fresh() {
            return Err(SimulationError::PreconditionViolated(format!(
                "{} was already executed (remaining {} of {})",
                p.id, p.remaining_time, p.burst_time
            )));
        }
    }
    match tick_horizon(processes.iter().map(ProcessRecord::spec)) {
        Some(horizon) if horizon <= MAX_TICKS => Ok(()),
        _ => Err(SimulationError::PreconditionViolated(format!(
            "latest arrival plus total burst exceeds the {MAX_TICKS}-tick limit"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::PriorityDirection;

    fn run(policy: TieBreakPolicy, specs: &[(u64, u64, u8)]) -> SimulationRun {
        let specs: Vec<ProcessSpec> = specs
            .iter()
            .map(|&(a, b, p)| ProcessSpec::new(a, b, p))
            .collect();
        SchedulerEngine::new(policy).run_specs(&specs).unwrap()
    }

    fn executors(run: &SimulationRun) -> Vec<String> {
        run.trace.iter().map(|d| d.executor.to_string()).collect()
    }

    #[test]
    fn test_preemption_scenario() {
        let run = run(
            TieBreakPolicy::ordered_with_fallback(),
            &[(0, 3, 2), (1, 2, 1)],
        );
        assert_eq!(run.total_time, 5);
        assert_eq!(executors(&run), vec!["P1", "P2", "P2", "P1", "P1"]);

        let p1 = &run.processes[0];
        assert_eq!(p1.completion_time, Some(5));
        assert_eq!(p1.turnaround_time, Some(5));
        assert_eq!(p1.waiting_time, Some(2));

        let p2 = &run.processes[1];
        assert_eq!(p2.completion_time, Some(3));
        assert_eq!(p2.turnaround_time, Some(2));
        assert_eq!(p2.waiting_time, Some(0));
    }

    #[test]
    fn test_leading_idle_ticks() {
        let run = run(TieBreakPolicy::default(), &[(2, 2, 1)]);
        assert_eq!(executors(&run), vec!["Idle", "Idle", "P1", "P1"]);
        assert_eq!(run.total_time, 4);
        assert_eq!(run.processes[0].waiting_time, Some(0));
    }

    #[test]
    fn test_idle_gap_between_processes() {
        let run = run(TieBreakPolicy::default(), &[(0, 1, 3), (3, 1, 3)]);
        assert_eq!(executors(&run), vec!["P1", "Idle", "Idle", "P2"]);
        assert_eq!(run.processes[1].completion_time, Some(4));
    }

    #[test]
    fn test_low_first_direction() {
        let run = run(
            TieBreakPolicy::directional(PriorityDirection::LowFirst),
            &[(0, 2, 1), (0, 1, 5)],
        );
        assert_eq!(executors(&run), vec!["P2", "P1", "P1"]);
    }

    #[test]
    fn test_no_fallback_tie_uses_input_order() {
        // Equal priority, equal arrival: input order decides.
        let run = run(
            TieBreakPolicy::directional(PriorityDirection::HighFirst),
            &[(0, 2, 2), (0, 2, 2)],
        );
        assert_eq!(executors(&run), vec!["P1", "P1", "P2", "P2"]);
    }

    #[test]
    fn test_no_fallback_ignores_arrival() {
        // P2 arrived first, but P1 precedes it in input order once both are
        // eligible; with the fallback P2 keeps the CPU instead.
        let specs = [(1, 2, 2), (0, 3, 2)];
        let without = run(TieBreakPolicy::directional(PriorityDirection::HighFirst), &specs);
        assert_eq!(executors(&without), vec!["P2", "P1", "P1", "P2", "P2"]);

        let with = run(TieBreakPolicy::ordered_with_fallback(), &specs);
        assert_eq!(executors(&with), vec!["P2", "P2", "P2", "P1", "P1"]);
    }

    #[test]
    fn test_conservation_holds() {
        let run = run(
            TieBreakPolicy::default(),
            &[(0, 4, 3), (2, 3, 1), (2, 1, 2), (9, 2, 5)],
        );
        for p in &run.processes {
            let waiting = p.waiting_time.unwrap();
            assert_eq!(p.completion_time, Some(p.arrival_time + waiting + p.burst_time));
            assert_eq!(p.turnaround_time, Some(waiting + p.burst_time));
            assert_eq!(p.remaining_time, 0);
        }
        assert_eq!(run.trace.len() as u64, run.total_time);
        assert_eq!(run.total_burst(), 10);
    }

    #[test]
    fn test_input_not_mutated_between_runs() {
        let specs = vec![ProcessSpec::new(0, 2, 1)];
        let engine = SchedulerEngine::default();
        let first = engine.run_specs(&specs).unwrap();
        let second = engine.run_specs(&specs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_empty() {
        let err = SchedulerEngine::default().run(Vec::new()).unwrap_err();
        assert!(matches!(err, SimulationError::PreconditionViolated(_)));
    }

    #[test]
    fn test_rejects_zero_burst() {
        let err = SchedulerEngine::default()
            .run_specs(&[ProcessSpec::new(0, 0, 1)])
            .unwrap_err();
        assert!(err.to_string().contains("zero burst"));
    }

    #[test]
    fn test_rejects_reused_records() {
        let engine = SchedulerEngine::default();
        let done = engine.run_specs(&[ProcessSpec::new(0, 1, 1)]).unwrap();
        let err = engine.run(done.processes).unwrap_err();
        assert!(err.to_string().contains("already executed"));
    }

    #[test]
    fn test_rejects_misnumbered_records() {
        let record = ProcessRecord::new(ProcessId(2), ProcessSpec::new(0, 1, 1));
        let err = SchedulerEngine::default().run(vec![record]).unwrap_err();
        assert!(err.to_string().contains("input order"));
    }

    #[test]
    fn test_rejects_runs_past_tick_limit() {
        let engine = SchedulerEngine::default();
        for specs in [
            vec![ProcessSpec::new(MAX_TICKS, 1, 1)],
            vec![ProcessSpec::new(0, u64::MAX, 1), ProcessSpec::new(0, 1, 1)],
            vec![ProcessSpec::new(u64::MAX, 1, 1)],
        ] {
            let err = engine.run_specs(&specs).unwrap_err();
            assert!(matches!(err, SimulationError::PreconditionViolated(_)));
            assert!(err.to_string().contains("tick limit"));
        }
    }

    #[test]
    fn test_policy_accessor() {
        let policy = TieBreakPolicy::directional(PriorityDirection::LowFirst);
        assert_eq!(SchedulerEngine::new(policy).policy(), policy);
        assert_eq!(SchedulerEngine::default().policy(), TieBreakPolicy::default());
    }

    #[test]
    fn test_total_burst_saturates() {
        let run = SimulationRun {
            processes: ProcessRecord::from_specs(&[
                ProcessSpec::new(0, u64::MAX, 1),
                ProcessSpec::new(0, 1, 1),
            ]),
            total_time: 0,
            trace: DecisionTrace::new(),
        };
        assert_eq!(run.total_burst(), u64::MAX);
    }

    #[test]
    fn test_trace_from_executors() {
        let trace =
            DecisionTrace::from_executors([Executor::Idle, Executor::Process(ProcessId(1))]);
        assert_eq!(trace.decisions()[1].tick, 1);
        assert_eq!(trace.executor_at(0), Some(Executor::Idle));
        assert_eq!(trace.executor_at(2), None);
    }
}
