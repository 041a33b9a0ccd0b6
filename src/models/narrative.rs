//! Tutorial narrative model.
//!
//! A narrative explains a run step by step: an initial listing of the
//! processes by arrival, then the timeline of switch, completion, and
//! idle events in the order they occurred.

use serde::{Deserialize, Serialize};

use super::ProcessId;

/// Explanation attached to every idle event.
pub const IDLE_REASON: &str = "no process has arrived with work remaining, so the CPU stays idle";

/// A process waiting in the ready queue at a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyEntry {
    /// Waiting process.
    pub process: ProcessId,
    /// Its priority value.
    pub priority: u8,
    /// Ticks it still needs.
    pub remaining_time: u64,
}

/// One row of the initial-analysis listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalEntry {
    /// Process.
    pub process: ProcessId,
    /// Arrival tick.
    pub arrival_time: u64,
    /// Burst length.
    pub burst_time: u64,
    /// Priority value.
    pub priority: u8,
}

/// A scheduling decision worth explaining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum TimelineEvent {
    /// A different process was selected at `time`.
    Switch {
        time: u64,
        process: ProcessId,
        priority: u8,
        /// Previously running process that still had work left.
        preempted: Option<ProcessId>,
        /// Other eligible processes, in tie-break order.
        ready_queue: Vec<ReadyEntry>,
    },
    /// `process` finished its last tick at `time`.
    Complete { time: u64, process: ProcessId },
    /// Nothing was eligible at `time`.
    Idle {
        time: u64,
        reason: String,
        /// Always empty: nothing was eligible.
        ready_queue: Vec<ReadyEntry>,
    },
}

impl TimelineEvent {
    /// Tick the event refers to.
    pub fn time(&self) -> u64 {
        match self {
            Self::Switch { time, .. } | Self::Complete { time, .. } | Self::Idle { time, .. } => {
                *time
            }
        }
    }

    /// Process the event is about (none for idle).
    pub fn process(&self) -> Option<ProcessId> {
        match self {
            Self::Switch { process, .. } | Self::Complete { process, .. } => Some(*process),
            Self::Idle { .. } => None,
        }
    }

    /// Ready-queue snapshot; empty for completions and idle ticks.
    pub fn ready_queue(&self) -> &[ReadyEntry] {
        match self {
            Self::Switch { ready_queue, .. } | Self::Idle { ready_queue, .. } => ready_queue,
            Self::Complete { .. } => &[],
        }
    }

    /// One-sentence explanation for a learner.
    pub fn describe(&self) -> String {
        match self {
            Self::Switch {
                time,
                process,
                priority,
                preempted,
                ready_queue,
            } => {
                let mut text = match preempted {
                    Some(prev) => format!(
                        "At time {time}, {process} (priority {priority}) preempts {prev} \
                         and takes the CPU"
                    ),
                    None => {
                        format!("At time {time}, {process} (priority {priority}) takes the CPU")
                    }
                };
                if ready_queue.is_empty() {
                    text.push_str("; the ready queue is empty.");
                } else {
                    let waiting: Vec<String> = ready_queue
                        .iter()
                        .map(|e| {
                            format!(
                                "{} (priority {}, {} left)",
                                e.process, e.priority, e.remaining_time
                            )
                        })
                        .collect();
                    text.push_str("; waiting: ");
                    text.push_str(&waiting.join(", "));
                    text.push('.');
                }
                text
            }
            Self::Complete { time, process } => {
                format!("At time {time}, {process} completes its burst.")
            }
            Self::Idle { time, reason, .. } => format!("At time {time}, {reason}."),
        }
    }
}

/// A complete tutorial artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    /// Processes sorted by arrival (input order among equal arrivals).
    pub initial_analysis: Vec<ArrivalEntry>,
    /// Events in chronological order.
    pub events: Vec<TimelineEvent>,
}

impl Narrative {
    /// Renders every event explanation, one per line.
    pub fn describe(&self) -> Vec<String> {
        self.events.iter().map(TimelineEvent::describe).collect()
    }

    /// Switch events only.
    pub fn switches(&self) -> impl Iterator<Item = &TimelineEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, TimelineEvent::Switch { .. }))
    }
}
