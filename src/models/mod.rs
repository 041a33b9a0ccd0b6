//! CPU scheduling domain models.
//!
//! Provides the input, bookkeeping, and output types shared by the
//! engine, the Gantt builder, the metrics calculator, and the narrator.
//!
//! | Type | Role |
//! |------|------|
//! | `ProcessSpec` | Validated input row |
//! | `ProcessRecord` | Per-run mutable process state |
//! | `GanttSegment` / `GanttChart` | Execution timeline |
//! | `TimelineEvent` / `Narrative` | Tutorial artifact |

mod gantt;
mod narrative;
mod process;

pub use gantt::{Executor, GanttChart, GanttSegment};
pub use narrative::{ArrivalEntry, Narrative, ReadyEntry, TimelineEvent, IDLE_REASON};
pub use process::{
    tick_horizon, ProcessId, ProcessRecord, ProcessSpec, MAX_PRIORITY, MAX_TICKS, MIN_PRIORITY,
};
