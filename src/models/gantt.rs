//! Execution timeline (Gantt chart) model.
//!
//! A chart is an ordered list of segments, each a maximal run of ticks
//! held by one executor. Segments are chronological and contiguous:
//! `segments[k].end_time == segments[k + 1].start_time`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProcessId;

/// Who held the CPU for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "id")]
pub enum Executor {
    /// A process ran.
    Process(ProcessId),
    /// No process was eligible.
    Idle,
}

impl Executor {
    /// The running process, if any.
    pub fn process(self) -> Option<ProcessId> {
        match self {
            Self::Process(id) => Some(id),
            Self::Idle => None,
        }
    }

    /// Whether this is the idle sentinel.
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process(id) => write!(f, "{id}"),
            Self::Idle => f.write_str("Idle"),
        }
    }
}

/// One contiguous span of CPU ownership, `[start_time, end_time)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSegment {
    /// Process or idle sentinel.
    pub executor: Executor,
    /// First tick covered.
    pub start_time: u64,
    /// First tick not covered.
    pub end_time: u64,
}

impl GanttSegment {
    /// Creates a new segment.
    pub fn new(executor: Executor, start_time: u64, end_time: u64) -> Self {
        Self {
            executor,
            start_time,
            end_time,
        }
    }

    /// Number of ticks covered.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.end_time - self.start_time
    }

    /// Whether tick `t` falls inside this segment.
    #[inline]
    pub fn covers(&self, t: u64) -> bool {
        self.start_time <= t && t < self.end_time
    }
}

impl fmt::Display for GanttSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} - {})", self.executor, self.start_time, self.end_time)
    }
}

/// An execution timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GanttChart {
    /// Segments in chronological order.
    pub segments: Vec<GanttSegment>,
}

impl GanttChart {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of segments (idle included).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the chart has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over all segments.
    pub fn iter(&self) -> std::slice::Iter<'_, GanttSegment> {
        self.segments.iter()
    }

    /// Segments where a process ran, i.e. the chart without idle labeling.
    pub fn busy_segments(&self) -> impl Iterator<Item = &GanttSegment> {
        self.segments.iter().filter(|s| !s.executor.is_idle())
    }

    /// Segments held by the given process.
    pub fn segments_for(&self, id: ProcessId) -> impl Iterator<Item = &GanttSegment> {
        self.segments
            .iter()
            .filter(move |s| s.executor == Executor::Process(id))
    }

    /// End of the last segment (0 for an empty chart).
    pub fn makespan(&self) -> u64 {
        self.segments.last().map(|s| s.end_time).unwrap_or(0)
    }

    /// Ticks spent running processes.
    pub fn busy_time(&self) -> u64 {
        self.busy_segments().map(GanttSegment::duration).sum()
    }

    /// Ticks spent idle.
    pub fn idle_time(&self) -> u64 {
        self.segments
            .iter()
            .filter(|s| s.executor.is_idle())
            .map(GanttSegment::duration)
            .sum()
    }

    /// Executor holding the CPU at tick `t`.
    pub fn executor_at(&self, t: u64) -> Option<Executor> {
        self.segments.iter().find(|s| s.covers(t)).map(|s| s.executor)
    }

    /// Whether adjacent segments touch without gaps or overlap.
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|w| w[0].end_time == w[1].start_time)
    }
}

impl<'a> IntoIterator for &'a GanttChart {
    type Item = &'a GanttSegment;
    type IntoIter = std::slice::Iter<'a, GanttSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chart() -> GanttChart {
        GanttChart {
            segments: vec![
                GanttSegment::new(Executor::Idle, 0, 2),
                GanttSegment::new(Executor::Process(ProcessId(1)), 2, 5),
                GanttSegment::new(Executor::Process(ProcessId(2)), 5, 6),
                GanttSegment::new(Executor::Process(ProcessId(1)), 6, 7),
            ],
        }
    }

    #[test]
    fn test_segment_display() {
        let seg = GanttSegment::new(Executor::Process(ProcessId(2)), 1, 3);
        assert_eq!(seg.to_string(), "P2 (1 - 3)");
        assert_eq!(seg.duration(), 2);
        assert!(seg.covers(1));
        assert!(!seg.covers(3));
    }

    #[test]
    fn test_chart_times() {
        let chart = sample_chart();
        assert_eq!(chart.makespan(), 7);
        assert_eq!(chart.busy_time(), 5);
        assert_eq!(chart.idle_time(), 2);
        assert_eq!(chart.busy_segments().count(), 3);
        assert_eq!(chart.segments_for(ProcessId(1)).count(), 2);
        assert!(chart.is_contiguous());
    }

    #[test]
    fn test_executor_at() {
        let chart = sample_chart();
        assert_eq!(chart.executor_at(0), Some(Executor::Idle));
        assert_eq!(chart.executor_at(5), Some(Executor::Process(ProcessId(2))));
        assert_eq!(chart.executor_at(7), None);
    }

    #[test]
    fn test_chart_display() {
        let chart = sample_chart();
        assert_eq!(
            chart.to_string(),
            "Idle (0 - 2) | P1 (2 - 5) | P2 (5 - 6) | P1 (6 - 7)"
        );
    }

    #[test]
    fn test_gap_is_not_contiguous() {
        let chart = GanttChart {
            segments: vec![
                GanttSegment::new(Executor::Process(ProcessId(1)), 0, 1),
                GanttSegment::new(Executor::Process(ProcessId(2)), 2, 3),
            ],
        };
        assert!(!chart.is_contiguous());
    }

    #[test]
    fn test_executor_serde() {
        let json = serde_json::to_string(&Executor::Process(ProcessId(3))).unwrap();
        assert_eq!(json, r#"{"kind":"process","id":3}"#);
        let idle: Executor = serde_json::from_str(r#"{"kind":"idle"}"#).unwrap();
        assert_eq!(idle, Executor::Idle);
    }
}
