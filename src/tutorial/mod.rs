//! Teaching narration for scheduling runs.
//!
//! [`TutorialNarrator`] explains a run as a list of
//! [`TimelineEvent`](crate::models::TimelineEvent)s with ready-queue
//! snapshots, plus an arrival-ordered listing of the input.

mod narrator;

pub use narrator::TutorialNarrator;
