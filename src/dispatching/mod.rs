//! Dispatch ordering for the tick loop.
//!
//! The engine and the tutorial narrator both pick the running process
//! through the same [`TieBreakPolicy`], so their decisions always agree.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::dispatching::{PriorityDirection, TieBreakPolicy, TieFallback};
//!
//! // Lower number wins, ties go to the earlier arrival.
//! let classic = TieBreakPolicy::ordered_with_fallback();
//!
//! // Higher number wins, ties keep input order.
//! let inverted = TieBreakPolicy::directional(PriorityDirection::LowFirst);
//! assert_eq!(inverted.fallback, TieFallback::InputOrder);
//! # let _ = classic;
//! ```
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4: Priority Scheduling

mod policy;

pub use policy::{PriorityDirection, TieBreakPolicy, TieFallback};
