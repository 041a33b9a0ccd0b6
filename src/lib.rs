//! Preemptive priority CPU scheduling simulator.
//!
//! Simulates a single CPU over a discrete, unit-quantum time axis and
//! produces an execution timeline, performance metrics, and a
//! step-by-step narrative of the scheduling decisions for teaching.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessSpec`, `ProcessRecord`,
//!   `GanttSegment`, `GanttChart`, `TimelineEvent`, `Narrative`
//! - **`dispatching`**: `TieBreakPolicy`, shared by engine and narrator
//! - **`scheduler`**: Tick engine, Gantt builder, metrics, `Simulator`
//! - **`tutorial`**: Narrated re-simulation with ready-queue snapshots
//! - **`validation`**: Boundary parsing and input checks
//! - **`config`**: `SimulationConfig`
//!
//! # Example
//!
//! ```
//! use u_cpusim::config::SimulationConfig;
//! use u_cpusim::scheduler::Simulator;
//! use u_cpusim::validation::{parse_table, RawRow};
//!
//! let specs = parse_table(&[RawRow::new("0", "3", "2"), RawRow::new("1", "2", "1")]).unwrap();
//! let report = Simulator::new(SimulationConfig::default()).simulate(&specs).unwrap();
//! assert_eq!(report.total_time, 5);
//! assert!((report.metrics.avg_waiting - 1.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod tutorial;
pub mod validation;

pub use error::SimulationError;
