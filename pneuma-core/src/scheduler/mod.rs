//! Cycle scheduler
//!
//! Samples every channel of a timeline at evenly spaced steps and
//! forwards the resulting snapshots to an output sink in real time.

pub mod cycle;
pub mod runner;

pub use cycle::{Cycle, Snapshot};
pub use runner::{run_cycle, run_cycle_async, run_gait, run_gait_async, CycleError};
