//! Output abstraction traits
//!
//! These traits define the interface between the scheduling logic
//! and whatever consumes amplitude snapshots (valves, console, tests).

pub mod sink;

pub use sink::AmplitudeSink;
