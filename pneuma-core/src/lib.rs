//! Board-agnostic core logic for pneumatic gait sequencing
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Timeline data model (intervals, channels, validation)
//! - Channel scanner (forward-only interval lookup)
//! - Cycle scheduler (sampling, pacing, snapshot emission)
//! - Output sink trait
//! - Cycle configuration types

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod scanner;
pub mod scheduler;
pub mod timeline;
pub mod traits;

pub use config::{ConfigError, CycleConfig};
pub use scanner::{scan, ChannelScanner};
pub use scheduler::{
    run_cycle, run_cycle_async, run_gait, run_gait_async, Cycle, CycleError, Snapshot,
};
pub use timeline::{Interval, Timeline, TimelineError};
pub use traits::AmplitudeSink;
