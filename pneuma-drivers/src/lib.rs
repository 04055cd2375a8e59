//! Output sink implementations
//!
//! This crate provides concrete implementations of the
//! [`pneuma_core::AmplitudeSink`] trait:
//!
//! - PWM valve banks (proportional valves, one PWM output per channel)
//! - Solenoid banks (on/off valves, one GPIO per channel)
//! - Text console output

#![no_std]
#![deny(unsafe_code)]

pub mod console;
pub mod valve;

pub use console::ConsoleSink;
pub use valve::{PwmValveBank, SolenoidBank, ValveError};
