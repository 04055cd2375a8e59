//! Valve bank sinks
//!
//! A valve bank owns one output per timeline channel and applies each
//! snapshot to all of them. Banks are sized at compile time; a snapshot
//! with a different channel count is rejected before any output changes.

pub mod pwm;
pub mod solenoid;

pub use pwm::PwmValveBank;
pub use solenoid::SolenoidBank;

/// Errors that can occur when driving a valve bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValveError<E> {
    /// Snapshot channel count doesn't match the bank
    ChannelMismatch { expected: usize, actual: usize },
    /// Output pin rejected the write
    Output { channel: usize, error: E },
}

/// Reject snapshots that don't cover exactly `N` channels
fn check_channels<E, const N: usize>(amplitudes: &[u16]) -> Result<(), ValveError<E>> {
    if amplitudes.len() != N {
        return Err(ValveError::ChannelMismatch {
            expected: N,
            actual: amplitudes.len(),
        });
    }
    Ok(())
}
