//! Amplitude intervals
//!
//! An interval is the atomic unit of a channel's timeline: a contiguous
//! span of sample steps during which the channel holds one amplitude.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single amplitude interval
///
/// `start` and `duration` are measured in sample steps, not wall-clock
/// time. A cycle with 10 samples queries steps 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// First step covered by the interval
    pub start: u32,
    /// Number of steps covered (must be > 0)
    pub duration: u32,
    /// Signal level held for the whole interval
    pub amplitude: u16,
}

impl Interval {
    /// Create a new interval
    pub const fn new(start: u32, duration: u32, amplitude: u16) -> Self {
        Self {
            start,
            duration,
            amplitude,
        }
    }

    /// First step after the interval (exclusive end)
    pub const fn end(&self) -> u32 {
        self.start.saturating_add(self.duration)
    }

    /// Check if `time` falls within `[start, start + duration)`
    pub const fn contains(&self, time: u32) -> bool {
        time >= self.start && time - self.start < self.duration
    }

    /// Check if the interval has fully elapsed at `time`
    ///
    /// A query before the start never counts as elapsed, even for a
    /// zero-length interval.
    pub const fn has_elapsed(&self, time: u32) -> bool {
        time >= self.start && time - self.start >= self.duration
    }
}
