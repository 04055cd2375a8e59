//! Channel scanner
//!
//! Looks up the amplitude of one channel at a sample step. Query times
//! within a cycle never go backwards, so the scanner keeps a cursor to
//! the first interval that has not yet fully elapsed and only ever moves
//! it forward. Over a whole cycle each interval is stepped past at most
//! once, giving amortized O(1) lookups.
//!
//! A gap between intervals and a finished channel both report amplitude 0.

use crate::timeline::Interval;

/// Find the amplitude active at `time`, resuming from `cursor`
///
/// Returns the amplitude and the cursor to pass to the next call. The
/// returned cursor is never less than `cursor` and never greater than
/// `intervals.len()`.
///
/// `time` must not be less than the time of the previous call made with
/// the same cursor; the scanner does not rewind. Intervals must be sorted
/// and non-overlapping (see [`crate::timeline::validate_channel`]).
pub fn scan(intervals: &[Interval], mut cursor: usize, time: u32) -> (u16, usize) {
    while let Some(interval) = intervals.get(cursor) {
        if !interval.has_elapsed(time) {
            break;
        }
        cursor += 1;
    }

    // Either inside the cursor's interval, in the gap before it, or past
    // the last interval
    match intervals.get(cursor) {
        Some(interval) if interval.contains(time) => (interval.amplitude, cursor),
        _ => (0, cursor),
    }
}

/// Stateful scanner for one channel
///
/// Wraps a borrowed channel and its cursor so callers don't have to
/// thread the index through by hand.
#[derive(Debug, Clone)]
pub struct ChannelScanner<'a> {
    intervals: &'a [Interval],
    cursor: usize,
}

impl<'a> ChannelScanner<'a> {
    /// Create a scanner positioned at the start of the channel
    pub const fn new(intervals: &'a [Interval]) -> Self {
        Self {
            intervals,
            cursor: 0,
        }
    }

    /// Advance to `time` and return the amplitude active there
    pub fn advance(&mut self, time: u32) -> u16 {
        let (amplitude, cursor) = scan(self.intervals, self.cursor, time);
        self.cursor = cursor;
        amplitude
    }

    /// Index of the first interval not yet fully elapsed
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if every interval has elapsed
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.intervals.len()
    }

    /// Rewind to the start of the channel for a new cycle
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}
