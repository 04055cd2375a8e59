//! Timeline data model
//!
//! A timeline is an ordered set of channels, each holding an ordered list
//! of non-overlapping amplitude intervals. Timelines are built up front and
//! are read-only while a cycle runs.

pub mod interval;

pub use interval::Interval;

use heapless::Vec;

/// Maximum channels per timeline
pub const MAX_CHANNELS: usize = 8;

/// Maximum intervals per channel
pub const MAX_INTERVALS: usize = 32;

/// Interval storage for a single channel
pub type Channel = Vec<Interval, MAX_INTERVALS>;

/// Errors detected while building a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimelineError {
    /// More than `MAX_CHANNELS` channels
    TooManyChannels,
    /// More than `MAX_INTERVALS` intervals in one channel
    TooManyIntervals { channel: usize },
    /// Interval with a duration of zero
    ZeroDuration { channel: usize, interval: usize },
    /// Interval starts before its predecessor
    Unsorted { channel: usize, interval: usize },
    /// Interval starts before its predecessor has ended
    Overlap { channel: usize, interval: usize },
}

/// Check that a channel's intervals are well formed
///
/// Intervals must have a positive duration, be sorted by start, and must
/// not overlap. Touching intervals (`prev.end() == next.start`) are fine.
pub fn validate_channel(channel: usize, intervals: &[Interval]) -> Result<(), TimelineError> {
    if intervals.len() > MAX_INTERVALS {
        return Err(TimelineError::TooManyIntervals { channel });
    }

    let mut prev: Option<&Interval> = None;
    for (idx, interval) in intervals.iter().enumerate() {
        if interval.duration == 0 {
            return Err(TimelineError::ZeroDuration {
                channel,
                interval: idx,
            });
        }

        if let Some(prev) = prev {
            if interval.start < prev.start {
                return Err(TimelineError::Unsorted {
                    channel,
                    interval: idx,
                });
            }
            if interval.start < prev.end() {
                return Err(TimelineError::Overlap {
                    channel,
                    interval: idx,
                });
            }
        }

        prev = Some(interval);
    }

    Ok(())
}

/// Multi-channel amplitude timeline
///
/// Channels are identified by position. Every channel stored here has
/// passed [`validate_channel`], so the scanner's ordering precondition
/// always holds for a `Timeline`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeline {
    channels: Vec<Channel, MAX_CHANNELS>,
}

impl Timeline {
    /// Create an empty timeline
    pub const fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Build a timeline from per-channel interval slices
    pub fn from_channels(channels: &[&[Interval]]) -> Result<Self, TimelineError> {
        let mut timeline = Self::new();
        for intervals in channels {
            timeline.push_channel(intervals)?;
        }
        Ok(timeline)
    }

    /// Append a channel, returning its index
    pub fn push_channel(&mut self, intervals: &[Interval]) -> Result<usize, TimelineError> {
        let index = self.channels.len();
        if index >= MAX_CHANNELS {
            return Err(TimelineError::TooManyChannels);
        }

        validate_channel(index, intervals)?;

        let channel = Channel::from_slice(intervals)
            .map_err(|_| TimelineError::TooManyIntervals { channel: index })?;
        self.channels
            .push(channel)
            .map_err(|_| TimelineError::TooManyChannels)?;

        Ok(index)
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Check if the timeline has no channels
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Get one channel's intervals
    pub fn channel(&self, index: usize) -> Option<&[Interval]> {
        self.channels.get(index).map(|c| c.as_slice())
    }

    /// Iterate over channels in order
    pub fn channels(&self) -> impl Iterator<Item = &[Interval]> {
        self.channels.iter().map(|c| c.as_slice())
    }

    /// Latest interval end over all channels (0 when nothing is scheduled)
    pub fn span(&self) -> u32 {
        self.channels()
            .filter_map(|c| c.last())
            .map(Interval::end)
            .max()
            .unwrap_or(0)
    }
}
