//! Step-at-a-time cycle traversal
//!
//! A [`Cycle`] walks the sample steps of one cycle in order, scanning every
//! channel at each step. It does no pacing and no output; the runner layers
//! those on top. Hosts that need to stop a gait early can drive a `Cycle`
//! themselves and stop between snapshots, which never leaves a step
//! partially scanned.

use heapless::Vec;

use crate::scanner::scan;
use crate::timeline::{Timeline, MAX_CHANNELS};

/// Amplitudes of every channel at one sample step
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Sample step index (also the query time)
    pub step: u32,
    /// One amplitude per channel, in timeline order
    pub amplitudes: Vec<u16, MAX_CHANNELS>,
}

/// In-progress traversal of one cycle
///
/// Cursors start at zero and only move forward, so a `Cycle` can't be
/// rewound. Start a new one for the next repetition.
#[derive(Debug, Clone)]
pub struct Cycle<'a> {
    timeline: &'a Timeline,
    /// Per-channel scan cursors, only the first `channel_count` are used
    cursors: [usize; MAX_CHANNELS],
    /// Next step to sample
    step: u32,
    /// Total steps in the cycle
    samples: u32,
}

impl<'a> Cycle<'a> {
    /// Start a cycle over `samples` steps
    pub fn new(timeline: &'a Timeline, samples: u32) -> Self {
        Self {
            timeline,
            cursors: [0; MAX_CHANNELS],
            step: 0,
            samples,
        }
    }

    /// Sample the next step
    ///
    /// Returns `None` once all steps have been produced.
    pub fn next_snapshot(&mut self) -> Option<Snapshot> {
        if self.is_complete() {
            return None;
        }

        let step = self.step;
        let mut amplitudes = Vec::new();
        for (intervals, cursor) in self.timeline.channels().zip(self.cursors.iter_mut()) {
            let (amplitude, next) = scan(intervals, *cursor, step);
            *cursor = next;
            // Timeline holds at most MAX_CHANNELS channels
            amplitudes.push(amplitude).ok()?;
        }

        self.step += 1;
        Some(Snapshot { step, amplitudes })
    }

    /// Next step to be sampled
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Total steps in the cycle
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Steps not yet sampled
    pub fn remaining(&self) -> u32 {
        self.samples.saturating_sub(self.step)
    }

    /// Check if every step has been sampled
    pub fn is_complete(&self) -> bool {
        self.step >= self.samples
    }

    /// Current scan cursor of each channel
    pub fn cursors(&self) -> &[usize] {
        &self.cursors[..self.timeline.channel_count()]
    }
}

impl Iterator for Cycle<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        self.next_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Interval;
    use std::vec::Vec as StdVec;

    fn two_channel_timeline() -> Timeline {
        Timeline::from_channels(&[
            &[Interval::new(0, 3, 5)],
            &[Interval::new(2, 2, 7), Interval::new(5, 1, 9)],
        ])
        .unwrap()
    }

    #[test]
    fn test_snapshots_in_order() {
        let timeline = two_channel_timeline();
        let snapshots: StdVec<Snapshot> = Cycle::new(&timeline, 7).collect();

        let steps: StdVec<u32> = snapshots.iter().map(|s| s.step).collect();
        assert_eq!(steps, [0, 1, 2, 3, 4, 5, 6]);

        let expected = [[5, 0], [5, 0], [5, 7], [0, 7], [0, 0], [0, 9], [0, 0]];
        for (snapshot, amplitudes) in snapshots.iter().zip(expected.iter()) {
            assert_eq!(snapshot.amplitudes.as_slice(), amplitudes);
        }
    }

    #[test]
    fn test_cursors_advance() {
        let timeline = two_channel_timeline();
        let mut cycle = Cycle::new(&timeline, 10);

        assert_eq!(cycle.cursors(), [0, 0]);
        for _ in 0..5 {
            cycle.next_snapshot();
        }
        // Step 4 sampled: channel 0 finished, channel 1 waiting on interval 1
        assert_eq!(cycle.cursors(), [1, 1]);
        assert_eq!(cycle.step(), 5);
        assert_eq!(cycle.remaining(), 5);
    }

    #[test]
    fn test_completes() {
        let timeline = two_channel_timeline();
        let mut cycle = Cycle::new(&timeline, 2);

        assert!(cycle.next_snapshot().is_some());
        assert!(cycle.next_snapshot().is_some());
        assert!(cycle.is_complete());
        assert!(cycle.next_snapshot().is_none());
        assert_eq!(cycle.step(), 2);
    }

    #[test]
    fn test_zero_samples() {
        let timeline = two_channel_timeline();
        let mut cycle = Cycle::new(&timeline, 0);

        assert!(cycle.is_complete());
        assert!(cycle.next_snapshot().is_none());
    }

    #[test]
    fn test_full_timeline() {
        let channel: &[Interval] = &[Interval::new(1, 2, 4)];
        let timeline = Timeline::from_channels(&[channel; MAX_CHANNELS]).unwrap();
        let snapshots: StdVec<Snapshot> = Cycle::new(&timeline, 4).collect();

        assert_eq!(snapshots.len(), 4);
        assert_eq!(snapshots[0].amplitudes.as_slice(), [0; MAX_CHANNELS]);
        assert_eq!(snapshots[1].amplitudes.as_slice(), [4; MAX_CHANNELS]);
        assert_eq!(snapshots[3].amplitudes.as_slice(), [0; MAX_CHANNELS]);
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = Timeline::new();
        let snapshots: StdVec<Snapshot> = Cycle::new(&timeline, 3).collect();

        assert_eq!(snapshots.len(), 3);
        assert!(snapshots.iter().all(|s| s.amplitudes.is_empty()));
    }
}
