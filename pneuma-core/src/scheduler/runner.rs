//! Paced cycle execution
//!
//! Runs a [`Cycle`] in real time: each snapshot goes to the sink, then the
//! runner waits `cycle_ms / samples` before sampling the next step. There
//! is no wait after the final step, and no drift correction; elapsed time
//! is approximately the cycle duration, within timer granularity.
//!
//! Blocking runners take an [`embedded_hal::delay::DelayNs`]; async runners
//! take an [`embedded_hal_async::delay::DelayNs`] and yield to the executor
//! while waiting.

use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use super::cycle::{Cycle, Snapshot};
use crate::config::{ConfigError, CycleConfig};
use crate::timeline::Timeline;
use crate::traits::AmplitudeSink;

/// Errors that abort a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError<E> {
    /// Configuration rejected before the first step
    Config(ConfigError),
    /// Sink failed to apply the snapshot for `step`
    Sink { step: u32, error: E },
}

impl<E> From<ConfigError> for CycleError<E> {
    fn from(err: ConfigError) -> Self {
        CycleError::Config(err)
    }
}

/// Run one cycle, blocking on `delay` between steps
///
/// Only the cycle timing is validated; `config.repeat` is ignored (see
/// [`run_gait`]).
pub fn run_cycle<S, D>(
    timeline: &Timeline,
    config: &CycleConfig,
    sink: &mut S,
    delay: &mut D,
) -> Result<(), CycleError<S::Error>>
where
    S: AmplitudeSink,
    D: DelayNs,
{
    config.validate_cycle()?;
    play_cycle(timeline, config, sink, delay, false)
}

/// Run `config.repeat` cycles back to back, blocking on `delay`
///
/// The step period also separates the last step of one cycle from the
/// first step of the next, so the sample rate stays constant across the
/// whole gait.
pub fn run_gait<S, D>(
    timeline: &Timeline,
    config: &CycleConfig,
    sink: &mut S,
    delay: &mut D,
) -> Result<(), CycleError<S::Error>>
where
    S: AmplitudeSink,
    D: DelayNs,
{
    config.validate()?;

    for rep in 0..config.repeat {
        let more = rep + 1 < config.repeat;
        play_cycle(timeline, config, sink, delay, more)?;
    }

    Ok(())
}

/// Async version of [`run_cycle`]
pub async fn run_cycle_async<S, D>(
    timeline: &Timeline,
    config: &CycleConfig,
    sink: &mut S,
    delay: &mut D,
) -> Result<(), CycleError<S::Error>>
where
    S: AmplitudeSink,
    D: AsyncDelayNs,
{
    config.validate_cycle()?;
    play_cycle_async(timeline, config, sink, delay, false).await
}

/// Async version of [`run_gait`]
pub async fn run_gait_async<S, D>(
    timeline: &Timeline,
    config: &CycleConfig,
    sink: &mut S,
    delay: &mut D,
) -> Result<(), CycleError<S::Error>>
where
    S: AmplitudeSink,
    D: AsyncDelayNs,
{
    config.validate()?;

    for rep in 0..config.repeat {
        let more = rep + 1 < config.repeat;
        play_cycle_async(timeline, config, sink, delay, more).await?;
    }

    Ok(())
}

/// Play one validated cycle
///
/// `pace_last` adds the step period after the final snapshot.
fn play_cycle<S, D>(
    timeline: &Timeline,
    config: &CycleConfig,
    sink: &mut S,
    delay: &mut D,
    pace_last: bool,
) -> Result<(), CycleError<S::Error>>
where
    S: AmplitudeSink,
    D: DelayNs,
{
    let period_us = config.step_period_us();
    let mut cycle = Cycle::new(timeline, config.samples);

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "Cycle start: {} channels, {} samples, {} us/step",
        timeline.channel_count(),
        config.samples,
        period_us
    );

    while let Some(snapshot) = cycle.next_snapshot() {
        emit(sink, &snapshot)?;

        if pace_last || !cycle.is_complete() {
            delay.delay_us(period_us);
        }
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("Cycle complete");

    Ok(())
}

/// Play one validated cycle, awaiting `delay` between steps
///
/// `pace_last` adds the step period after the final snapshot.
async fn play_cycle_async<S, D>(
    timeline: &Timeline,
    config: &CycleConfig,
    sink: &mut S,
    delay: &mut D,
    pace_last: bool,
) -> Result<(), CycleError<S::Error>>
where
    S: AmplitudeSink,
    D: AsyncDelayNs,
{
    let period_us = config.step_period_us();
    let mut cycle = Cycle::new(timeline, config.samples);

    #[cfg(feature = "defmt")]
    defmt::debug!(
        "Cycle start: {} channels, {} samples, {} us/step",
        timeline.channel_count(),
        config.samples,
        period_us
    );

    while let Some(snapshot) = cycle.next_snapshot() {
        emit(sink, &snapshot)?;

        if pace_last || !cycle.is_complete() {
            delay.delay_us(period_us).await;
        }
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("Cycle complete");

    Ok(())
}

/// Hand one snapshot to the sink
fn emit<S: AmplitudeSink>(sink: &mut S, snapshot: &Snapshot) -> Result<(), CycleError<S::Error>> {
    #[cfg(feature = "defmt")]
    defmt::trace!("Step {}: {}", snapshot.step, snapshot.amplitudes.as_slice());

    sink.emit(snapshot.step, &snapshot.amplitudes)
        .map_err(|error| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Sink failed at step {}, aborting cycle", snapshot.step);

            CycleError::Sink {
                step: snapshot.step,
                error,
            }
        })
}
