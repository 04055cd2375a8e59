//! Amplitude sink trait

/// Consumer of amplitude snapshots
///
/// The scheduler calls [`emit`](AmplitudeSink::emit) once per sample step
/// with one amplitude per channel, in timeline channel order. What the
/// sink does with them (drive valves, print, record) is up to the
/// implementation.
///
/// An error aborts the running cycle. Sinks should not try to recover
/// internally: a half-actuated gait is not a safe state to continue from.
pub trait AmplitudeSink {
    /// Error reported when a snapshot can't be applied
    type Error;

    /// Apply the amplitudes for sample `step`
    fn emit(&mut self, step: u32, amplitudes: &[u16]) -> Result<(), Self::Error>;
}

impl<S: AmplitudeSink + ?Sized> AmplitudeSink for &mut S {
    type Error = S::Error;

    fn emit(&mut self, step: u32, amplitudes: &[u16]) -> Result<(), Self::Error> {
        (**self).emit(step, amplitudes)
    }
}
