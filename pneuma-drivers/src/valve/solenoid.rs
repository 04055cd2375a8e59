//! On/off solenoid valve bank
//!
//! Each channel drives one GPIO (directly or via a MOSFET/relay). A
//! channel is energised while its amplitude is above the threshold.

use embedded_hal::digital::OutputPin;
use pneuma_core::AmplitudeSink;

use super::{check_channels, ValveError};

/// Bank of on/off solenoid valves
pub struct SolenoidBank<P, const N: usize> {
    pins: [P; N],
    /// Amplitudes at or below this keep the valve closed
    threshold: u16,
    /// If true, valve open = pin LOW
    inverted: bool,
    /// Current logical state per channel (true = open)
    open: [bool; N],
}

impl<P: OutputPin, const N: usize> SolenoidBank<P, N> {
    /// Create a new bank with active-high outputs and threshold 0
    ///
    /// All valves are driven closed on creation.
    pub fn new(pins: [P; N]) -> Result<Self, ValveError<P::Error>> {
        Self::with_options(pins, 0, false)
    }

    /// Create a new bank with an explicit threshold and polarity
    ///
    /// # Arguments
    /// - `threshold`: amplitudes above this open the valve
    /// - `inverted`: if true, a valve is open when its pin is LOW
    pub fn with_options(
        pins: [P; N],
        threshold: u16,
        inverted: bool,
    ) -> Result<Self, ValveError<P::Error>> {
        let mut bank = Self {
            pins,
            threshold,
            inverted,
            open: [false; N],
        };
        bank.all_off()?;
        Ok(bank)
    }

    /// Current open/closed state per channel
    pub fn open(&self) -> &[bool; N] {
        &self.open
    }

    /// Close every valve
    pub fn all_off(&mut self) -> Result<(), ValveError<P::Error>> {
        for channel in 0..N {
            self.set_open(channel, false)?;
        }
        Ok(())
    }

    /// Release the GPIO pins
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn set_open(&mut self, channel: usize, open: bool) -> Result<(), ValveError<P::Error>> {
        let pin = &mut self.pins[channel];
        let result = if open != self.inverted {
            pin.set_high()
        } else {
            pin.set_low()
        };
        result.map_err(|error| ValveError::Output { channel, error })?;

        self.open[channel] = open;
        Ok(())
    }
}

impl<P: OutputPin, const N: usize> AmplitudeSink for SolenoidBank<P, N> {
    type Error = ValveError<P::Error>;

    fn emit(&mut self, _step: u32, amplitudes: &[u16]) -> Result<(), Self::Error> {
        check_channels::<P::Error, N>(amplitudes)?;

        for (channel, &amplitude) in amplitudes.iter().enumerate() {
            self.set_open(channel, amplitude > self.threshold)?;
        }
        Ok(())
    }
}
