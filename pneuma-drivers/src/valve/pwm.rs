//! Proportional valve bank driven by PWM
//!
//! Each channel's amplitude is mapped linearly onto the PWM duty cycle:
//! 0 is fully closed and `full_scale` (or anything above it) is fully
//! open.
//!
//! # Usage
//!
//! ```ignore
//! let mut bank = PwmValveBank::new([pwm_a, pwm_b], 100);
//! run_cycle(&timeline, &config, &mut bank, &mut delay)?;
//! bank.all_off()?;
//! ```

use embedded_hal::pwm::SetDutyCycle;
use pneuma_core::AmplitudeSink;

use super::{check_channels, ValveError};

/// Bank of PWM-driven proportional valves
pub struct PwmValveBank<P, const N: usize> {
    valves: [P; N],
    /// Amplitude that maps to 100% duty
    full_scale: u16,
    /// If true, valve open = PWM low
    inverted: bool,
    /// Last applied (clamped) amplitude per channel
    levels: [u16; N],
}

impl<P: SetDutyCycle, const N: usize> PwmValveBank<P, N> {
    /// Create a new bank with active-high outputs
    ///
    /// A `full_scale` of 0 is treated as 1.
    pub fn new(valves: [P; N], full_scale: u16) -> Self {
        Self {
            valves,
            full_scale: full_scale.max(1),
            inverted: false,
            levels: [0; N],
        }
    }

    /// Create a new bank with active-low outputs
    pub fn new_inverted(valves: [P; N], full_scale: u16) -> Self {
        let mut bank = Self::new(valves, full_scale);
        bank.inverted = true;
        bank
    }

    /// Amplitude that maps to 100% duty
    pub fn full_scale(&self) -> u16 {
        self.full_scale
    }

    /// Last applied amplitude per channel (clamped to full scale)
    pub fn levels(&self) -> &[u16; N] {
        &self.levels
    }

    /// Close every valve
    pub fn all_off(&mut self) -> Result<(), ValveError<P::Error>> {
        for channel in 0..N {
            self.apply(channel, 0)?;
        }
        Ok(())
    }

    /// Release the PWM outputs
    pub fn release(self) -> [P; N] {
        self.valves
    }

    fn apply(&mut self, channel: usize, amplitude: u16) -> Result<(), ValveError<P::Error>> {
        let level = amplitude.min(self.full_scale);
        let duty = if self.inverted {
            self.full_scale - level
        } else {
            level
        };

        self.valves[channel]
            .set_duty_cycle_fraction(duty, self.full_scale)
            .map_err(|error| ValveError::Output { channel, error })?;
        self.levels[channel] = level;
        Ok(())
    }
}

impl<P: SetDutyCycle, const N: usize> AmplitudeSink for PwmValveBank<P, N> {
    type Error = ValveError<P::Error>;

    fn emit(&mut self, _step: u32, amplitudes: &[u16]) -> Result<(), Self::Error> {
        check_channels::<P::Error, N>(amplitudes)?;

        for (channel, &amplitude) in amplitudes.iter().enumerate() {
            self.apply(channel, amplitude)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{Error, ErrorKind, ErrorType};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockPwmError;

    impl Error for MockPwmError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Mock PWM channel with a 0..=1000 duty range
    struct MockPwm {
        duty: u16,
        broken: bool,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                duty: 0,
                broken: false,
            }
        }

        fn broken() -> Self {
            Self {
                duty: 0,
                broken: true,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = MockPwmError;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), MockPwmError> {
            if self.broken {
                return Err(MockPwmError);
            }
            self.duty = duty;
            Ok(())
        }
    }

    fn duties<const N: usize>(bank: PwmValveBank<MockPwm, N>) -> [u16; N] {
        bank.release().map(|pwm| pwm.duty)
    }

    #[test]
    fn test_amplitude_to_duty() {
        let mut bank = PwmValveBank::new([MockPwm::new(), MockPwm::new(), MockPwm::new()], 100);

        bank.emit(0, &[0, 50, 100]).unwrap();

        assert_eq!(bank.levels(), &[0, 50, 100]);
        assert_eq!(duties(bank), [0, 500, 1000]);
    }

    #[test]
    fn test_amplitude_clamped() {
        let mut bank = PwmValveBank::new([MockPwm::new()], 10);

        bank.emit(0, &[250]).unwrap();

        assert_eq!(bank.levels(), &[10]);
        assert_eq!(duties(bank), [1000]);
    }

    #[test]
    fn test_inverted() {
        let mut bank = PwmValveBank::new_inverted([MockPwm::new(), MockPwm::new()], 100);

        bank.emit(0, &[0, 25]).unwrap();

        assert_eq!(duties(bank), [1000, 750]);
    }

    #[test]
    fn test_zero_full_scale() {
        let mut bank = PwmValveBank::new([MockPwm::new()], 0);
        assert_eq!(bank.full_scale(), 1);

        bank.emit(0, &[1]).unwrap();
        assert_eq!(duties(bank), [1000]);
    }

    #[test]
    fn test_channel_mismatch() {
        let mut bank = PwmValveBank::new([MockPwm::new(), MockPwm::new()], 100);

        let result = bank.emit(0, &[50]);

        assert_eq!(
            result,
            Err(ValveError::ChannelMismatch {
                expected: 2,
                actual: 1
            })
        );
        // Nothing applied
        assert_eq!(duties(bank), [0, 0]);
    }

    #[test]
    fn test_output_error() {
        let mut bank = PwmValveBank::new([MockPwm::new(), MockPwm::broken()], 100);

        let result = bank.emit(0, &[10, 10]);

        assert_eq!(
            result,
            Err(ValveError::Output {
                channel: 1,
                error: MockPwmError
            })
        );
    }

    #[test]
    fn test_drives_cycle() {
        use pneuma_core::{run_cycle, CycleConfig, Interval, Timeline};

        struct NoDelay;

        impl embedded_hal::delay::DelayNs for NoDelay {
            fn delay_ns(&mut self, _ns: u32) {}
        }

        let timeline = Timeline::from_channels(&[
            &[Interval::new(0, 3, 100)],
            &[Interval::new(2, 2, 40), Interval::new(5, 1, 90)],
        ])
        .unwrap();
        let mut bank = PwmValveBank::new([MockPwm::new(), MockPwm::new()], 100);

        // Stop after step 5, while channel 1 is in its second interval
        run_cycle(&timeline, &CycleConfig::new(60, 6), &mut bank, &mut NoDelay).unwrap();

        assert_eq!(bank.levels(), &[0, 90]);
        assert_eq!(duties(bank), [0, 900]);
    }

    #[test]
    fn test_all_off() {
        let mut bank = PwmValveBank::new([MockPwm::new(), MockPwm::new()], 100);

        bank.emit(0, &[80, 40]).unwrap();
        bank.all_off().unwrap();

        assert_eq!(bank.levels(), &[0, 0]);
        assert_eq!(duties(bank), [0, 0]);
    }
}
