//! Cycle configuration
//!
//! A cycle samples the timeline at `samples` evenly spaced steps spread
//! over `cycle_ms` of wall-clock time. A gait repeats the cycle `repeat`
//! times.
//!
//! ```toml
//! [cycle]
//! cycle_ms = 1000
//! samples = 10
//! repeat = 1
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of sample points per cycle
pub const DEFAULT_SAMPLES: u32 = 10;

/// Default cycle duration in milliseconds
pub const DEFAULT_CYCLE_MS: u32 = 1000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Cycle duration is zero
    ZeroCycleTime,
    /// Sample count is zero
    ZeroSamples,
    /// Repeat count is zero
    ZeroRepeat,
    /// TOML text could not be parsed
    Parse,
}

/// Timing parameters for one cycle (and its repetitions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CycleConfig {
    /// Wall-clock duration of one cycle in milliseconds
    pub cycle_ms: u32,
    /// Sample points per cycle
    pub samples: u32,
    /// Number of cycles per gait run
    pub repeat: u16,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_MS, DEFAULT_SAMPLES)
    }
}

impl CycleConfig {
    /// Create a single-cycle configuration
    pub const fn new(cycle_ms: u32, samples: u32) -> Self {
        Self {
            cycle_ms,
            samples,
            repeat: 1,
        }
    }

    /// Set the number of repetitions
    pub const fn with_repeat(mut self, repeat: u16) -> Self {
        self.repeat = repeat;
        self
    }

    /// Check the timing of a single cycle (`repeat` is not checked)
    pub fn validate_cycle(&self) -> Result<(), ConfigError> {
        if self.cycle_ms == 0 {
            return Err(ConfigError::ZeroCycleTime);
        }
        if self.samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        Ok(())
    }

    /// Check the configuration before running a gait
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_cycle()?;
        if self.repeat == 0 {
            return Err(ConfigError::ZeroRepeat);
        }
        Ok(())
    }

    /// Delay between consecutive samples in microseconds
    ///
    /// Saturates at `u32::MAX` for very long cycles.
    pub fn step_period_us(&self) -> u32 {
        if self.samples == 0 {
            return 0;
        }
        let period = (self.cycle_ms as u64 * 1000) / self.samples as u64;
        period.min(u32::MAX as u64) as u32
    }

    /// Parse and validate a `[cycle]` table from TOML text
    ///
    /// Missing keys (or a missing table) fall back to the defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            cycle: CycleConfig,
        }

        let doc: Document = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
        doc.cycle.validate()?;
        Ok(doc.cycle)
    }
}
