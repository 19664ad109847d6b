//! Detector configuration and the lag bounds derived from it.
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The musically relevant detection window, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub min: f64,
    pub max: f64,
}

impl FrequencyRange {
    /// The range of an 88-key piano, A0 to C8.
    pub const PIANO: FrequencyRange = FrequencyRange {
        min: 27.5,
        max: 4186.0,
    };

    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let range = FrequencyRange { min, max };
        range.validate()?;
        Ok(range)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let valid =
            self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min < self.max;
        if !valid {
            return Err(ConfigError::InvalidFrequencyRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for FrequencyRange {
    fn default() -> Self {
        FrequencyRange::PIANO
    }
}

/// Candidate periods, in samples, that the detector searches.
///
/// The bounds are widened by 1 Hz on each side of the frequency range:
///
/// > min_lag = floor(sample_rate / (max - 1))
/// >
/// > max_lag = floor(sample_rate / (min + 1))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LagBounds {
    pub min_lag: usize,
    pub max_lag: usize,
}

impl LagBounds {
    pub fn from_range(sample_rate: usize, range: FrequencyRange) -> Result<Self, ConfigError> {
        range.validate()?;
        if sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }

        let rate = sample_rate as f64;
        let min_lag = (rate / (range.max - 1.0)).floor();
        if !(min_lag.is_finite() && min_lag >= 1.0) {
            return Err(ConfigError::NoMinimumLag {
                max: range.max,
                sample_rate,
            });
        }
        let min_lag = min_lag as usize;
        let max_lag = (rate / (range.min + 1.0)).floor() as usize;

        if min_lag >= max_lag {
            return Err(ConfigError::EmptyLagRange { min_lag, max_lag });
        }
        Ok(LagBounds { min_lag, max_lag })
    }

    pub fn lags(&self) -> RangeInclusive<usize> {
        self.min_lag..=self.max_lag
    }

    /// Number of autocorrelation values the detector needs: one past `max_lag`
    /// so the peak at `max_lag` can be validated.
    pub fn autocorrelation_len(&self) -> usize {
        self.max_lag + 2
    }
}

/// Everything a detector needs to know up front. The configuration is fixed
/// when the detector is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Samples per second of the incoming audio.
    pub sample_rate: usize,
    /// Number of samples in every block handed to the detector.
    pub block_size: usize,
    pub frequency_range: FrequencyRange,
    /// A submultiple of the detected period is accepted when the
    /// autocorrelation there reaches this fraction of the peak value.
    pub octave_threshold: f64,
    /// Blocks whose energy (after mean removal) does not exceed this value
    /// are treated as silence.
    pub power_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            sample_rate: 50_000,
            block_size: 4096,
            frequency_range: FrequencyRange::PIANO,
            octave_threshold: 0.9,
            power_threshold: 1e-9,
        }
    }
}

impl DetectorConfig {
    /// Check every invariant of the configuration and return the lag bounds
    /// it implies.
    pub fn validate(&self) -> Result<LagBounds, ConfigError> {
        let bounds = LagBounds::from_range(self.sample_rate, self.frequency_range)?;
        if bounds.max_lag >= self.block_size {
            return Err(ConfigError::BlockTooShort {
                block_size: self.block_size,
                max_lag: bounds.max_lag,
            });
        }
        if !(self.octave_threshold > 0.0 && self.octave_threshold <= 1.0) {
            return Err(ConfigError::InvalidOctaveThreshold(self.octave_threshold));
        }
        if !(self.power_threshold.is_finite() && self.power_threshold >= 0.0) {
            return Err(ConfigError::InvalidPowerThreshold(self.power_threshold));
        }
        Ok(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piano_bounds_at_50khz() {
        let bounds = LagBounds::from_range(50_000, FrequencyRange::PIANO).unwrap();
        assert_eq!(bounds.min_lag, 11);
        assert_eq!(bounds.max_lag, 1754);
        assert_eq!(bounds.autocorrelation_len(), 1756);
    }

    #[test]
    fn default_config_is_valid() {
        let bounds = DetectorConfig::default().validate().unwrap();
        assert_eq!(bounds, LagBounds { min_lag: 11, max_lag: 1754 });
    }

    #[test]
    fn rejects_inverted_range() {
        assert_eq!(
            FrequencyRange::new(440.0, 220.0),
            Err(ConfigError::InvalidFrequencyRange {
                min: 440.0,
                max: 220.0
            })
        );
        assert!(FrequencyRange::new(0.0, 220.0).is_err());
        assert!(FrequencyRange::new(f64::NAN, 220.0).is_err());
    }

    #[test]
    fn rejects_short_blocks() {
        let config = DetectorConfig {
            block_size: 1024,
            ..DetectorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlockTooShort {
                block_size: 1024,
                max_lag: 1754
            })
        );
    }

    #[test]
    fn rejects_ranges_without_lags() {
        // Every lag bound collapses to the same sample.
        let range = FrequencyRange::new(3000.0, 3100.0).unwrap();
        assert_eq!(
            LagBounds::from_range(8000, range),
            Err(ConfigError::EmptyLagRange {
                min_lag: 2,
                max_lag: 2
            })
        );

        let range = FrequencyRange::new(100.0, 20_000.0).unwrap();
        assert_eq!(
            LagBounds::from_range(8000, range),
            Err(ConfigError::NoMinimumLag {
                max: 20_000.0,
                sample_rate: 8000
            })
        );
        assert_eq!(
            LagBounds::from_range(0, FrequencyRange::PIANO),
            Err(ConfigError::ZeroSampleRate)
        );
    }

    #[test]
    fn rejects_bad_thresholds() {
        let config = DetectorConfig {
            octave_threshold: 1.5,
            ..DetectorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidOctaveThreshold(1.5))
        );

        let config = DetectorConfig {
            power_threshold: -1.0,
            ..DetectorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPowerThreshold(-1.0))
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{ "sample_rate": 44100, "block_size": 8192 }"#).unwrap();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.block_size, 8192);
        assert_eq!(config.frequency_range, FrequencyRange::PIANO);
        assert_eq!(config.octave_threshold, 0.9);
    }
}
