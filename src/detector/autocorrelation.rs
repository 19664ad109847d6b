//! Autocorrelation pitch detection with octave error correction.
//!
//! For every block the detector
//!
//!   1. computes the normalized autocorrelation _r(t)_ of the block,
//!   2. picks the lag with the largest _r(t)_ between the configured lag bounds
//!      and rejects it unless it is a strict local maximum,
//!   3. refines that lag with parabolic interpolation,
//!   4. divides the refined period by the largest integer whose submultiples
//!      are all strongly correlated (see [correct_octave_errors]),
//!   5. converts the period to a frequency.
//!
//! Blocks are independent: nothing computed for one block influences the next.
use crate::detector::config::{DetectorConfig, LagBounds};
use crate::detector::correlation::{Autocorrelation, DirectAutocorrelation, FftAutocorrelation};
use crate::detector::internals::{PeriodEstimate, Pitch};
use crate::detector::PitchDetector;
use crate::error::ConfigError;
use crate::float::{constant, count, Float};
use crate::utils::buffer::new_real_buffer;
use crate::utils::octave::correct_octave_errors;
use crate::utils::peak::{locate_peak, refine_peak};

pub struct AutocorrelationDetector<T, A = FftAutocorrelation<T>>
where
    T: Float,
    A: Autocorrelation<T>,
{
    config: DetectorConfig,
    bounds: LagBounds,
    engine: A,
    autocorr: Vec<T>,
    sample_rate: T,
    octave_threshold: T,
    power_threshold: T,
}

impl<T> AutocorrelationDetector<T>
where
    T: Float,
{
    /// Build a detector on the FFT engine.
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_engine(config, FftAutocorrelation::new(config.block_size))
    }
}

impl<T> AutocorrelationDetector<T, DirectAutocorrelation<T>>
where
    T: Float,
{
    /// Build a detector on the direct summation engine. This is much slower
    /// and mostly useful to cross-check the FFT engine.
    pub fn direct(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::with_engine(config, DirectAutocorrelation::new(config.block_size))
    }
}

impl<T, A> AutocorrelationDetector<T, A>
where
    T: Float,
    A: Autocorrelation<T>,
{
    pub fn with_engine(config: DetectorConfig, engine: A) -> Result<Self, ConfigError> {
        let bounds = config.validate()?;
        if engine.size() != config.block_size {
            return Err(ConfigError::EngineSizeMismatch {
                engine: engine.size(),
                config: config.block_size,
            });
        }

        log::debug!(
            "autocorrelation detector: {} samples at {} Hz, lags {}..={}",
            config.block_size,
            config.sample_rate,
            bounds.min_lag,
            bounds.max_lag
        );

        Ok(AutocorrelationDetector {
            config,
            bounds,
            engine,
            autocorr: new_real_buffer(bounds.autocorrelation_len()),
            sample_rate: count(config.sample_rate),
            octave_threshold: constant(config.octave_threshold),
            power_threshold: constant(config.power_threshold),
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn bounds(&self) -> LagBounds {
        self.bounds
    }

    /// The normalized autocorrelation of the last block, for lags
    /// `0..=max_lag + 1`. All zeros after a silent block.
    pub fn autocorrelation(&self) -> &[T] {
        &self.autocorr
    }

    /// Estimate the period of `signal` in samples. `None` if the block is
    /// silent or has no trustworthy periodicity peak.
    ///
    /// Panics if `signal` does not hold exactly `block_size` samples.
    pub fn estimate_period(&mut self, signal: &[T]) -> Option<PeriodEstimate<T>> {
        assert_eq!(signal.len(), self.config.block_size);

        if !self
            .engine
            .normalized_autocorrelation(signal, self.power_threshold, &mut self.autocorr)
        {
            log::trace!("no pitch: silent block");
            return None;
        }

        let nac = &self.autocorr;
        let best_lag = match locate_peak(nac, self.bounds) {
            Some(lag) => lag,
            None => {
                log::trace!("no pitch: autocorrelation maximum is not a peak");
                return None;
            }
        };
        let quality = nac[best_lag];
        let estimate = refine_peak(nac, best_lag);
        let period = correct_octave_errors(
            nac,
            best_lag,
            estimate,
            self.bounds.min_lag,
            self.octave_threshold,
        );

        match period > T::zero() {
            true => Some(PeriodEstimate { period, quality }),
            false => {
                log::trace!("no pitch: degenerate period {}", period);
                None
            }
        }
    }

    /// The fundamental frequency of `signal` in Hz, or zero when no pitch is
    /// detected in this block.
    pub fn detect_fundamental_frequency(&mut self, signal: &[T]) -> T {
        self.get_pitch(signal)
            .map_or(T::zero(), |pitch| pitch.frequency)
    }
}

impl<T, A> PitchDetector<T> for AutocorrelationDetector<T, A>
where
    T: Float,
    A: Autocorrelation<T>,
{
    fn get_pitch(&mut self, signal: &[T]) -> Option<Pitch<T>> {
        let estimate = self.estimate_period(signal)?;
        let pitch = Pitch {
            frequency: self.sample_rate / estimate.period,
            quality: estimate.quality,
        };
        log::trace!(
            "pitch {} Hz (period {}, quality {})",
            pitch.frequency,
            estimate.period,
            pitch.quality
        );
        Some(pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::config::FrequencyRange;

    fn small_config() -> DetectorConfig {
        DetectorConfig {
            sample_rate: 8000,
            block_size: 512,
            frequency_range: FrequencyRange::new(100.0, 1000.0).unwrap(),
            ..DetectorConfig::default()
        }
    }

    fn sin_wave(freq: f64, size: usize, sample_rate: usize) -> Vec<f64> {
        let dx = 2.0 * std::f64::consts::PI * freq / sample_rate as f64;
        (0..size).map(|i| (i as f64 * dx).sin()).collect()
    }

    #[test]
    fn derives_bounds_on_construction() {
        let detector = AutocorrelationDetector::<f64>::new(small_config()).unwrap();
        assert_eq!(detector.bounds(), LagBounds { min_lag: 8, max_lag: 79 });
        assert_eq!(detector.autocorrelation().len(), 81);
    }

    #[test]
    fn invalid_configuration_fails_fast() {
        let config = DetectorConfig {
            block_size: 64,
            ..small_config()
        };
        assert!(matches!(
            AutocorrelationDetector::<f64>::new(config),
            Err(ConfigError::BlockTooShort { .. })
        ));
    }

    #[test]
    fn engine_must_match_block_size() {
        let result = AutocorrelationDetector::<f64, _>::with_engine(
            small_config(),
            FftAutocorrelation::new(256),
        );
        assert!(matches!(
            result,
            Err(ConfigError::EngineSizeMismatch {
                engine: 256,
                config: 512
            })
        ));
    }

    #[test]
    fn estimates_period_of_a_sine() {
        let mut detector = AutocorrelationDetector::new(small_config()).unwrap();
        let signal = sin_wave(250.0, 512, 8000);
        let estimate = detector.estimate_period(&signal).unwrap();
        assert!((estimate.period - 32.0).abs() < 0.1);
        assert!(estimate.quality > 0.99);
    }

    #[test]
    fn silence_reports_zero() {
        let mut detector = AutocorrelationDetector::<f64>::new(small_config()).unwrap();
        assert_eq!(detector.detect_fundamental_frequency(&[0.0; 512]), 0.0);
        assert!(detector.autocorrelation().iter().all(|&r| r == 0.0));
    }

    #[test]
    fn direct_engine_agrees() {
        let signal = sin_wave(330.0, 512, 8000);
        let mut fast = AutocorrelationDetector::new(small_config()).unwrap();
        let mut slow = AutocorrelationDetector::direct(small_config()).unwrap();
        let a = fast.get_pitch(&signal).unwrap();
        let b = slow.get_pitch(&signal).unwrap();
        assert!((a.frequency - b.frequency).abs() < 1e-6);
        assert!((a.quality - b.quality).abs() < 1e-9);
    }

    #[test]
    #[should_panic]
    fn wrong_block_length_panics() {
        let mut detector = AutocorrelationDetector::<f64>::new(small_config()).unwrap();
        detector.get_pitch(&[0.0; 100]);
    }
}
