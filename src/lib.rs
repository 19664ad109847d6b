//! # Pitch Tracker
//! *pitch_tracker* estimates the fundamental frequency of monophonic audio,
//! one fixed-size block at a time, and names the nearest musical note.
//!
//! The detector is built on the normalized autocorrelation of each block,
//! computed through an FFT. The highest autocorrelation peak inside the
//! configured frequency window is refined with parabolic interpolation, then
//! checked for octave errors: when the peak belongs to a multiple of the true
//! period, the period is divided back down. See
//! [AutocorrelationDetector][detector::autocorrelation::AutocorrelationDetector].
//!
//! Every block is processed independently. A block without a reliable pitch
//! (silence, or no clear periodicity) simply produces no pitch.
//!
//! # Examples
//! ```
//! use pitch_tracker::detector::autocorrelation::AutocorrelationDetector;
//! use pitch_tracker::detector::config::DetectorConfig;
//! use pitch_tracker::detector::PitchDetector;
//! use pitch_tracker::note::label_for;
//!
//! fn main() {
//!     let config = DetectorConfig::default();
//!
//!     // Signal coming from some source (microphone, generated, etc...)
//!     let dt = 1.0 / config.sample_rate as f64;
//!     let freq = 440.0;
//!     let signal: Vec<f64> = (0..config.block_size)
//!         .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!
//!     let mut detector = AutocorrelationDetector::new(config).unwrap();
//!
//!     let pitch = detector.get_pitch(&signal).unwrap();
//!
//!     println!("Frequency: {}, Quality: {}", pitch.frequency, pitch.quality);
//!     assert_eq!(label_for(pitch.frequency), Some("A4"));
//! }
//! ```

pub use detector::autocorrelation::AutocorrelationDetector;
pub use detector::config::{DetectorConfig, FrequencyRange, LagBounds};
pub use detector::internals::{PeriodEstimate, Pitch};
pub use detector::PitchDetector;
pub use error::{ConfigError, SourceError};
pub use source::SignalSource;
pub use tracker::PitchTracker;

pub mod detector;
pub mod error;
pub mod float;
pub mod note;
pub mod source;
pub mod tracker;
pub mod utils;
