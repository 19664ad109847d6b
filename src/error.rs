use thiserror::Error;

/// Invalid detector or tracker configuration. These are reported when the
/// detector is built, before any block is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid frequency range: min {min} Hz, max {max} Hz")]
    InvalidFrequencyRange { min: f64, max: f64 },

    #[error("sample rate must be positive")]
    ZeroSampleRate,

    #[error("a max frequency of {max} Hz leaves no valid minimum lag at {sample_rate} Hz")]
    NoMinimumLag { max: f64, sample_rate: usize },

    #[error("empty lag range: min lag {min_lag} is not below max lag {max_lag}")]
    EmptyLagRange { min_lag: usize, max_lag: usize },

    #[error("a block of {block_size} samples cannot observe a period of {max_lag} samples")]
    BlockTooShort { block_size: usize, max_lag: usize },

    #[error("octave threshold must lie in (0, 1], got {0}")]
    InvalidOctaveThreshold(f64),

    #[error("power threshold must be finite and non-negative, got {0}")]
    InvalidPowerThreshold(f64),

    #[error("autocorrelation engine expects blocks of {engine} samples, configuration uses {config}")]
    EngineSizeMismatch { engine: usize, config: usize },

    #[error("source delivers {source_rate} Hz audio, detector is configured for {detector_rate} Hz")]
    SampleRateMismatch {
        source_rate: usize,
        detector_rate: usize,
    },
}

/// Failure while acquiring audio from a [SignalSource](crate::source::SignalSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Wav(#[from] hound::Error),

    #[error("unsupported WAV layout: {0}")]
    Unsupported(String),
}
