//! The block-by-block tracking loop.
//!
//! [PitchTracker] pulls a block from its source, runs the detector over it and
//! yields the result, one block per call to `next`. Acquisition and detection
//! never overlap, so detection time adds to the time between blocks.
use crate::detector::autocorrelation::AutocorrelationDetector;
use crate::detector::correlation::{Autocorrelation, FftAutocorrelation};
use crate::detector::internals::Pitch;
use crate::detector::PitchDetector;
use crate::error::ConfigError;
use crate::float::Float;
use crate::source::SignalSource;
use crate::utils::buffer::new_real_buffer;

pub struct PitchTracker<T, S, A = FftAutocorrelation<T>>
where
    T: Float,
    S: SignalSource<T>,
    A: Autocorrelation<T>,
{
    detector: AutocorrelationDetector<T, A>,
    source: S,
    block: Vec<T>,
    done: bool,
}

impl<T, S, A> PitchTracker<T, S, A>
where
    T: Float,
    S: SignalSource<T>,
    A: Autocorrelation<T>,
{
    /// Attach `detector` to `source`. Fails if the source does not deliver
    /// audio at the rate the detector was configured for.
    pub fn new(detector: AutocorrelationDetector<T, A>, source: S) -> Result<Self, ConfigError> {
        let detector_rate = detector.config().sample_rate;
        let source_rate = source.sample_rate();
        if source_rate != detector_rate {
            return Err(ConfigError::SampleRateMismatch {
                source_rate,
                detector_rate,
            });
        }

        let block = new_real_buffer(detector.config().block_size);
        Ok(PitchTracker {
            detector,
            source,
            block,
            done: false,
        })
    }

    /// The most recently acquired block.
    pub fn block(&self) -> &[T] {
        &self.block
    }

    pub fn detector(&self) -> &AutocorrelationDetector<T, A> {
        &self.detector
    }

    /// Detach the detector from its source, e.g. to attach it to a new one.
    pub fn into_parts(self) -> (AutocorrelationDetector<T, A>, S) {
        (self.detector, self.source)
    }
}

impl<T, S, A> Iterator for PitchTracker<T, S, A>
where
    T: Float,
    S: SignalSource<T>,
    A: Autocorrelation<T>,
{
    /// `Ok(None)` for a block without a detectable pitch.
    type Item = Result<Option<Pitch<T>>, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.next_block(&mut self.block) {
            Ok(true) => Some(Ok(self.detector.get_pitch(&self.block))),
            Ok(false) => {
                log::debug!("tracker: source exhausted");
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
