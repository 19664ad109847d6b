//! Where blocks of samples come from.
//!
//! A [SignalSource] hands out fixed-size blocks at a fixed sample rate.
//! Sources own whatever resource they read from and release it when they are
//! dropped.
use std::convert::Infallible;

use crate::float::Float;

pub mod wav;

pub use wav::WavSource;

pub trait SignalSource<T>
where
    T: Float,
{
    type Error: std::error::Error;

    /// Samples per second of the delivered audio.
    fn sample_rate(&self) -> usize;

    /// Fill `block` with the next samples, blocking until they are available.
    /// Returns `Ok(false)` once the source is exhausted; the content of
    /// `block` is then unspecified.
    fn next_block(&mut self, block: &mut [T]) -> Result<bool, Self::Error>;
}

/// Samples already in memory, handed out as consecutive non-overlapping blocks.
/// A trailing partial block is never delivered.
pub struct BufferSource<T> {
    samples: Vec<T>,
    sample_rate: usize,
    position: usize,
}

impl<T: Float> BufferSource<T> {
    pub fn new(samples: Vec<T>, sample_rate: usize) -> Self {
        BufferSource {
            samples,
            sample_rate,
            position: 0,
        }
    }
}

impl<T: Float> SignalSource<T> for BufferSource<T> {
    type Error = Infallible;

    fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    fn next_block(&mut self, block: &mut [T]) -> Result<bool, Infallible> {
        let end = self.position + block.len();
        if end > self.samples.len() {
            return Ok(false);
        }
        block.copy_from_slice(&self.samples[self.position..end]);
        self.position = end;
        Ok(true)
    }
}
