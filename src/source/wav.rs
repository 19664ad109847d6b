use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::SourceError;
use crate::float::{constant, Float};
use crate::source::SignalSource;

/// Blocks read from a WAV stream. Integer samples are scaled to [-1, 1) and
/// multi-channel frames are averaged down to mono, delivered as `T`.
pub struct WavSource<T, R: Read = BufReader<File>> {
    reader: WavReader<R>,
    channels: usize,
    sample_rate: usize,
    format: SampleFormat,
    scale: f64,
    sample: PhantomData<T>,
}

impl<T: Float> WavSource<T, BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let reader = WavReader::open(path)?;
        Self::from_wav_reader(reader)
    }
}

impl<T: Float, R: Read> WavSource<T, R> {
    pub fn new(reader: R) -> Result<Self, SourceError> {
        Self::from_wav_reader(WavReader::new(reader)?)
    }

    fn from_wav_reader(reader: WavReader<R>) -> Result<Self, SourceError> {
        let spec = reader.spec();
        if spec.channels == 0 {
            return Err(SourceError::Unsupported("no channels".into()));
        }
        let scale = match spec.sample_format {
            SampleFormat::Float => 1.0,
            SampleFormat::Int if (1..=32).contains(&spec.bits_per_sample) => {
                (1u64 << (spec.bits_per_sample - 1)) as f64
            }
            SampleFormat::Int => {
                return Err(SourceError::Unsupported(format!(
                    "{} bits per sample",
                    spec.bits_per_sample
                )))
            }
        };

        log::debug!(
            "wav source: {} Hz, {} channel(s), {} bit {:?}",
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format
        );

        Ok(WavSource {
            reader,
            channels: spec.channels as usize,
            sample_rate: spec.sample_rate as usize,
            format: spec.sample_format,
            scale,
            sample: PhantomData,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

/// Average `channels` consecutive samples into each slot of `block`.
/// Returns the number of slots filled.
fn fill_mono<T, I>(samples: I, channels: usize, block: &mut [T]) -> Result<usize, hound::Error>
where
    T: Float,
    I: Iterator<Item = Result<f64, hound::Error>>,
{
    let mut filled = 0;
    let mut frame = 0.0;
    for (i, sample) in samples.take(block.len() * channels).enumerate() {
        frame += sample?;
        if (i + 1) % channels == 0 {
            block[filled] = constant(frame / channels as f64);
            filled += 1;
            frame = 0.0;
        }
    }
    Ok(filled)
}

impl<T: Float, R: Read> SignalSource<T> for WavSource<T, R> {
    type Error = SourceError;

    fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    fn next_block(&mut self, block: &mut [T]) -> Result<bool, SourceError> {
        let channels = self.channels;
        let scale = self.scale;
        let filled = match self.format {
            SampleFormat::Float => fill_mono(
                self.reader.samples::<f32>().map(|s| s.map(f64::from)),
                channels,
                block,
            )?,
            SampleFormat::Int => fill_mono(
                self.reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| f64::from(v) / scale)),
                channels,
                block,
            )?,
        };

        if filled < block.len() {
            if filled > 0 {
                log::debug!("wav source: dropping trailing partial block of {} frames", filled);
            }
            return Ok(false);
        }
        Ok(true)
    }
}
