use crate::float::Float;
use crate::utils::buffer::{new_real_buffer, remove_mean, running_energy};

/// A detected pitch: the frequency in Hz and the normalized autocorrelation
/// at the chosen peak, which serves as a confidence measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch<T>
where
    T: Float,
{
    pub frequency: T,
    pub quality: T,
}

/// A period in (fractional) samples and its quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodEstimate<T>
where
    T: Float,
{
    pub period: T,
    pub quality: T,
}

/// Buffers shared by every autocorrelation engine. They are allocated once
/// for a fixed block size and overwritten by every call to [prepare].
///
/// [prepare]: DetectorInternals::prepare
pub struct DetectorInternals<T>
where
    T: Float,
{
    pub size: usize,
    /// The last block with its mean removed.
    pub centered: Vec<T>,
    head_energy: Vec<T>,
    tail_energy: Vec<T>,
}

impl<T> DetectorInternals<T>
where
    T: Float,
{
    pub fn new(size: usize) -> Self {
        DetectorInternals {
            size,
            centered: new_real_buffer(size),
            head_energy: new_real_buffer(size + 1),
            tail_energy: new_real_buffer(size + 1),
        }
    }

    /// Center `signal` and tabulate its running energy. Returns the energy of
    /// the centered block.
    pub fn prepare(&mut self, signal: &[T]) -> T {
        assert_eq!(signal.len(), self.size);
        remove_mean(signal, &mut self.centered);
        running_energy(&self.centered, &mut self.head_energy, &mut self.tail_energy);
        self.head_energy[self.size]
    }

    /// Geometric mean of the energies of the two regions that overlap when
    /// the block is shifted by `lag`. Zero once the regions no longer overlap.
    pub fn overlap_energy(&self, lag: usize) -> T {
        if lag >= self.size {
            return T::zero();
        }
        self.head_energy[self.size - lag].sqrt() * self.tail_energy[lag].sqrt()
    }
}

/// Scale a raw autocorrelation value by the energy of its overlap region.
pub fn normalize<T: Float>(raw: T, overlap_energy: T) -> T {
    match overlap_energy > T::zero() {
        true => raw / overlap_energy,
        false => T::zero(),
    }
}

/// Whether a block with `energy` carries any signal at all. NaN energy does not.
pub fn has_signal<T: Float>(energy: T, power_threshold: T) -> bool {
    energy > power_threshold
}
