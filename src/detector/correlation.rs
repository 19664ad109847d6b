//! Normalized autocorrelation engines.
//!
//! For a block _x_ with its mean removed (_c_), both engines compute
//!
//! > r(t) = sum_{i} c_i c_{i+t} / sqrt( sum_{i<N-t} c_i^2 * sum_{i>=t} c_i^2 )
//!
//! so every lag is normalized by the energy of the region that overlaps at
//! that lag, and _r(0) = 1_. [FftAutocorrelation] obtains the numerator from
//! the power spectrum (Wiener-Khinchin) and the denominators from running sums,
//! which makes it _O(N log N)_. [DirectAutocorrelation] evaluates the
//! definition literally in _O(N * lags)_ and exists as a reference.
//!
//! Dividing every lag by _r(0)_ alone, the other common convention, scales lag
//! _t_ by roughly _(N - t) / N_. The shortest lags in the search window then
//! outscore the true period of low notes, so that convention is not used here.
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::detector::internals::{has_signal, normalize, DetectorInternals};
use crate::float::{count, Float};
use crate::utils::buffer::{copy_real_to_complex, modulus_squared, new_complex_buffer, square_sum};

pub trait Autocorrelation<T>
where
    T: Float,
{
    /// Number of samples per block this engine was built for.
    fn size(&self) -> usize;

    /// Write the normalized autocorrelation of `signal` for lags
    /// `0..result.len()` into `result`.
    ///
    /// Returns `false` and zeroes `result` when the energy of the centered
    /// block does not exceed `power_threshold`.
    fn normalized_autocorrelation(
        &mut self,
        signal: &[T],
        power_threshold: T,
        result: &mut [T],
    ) -> bool;
}

/// Autocorrelation through a zero-padded FFT. Plans and buffers are created
/// once in [FftAutocorrelation::new].
pub struct FftAutocorrelation<T>
where
    T: Float,
{
    internals: DetectorInternals<T>,
    fft: Arc<dyn Fft<T>>,
    inv_fft: Arc<dyn Fft<T>>,
    spectrum: Vec<Complex<T>>,
    scratch: Vec<Complex<T>>,
}

impl<T> FftAutocorrelation<T>
where
    T: Float,
{
    pub fn new(size: usize) -> Self {
        // Padding to at least 2N - 1 keeps the circular correlation from wrapping.
        let fft_size = (2 * size).saturating_sub(1).max(1).next_power_of_two();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let inv_fft = planner.plan_fft_inverse(fft_size);
        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(inv_fft.get_inplace_scratch_len());

        FftAutocorrelation {
            internals: DetectorInternals::new(size),
            fft,
            inv_fft,
            spectrum: new_complex_buffer(fft_size),
            scratch: new_complex_buffer(scratch_len),
        }
    }

    pub fn fft_size(&self) -> usize {
        self.spectrum.len()
    }
}

impl<T> Autocorrelation<T> for FftAutocorrelation<T>
where
    T: Float,
{
    fn size(&self) -> usize {
        self.internals.size
    }

    fn normalized_autocorrelation(
        &mut self,
        signal: &[T],
        power_threshold: T,
        result: &mut [T],
    ) -> bool {
        assert!(result.len() <= self.spectrum.len());

        let energy = self.internals.prepare(signal);
        if !has_signal(energy, power_threshold) {
            result.iter_mut().for_each(|r| *r = T::zero());
            return false;
        }

        copy_real_to_complex(&self.internals.centered, &mut self.spectrum);
        self.fft
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);
        modulus_squared(&mut self.spectrum);
        self.inv_fft
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        // rustfft leaves both transforms unnormalized, so the round trip is
        // scaled by the transform length.
        let scale = T::one() / count(self.spectrum.len());
        let internals = &self.internals;
        result
            .iter_mut()
            .zip(self.spectrum.iter())
            .enumerate()
            .for_each(|(lag, (r, s))| *r = normalize(s.re * scale, internals.overlap_energy(lag)));
        if let Some(r) = result.first_mut() {
            *r = T::one();
        }
        true
    }
}

/// Autocorrelation by direct summation over each overlap region.
pub struct DirectAutocorrelation<T>
where
    T: Float,
{
    internals: DetectorInternals<T>,
}

impl<T> DirectAutocorrelation<T>
where
    T: Float,
{
    pub fn new(size: usize) -> Self {
        DirectAutocorrelation {
            internals: DetectorInternals::new(size),
        }
    }
}

impl<T> Autocorrelation<T> for DirectAutocorrelation<T>
where
    T: Float,
{
    fn size(&self) -> usize {
        self.internals.size
    }

    fn normalized_autocorrelation(
        &mut self,
        signal: &[T],
        power_threshold: T,
        result: &mut [T],
    ) -> bool {
        let energy = self.internals.prepare(signal);
        if !has_signal(energy, power_threshold) {
            result.iter_mut().for_each(|r| *r = T::zero());
            return false;
        }

        let centered = &self.internals.centered;
        let n = centered.len();
        for (lag, r) in result.iter_mut().enumerate() {
            if lag >= n {
                *r = T::zero();
                continue;
            }
            let (head, tail) = (&centered[..n - lag], &centered[lag..]);
            let raw = head
                .iter()
                .zip(tail.iter())
                .map(|(&a, &b)| a * b)
                .sum::<T>();
            *r = normalize(raw, square_sum(head).sqrt() * square_sum(tail).sqrt());
        }
        if let Some(r) = result.first_mut() {
            *r = T::one();
        }
        true
    }
}
