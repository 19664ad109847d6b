use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::float::{count, Float};

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

pub fn new_complex_buffer<T: Float>(size: usize) -> Vec<Complex<T>> {
    vec![Complex::zero(); size]
}

/// Copy `input` into the real part of `output` and zero everything else,
/// including the tail of `output` past `input.len()`.
pub fn copy_real_to_complex<T: Float>(input: &[T], output: &mut [Complex<T>]) {
    assert!(input.len() <= output.len());
    input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
        o.re = *i;
        o.im = T::zero();
    });
    output[input.len()..]
        .iter_mut()
        .for_each(|o| *o = Complex::zero())
}

/// Computes |x|^2 for each complex value x in `arr`. This function
/// modifies `arr` in place and leaves the complex component zero.
pub fn modulus_squared<T: Float>(arr: &mut [Complex<T>]) {
    for s in arr {
        s.re = s.re * s.re + s.im * s.im;
        s.im = T::zero();
    }
}

/// Compute the sum of the square of each element of `arr`.
pub fn square_sum<T: Float>(arr: &[T]) -> T {
    arr.iter().map(|&s| s * s).sum::<T>()
}

/// Copy `input` to `output` with its mean removed.
pub fn remove_mean<T: Float>(input: &[T], output: &mut [T]) {
    assert_eq!(input.len(), output.len());
    if input.is_empty() {
        return;
    }
    let mean = input.iter().copied().sum::<T>() / count(input.len());
    input
        .iter()
        .zip(output.iter_mut())
        .for_each(|(i, o)| *o = *i - mean);
}

/// Running sums of squares from both ends of `signal`:
///
/// > head\[k\] = sum_{i<k} x_i^2, tail\[k\] = sum_{i>=k} x_i^2
///
/// Both outputs hold `signal.len() + 1` values. The tail is accumulated
/// separately rather than derived from the head to avoid cancellation.
pub fn running_energy<T: Float>(signal: &[T], head: &mut [T], tail: &mut [T]) {
    let n = signal.len();
    assert_eq!(head.len(), n + 1);
    assert_eq!(tail.len(), n + 1);

    head[0] = T::zero();
    for (i, &s) in signal.iter().enumerate() {
        head[i + 1] = head[i] + s * s;
    }
    tail[n] = T::zero();
    for (i, &s) in signal.iter().enumerate().rev() {
        tail[i] = tail[i + 1] + s * s;
    }
}
