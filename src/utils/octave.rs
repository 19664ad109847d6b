//! Octave error correction.
//!
//! An autocorrelation peak at lag `p` is repeated at every multiple of `p`, so
//! the highest peak in the search window may belong to a multiple of the true
//! period. If the signal really repeats every `p / m` samples, the
//! autocorrelation is also strong at each `k * p / m` for `k = 1..m`. The
//! corrector tries the largest plausible divisor first and settles on the
//! first one whose submultiples all clear the threshold.
use crate::float::{count, Float};

/// Collapse `estimate`, the refined period found at integer lag `best_lag`,
/// onto its smallest submultiple that is still supported by `nac`.
///
/// A divisor `mul` is accepted when for every `k` in `1..mul`
///
/// > nac\[round(k * estimate / mul)\] >= threshold * nac\[best_lag\]
///
/// Divisors are tried from `best_lag / min_lag` down to 1, and `mul = 1`
/// always passes, so the estimate is returned unchanged when nothing else does.
pub fn correct_octave_errors<T: Float>(
    nac: &[T],
    best_lag: usize,
    estimate: T,
    min_lag: usize,
    threshold: T,
) -> T {
    assert!(min_lag >= 1);
    let floor = threshold * nac[best_lag];
    let max_multiple = best_lag / min_lag;

    let supported = |mul: usize| {
        (1..mul).all(|k| {
            (count::<T>(k) * estimate / count::<T>(mul))
                .round()
                .to_usize()
                .and_then(|lag| nac.get(lag))
                .map_or(false, |&value| value >= floor)
        })
    };

    match (2..=max_multiple).rev().find(|&mul| supported(mul)) {
        Some(mul) => {
            log::trace!(
                "octave correction: period {} collapsed by a factor of {}",
                estimate,
                mul
            );
            estimate / count(mul)
        }
        None => estimate,
    }
}
