use crate::detector::config::LagBounds;
use crate::float::{constant, count, Float};

/// Find the lag in `bounds` where `nac` is largest. The first lag wins ties.
///
/// The winner must be a strict local maximum of `nac`. A maximum that merely
/// sits on a slope clamped by the bounds is not a periodicity peak, and `None`
/// is returned instead.
pub fn locate_peak<T: Float>(nac: &[T], bounds: LagBounds) -> Option<usize> {
    assert!(bounds.min_lag >= 1);
    assert!(nac.len() > bounds.max_lag + 1);

    let best = bounds
        .lags()
        .fold(bounds.min_lag, |best, lag| match nac[lag] > nac[best] {
            true => lag,
            false => best,
        });

    match nac[best - 1] < nac[best] && nac[best + 1] < nac[best] {
        true => Some(best),
        false => None,
    }
}

/// Offset of the vertex of the parabola through `(-1, left)`, `(0, mid)`
/// and `(1, right)`. A flat or upward-opening parabola gives no correction.
pub fn parabolic_shift<T: Float>(left: T, mid: T, right: T) -> T {
    let denom = constant::<T>(2.0) * mid - left - right;
    match denom > T::zero() {
        true => constant::<T>(0.5) * (right - left) / denom,
        false => T::zero(),
    }
}

/// Refine the integer `peak` of `data` to a fractional position.
pub fn refine_peak<T: Float>(data: &[T], peak: usize) -> T {
    count::<T>(peak) + parabolic_shift(data[peak - 1], data[peak], data[peak + 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min_lag: usize, max_lag: usize) -> LagBounds {
        LagBounds { min_lag, max_lag }
    }

    #[test]
    fn peak_correction() {
        // y = 4 - (x - 0.25)^2 sampled at x = -1, 0, 1
        let f = |x: f64| 4.0 - (x - 0.25) * (x - 0.25);
        let shift = parabolic_shift(f(-1.0), f(0.0), f(1.0));
        assert!((shift - 0.25).abs() < 1e-12);
    }

    #[test]
    fn flat_peak_has_no_correction() {
        assert_eq!(parabolic_shift(1.0, 1.0, 1.0), 0.0);
        assert_eq!(parabolic_shift(2.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn refines_around_integer_peak() {
        let data = [0.0, 0.5, 1.0, 0.5, 0.0];
        assert_eq!(refine_peak(&data, 2), 2.0);

        let data = [0.0, 0.2, 1.0, 0.8, 0.0];
        assert!(refine_peak(&data, 2) > 2.0);
    }

    #[test]
    fn finds_interior_maximum() {
        let nac = [1.0, 0.2, 0.1, 0.5, 0.9, 0.4, 0.3, 0.95, 0.6];
        assert_eq!(locate_peak(&nac, bounds(2, 7)), Some(7));
        assert_eq!(locate_peak(&nac, bounds(2, 6)), Some(4));
    }

    #[test]
    fn first_of_equal_maxima_wins() {
        let nac = [1.0, 0.0, 0.7, 0.1, 0.7, 0.0, 0.0];
        assert_eq!(locate_peak(&nac, bounds(1, 5)), Some(2));
    }

    #[test]
    fn rejects_clamped_maximum() {
        // Monotonically decaying: the best lag is the lower bound, on a slope.
        let nac = [1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4];
        assert_eq!(locate_peak(&nac, bounds(2, 5)), None);

        // Rising through the upper bound.
        let nac = [1.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        assert_eq!(locate_peak(&nac, bounds(2, 5)), None);
    }

    #[test]
    fn accepts_peaks_on_the_bounds() {
        let nac = [1.0, 0.1, 0.9, 0.2, 0.3, 0.1, 0.0];
        assert_eq!(locate_peak(&nac, bounds(2, 5)), Some(2));

        let nac = [1.0, 0.1, 0.2, 0.3, 0.4, 0.8, 0.0];
        assert_eq!(locate_peak(&nac, bounds(2, 5)), Some(5));
    }
}
