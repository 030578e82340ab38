//! Per-channel aggregation shared by the estimators.

use crate::constancy::common::numeric::{max, mean, percentile_of_sorted, sorted};

/// Absolute values, the convention every mean-based estimator aggregates.
pub fn magnitudes(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.abs()).collect()
}

/// Generalised mean ((1/N)·Σ|x|^p)^(1/p) for p > 0.
///
/// p = 1 is the mean of [`magnitudes`], computed exactly like gray world, and
/// p = ∞ is the maximum magnitude. Finite p is evaluated relative to the
/// channel peak so large exponents never overflow.
pub fn minkowski_mean(values: &[f64], p: f64) -> f64 {
    if p == 1.0 {
        return mean(&magnitudes(values));
    }
    let peak = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
    if p.is_infinite() || peak == 0.0 {
        return peak;
    }
    let sum: f64 = values.iter().map(|v| (v.abs() / peak).powf(p)).sum();
    peak * (sum / values.len() as f64).powf(1.0 / p)
}

/// Mean of the values inside [P(percent), P(100 - percent)].
///
/// Ties at a bound are kept. When the window falls between two neighbouring
/// values (tiny inputs, `percent` near 50) the median is returned.
pub fn trimmed_mean(values: &[f64], percent: f64) -> f64 {
    let sorted = sorted(values);
    let lo = percentile_of_sorted(&sorted, percent);
    let hi = percentile_of_sorted(&sorted, 100.0 - percent);
    let start = sorted.partition_point(|&v| v < lo);
    let end = sorted.partition_point(|&v| v <= hi);
    if start >= end {
        return percentile_of_sorted(&sorted, 50.0);
    }
    mean(&sorted[start..end])
}

pub fn channel_max(values: &[f64]) -> f64 {
    max(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_minkowski_p1_is_mean() {
        let values = [0.1, 0.4, 0.7, 0.2];
        assert_eq!(minkowski_mean(&values, 1.0), mean(&values));
    }

    #[test]
    fn test_minkowski_uses_magnitudes_at_every_p() {
        let values = [-0.5, 0.5];
        assert_eq!(minkowski_mean(&values, 1.0), 0.5);
        assert_relative_eq!(minkowski_mean(&values, 1.000001), 0.5, epsilon = 1e-12);
        assert_relative_eq!(minkowski_mean(&values, 0.5), 0.5, epsilon = 1e-12);
        assert_eq!(minkowski_mean(&values, f64::INFINITY), 0.5);
    }

    #[test]
    fn test_minkowski_fractional_p() {
        // ((1 + 2) / 2)^2
        assert_relative_eq!(minkowski_mean(&[1.0, 4.0], 0.5), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_minkowski_p2_is_rms() {
        let values = [3.0, 4.0];
        assert_relative_eq!(minkowski_mean(&values, 2.0), (12.5f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_minkowski_large_p_no_overflow() {
        let values = [255.0, 200.0, 10.0];
        let result = minkowski_mean(&values, 500.0);
        assert!(result.is_finite());
        assert!(result <= 255.0 && result > 250.0);
        assert_eq!(minkowski_mean(&values, f64::INFINITY), 255.0);
    }

    #[test]
    fn test_trimmed_mean_drops_tails() {
        let mut values: Vec<f64> = (1..=18).map(f64::from).collect();
        values.push(1000.0);
        values.push(-1000.0);
        // P5 = -49.05 and P95 = 67.1 leave exactly 1..=18.
        assert_relative_eq!(trimmed_mean(&values, 5.0), 9.5);
    }

    #[test]
    fn test_trimmed_mean_keeps_ties_at_bounds() {
        let mut values = vec![0.0; 15];
        values.extend([1.0; 5]);
        // P5 = 0 and P95 = 1, so nothing lies outside the window.
        assert_relative_eq!(trimmed_mean(&values, 5.0), 0.25);
    }

    #[test]
    fn test_trimmed_mean_keeps_at_least_one() {
        assert_relative_eq!(trimmed_mean(&[1.0, 2.0, 3.0], 49.0), 2.0);
        assert_relative_eq!(trimmed_mean(&[1.0, 5.0], 49.0), 3.0);
    }
}
