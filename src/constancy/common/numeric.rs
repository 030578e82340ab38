//! Order statistics shared by the estimators and the evaluation engine.

/// Sorts ascending using the IEEE total order, so results never depend on the
/// order values arrived in.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Percentile (in percent, 0..=100) of an ascending slice by linear
/// interpolation between the two closest order statistics.
///
/// `sorted` must be non-empty; callers check this before asking.
pub fn percentile_of_sorted(sorted: &[f64], percent: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = percent / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_interpolates() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile_of_sorted(&s, 0.0), 1.0);
        assert_relative_eq!(percentile_of_sorted(&s, 100.0), 4.0);
        assert_relative_eq!(percentile_of_sorted(&s, 50.0), 2.5);
        assert_relative_eq!(percentile_of_sorted(&s, 25.0), 1.75);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_relative_eq!(percentile_of_sorted(&[7.0], 95.0), 7.0);
    }

    #[test]
    fn test_sorted_handles_order() {
        assert_eq!(sorted(&[3.0, -1.0, 2.0]), vec![-1.0, 2.0, 3.0]);
    }
}
