use tracing::debug;

use crate::constancy::common::error::{ConstancyError, Result};
use crate::constancy::common::numeric::{mean, percentile_of_sorted, sorted};
use crate::constancy::evaluation::report::{PercentileValue, StatisticsReport, ThresholdRate};
use crate::constancy::evaluation::types::StatisticsConfig;
use crate::constancy::vector::{angular_error, Illuminant};

/// Angular error of every (estimate, ground truth) pair, in input order.
pub fn angular_errors(pairs: &[(Illuminant, Illuminant)]) -> Result<Vec<f64>> {
    pairs
        .iter()
        .map(|&(estimate, truth)| angular_error(estimate, truth))
        .collect()
}

/// Aggregates a batch of angular errors (degrees) into a report.
///
/// Every statistic is computed from the sorted errors, so the result is
/// bit-identical for any ordering of the input. Percentiles interpolate
/// linearly between order statistics.
pub fn compute_statistics(errors: &[f64], config: &StatisticsConfig) -> Result<StatisticsReport> {
    if errors.is_empty() {
        return Err(ConstancyError::EmptyInputError);
    }
    config.validate()?;
    if let Some(bad) = errors.iter().find(|e| !(0.0..=180.0).contains(*e)) {
        return Err(ConstancyError::invalid_parameter("angular_error", bad));
    }

    let sorted = sorted(errors);
    let n = sorted.len();
    let average = mean(&sorted);
    let variance = sorted.iter().map(|e| (e - average).powi(2)).sum::<f64>() / n as f64;

    let median = percentile_of_sorted(&sorted, 50.0);
    let q25 = percentile_of_sorted(&sorted, 25.0);
    let q75 = percentile_of_sorted(&sorted, 75.0);
    let quarter = (n / 4).max(1);

    let percentiles = config
        .percentiles
        .iter()
        .map(|&percentile| PercentileValue {
            percentile,
            value: percentile_of_sorted(&sorted, percentile),
        })
        .collect();

    let success_rates = config
        .thresholds
        .iter()
        .map(|&threshold_deg| {
            let count = sorted.partition_point(|&e| e <= threshold_deg);
            ThresholdRate {
                threshold_deg,
                count,
                rate: count as f64 / n as f64,
            }
        })
        .collect();

    let report = StatisticsReport {
        count: n,
        mean: average,
        median,
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        q25,
        q75,
        trimean: (q25 + 2.0 * median + q75) / 4.0,
        best_25: mean(&sorted[..quarter]),
        worst_25: mean(&sorted[n - quarter..]),
        percentiles,
        success_rates,
    };
    debug!(count = n, mean = report.mean, median = report.median, "statistics computed");
    Ok(report)
}
