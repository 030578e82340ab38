use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constancy::common::error::Result;

/// Value of one configured percentile, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileValue {
    /// Percentile rank in percent.
    pub percentile: f64,
    pub value: f64,
}

/// Share of samples whose error does not exceed a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRate {
    pub threshold_deg: f64,
    pub count: usize,
    /// `count` divided by the number of samples.
    pub rate: f64,
}

/// Aggregate angular-error statistics over one batch, in degrees.
///
/// Produced fresh by [`compute_statistics`](super::compute_statistics) and
/// never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
    pub trimean: f64,
    /// Mean of the lowest quarter of errors.
    pub best_25: f64,
    /// Mean of the highest quarter of errors.
    pub worst_25: f64,
    pub percentiles: Vec<PercentileValue>,
    pub success_rates: Vec<ThresholdRate>,
}

impl StatisticsReport {
    pub fn percentile(&self, percentile: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|p| p.percentile == percentile)
            .map(|p| p.value)
    }

    pub fn success_rate(&self, threshold_deg: f64) -> Option<f64> {
        self.success_rates
            .iter()
            .find(|r| r.threshold_deg == threshold_deg)
            .map(|r| r.rate)
    }

    /// Whether the mean error is at or below `target_deg`.
    pub fn meets_target(&self, target_deg: f64) -> bool {
        self.mean <= target_deg
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error Statistics (n={}):", self.count)?;
        writeln!(f, "    Mean: {:.3}°", self.mean)?;
        writeln!(f, "    Median: {:.3}°", self.median)?;
        writeln!(f, "    Std: {:.3}°", self.std)?;
        writeln!(f, "    Range: [{:.3}°, {:.3}°]", self.min, self.max)?;
        writeln!(f, "    IQR: [{:.3}°, {:.3}°]", self.q25, self.q75)?;
        writeln!(f, "    Trimean: {:.3}°", self.trimean)?;
        writeln!(
            f,
            "    Best 25%: {:.3}°  Worst 25%: {:.3}°",
            self.best_25, self.worst_25
        )?;
        for p in &self.percentiles {
            writeln!(f, "    P{}: {:.3}°", p.percentile, p.value)?;
        }
        for r in &self.success_rates {
            writeln!(
                f,
                "    <= {}°: {:.1}% ({}/{})",
                r.threshold_deg,
                r.rate * 100.0,
                r.count,
                self.count
            )?;
        }
        Ok(())
    }
}
