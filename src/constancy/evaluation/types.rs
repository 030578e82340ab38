//! Evaluation configuration and result types

use serde::{Deserialize, Serialize};

use crate::constancy::common::error::{ConstancyError, Result};
use crate::constancy::evaluation::report::StatisticsReport;
use crate::constancy::image::NdArray;
use crate::constancy::vector::Illuminant;

/// Which statistics a report carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Report percentiles, in percent.
    pub percentiles: Vec<f64>,
    /// Success-rate thresholds, in degrees.
    pub thresholds: Vec<f64>,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            percentiles: vec![95.0],
            thresholds: vec![3.0, 5.0, 10.0],
        }
    }
}

impl StatisticsConfig {
    pub fn new(percentiles: Vec<f64>, thresholds: Vec<f64>) -> Self {
        Self {
            percentiles,
            thresholds,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(p) = self.percentiles.iter().find(|p| !(0.0..=100.0).contains(*p)) {
            return Err(ConstancyError::invalid_parameter("percentile", p));
        }
        if let Some(t) = self.thresholds.iter().find(|t| !(**t >= 0.0 && t.is_finite())) {
            return Err(ConstancyError::invalid_parameter("threshold", t));
        }
        Ok(())
    }
}

/// What the pipeline does when a single sample cannot be graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Return the first failing sample's error (in input order).
    #[default]
    Abort,
    /// Record the failure and grade the remaining samples.
    Skip,
}

/// Configuration for batch evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub statistics: StatisticsConfig,
    /// Mean angular error (degrees) a method must reach to count as passing.
    pub target_angular_error: f64,
    pub failure_policy: FailurePolicy,
    /// Grade samples on the rayon thread pool.
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            statistics: StatisticsConfig::default(),
            target_angular_error: 0.9,
            failure_policy: FailurePolicy::Abort,
            parallel: true,
        }
    }
}

impl EvaluationConfig {
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }
}

/// Builder for EvaluationConfig
#[derive(Default)]
pub struct EvaluationConfigBuilder {
    percentiles: Option<Vec<f64>>,
    thresholds: Option<Vec<f64>>,
    target_angular_error: Option<f64>,
    failure_policy: Option<FailurePolicy>,
    parallel: Option<bool>,
}

impl EvaluationConfigBuilder {
    pub fn percentiles(mut self, percentiles: Vec<f64>) -> Self {
        self.percentiles = Some(percentiles);
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub fn target_angular_error(mut self, degrees: f64) -> Self {
        self.target_angular_error = Some(degrees);
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn build(self) -> EvaluationConfig {
        let default = EvaluationConfig::default();
        EvaluationConfig {
            statistics: StatisticsConfig {
                percentiles: self.percentiles.unwrap_or(default.statistics.percentiles),
                thresholds: self.thresholds.unwrap_or(default.statistics.thresholds),
            },
            target_angular_error: self
                .target_angular_error
                .unwrap_or(default.target_angular_error),
            failure_policy: self.failure_policy.unwrap_or(default.failure_policy),
            parallel: self.parallel.unwrap_or(default.parallel),
        }
    }
}

/// An image paired with its ground-truth illuminant.
#[derive(Debug, Clone)]
pub struct LabeledSample {
    pub id: String,
    pub image: NdArray,
    pub ground_truth: Illuminant,
}

impl LabeledSample {
    pub fn new(id: impl Into<String>, image: NdArray, ground_truth: impl Into<Illuminant>) -> Self {
        Self {
            id: id.into(),
            image,
            ground_truth: ground_truth.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleResult {
    pub id: String,
    /// Raw estimator output.
    pub estimate: Illuminant,
    pub angular_error: f64,
}

#[derive(Debug)]
pub struct SampleFailure {
    pub id: String,
    pub error: ConstancyError,
}

/// Everything produced by grading one estimator on one batch.
#[derive(Debug)]
pub struct EvaluationOutcome {
    pub estimator: String,
    /// Graded samples, in input order.
    pub results: Vec<SampleResult>,
    /// Samples dropped under [`FailurePolicy::Skip`], in input order.
    pub failures: Vec<SampleFailure>,
    pub report: StatisticsReport,
    pub meets_target: bool,
}
