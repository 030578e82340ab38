use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::constancy::common::error::Result;
use crate::constancy::estimator::IlluminantEstimator;
use crate::constancy::evaluation::metrics::compute_statistics;
use crate::constancy::evaluation::timing::PipelineTimings;
use crate::constancy::evaluation::types::{
    EvaluationConfig, EvaluationOutcome, FailurePolicy, LabeledSample, SampleFailure, SampleResult,
};
use crate::constancy::image::validate;
use crate::constancy::vector::angular_error;

/// Grades one estimator against a labeled batch.
///
/// Samples are independent: each is validated, estimated and compared on its
/// own, optionally in parallel. Aggregation starts only once every sample has
/// been graded.
pub struct EvaluationPipeline<E: IlluminantEstimator> {
    estimator: E,
    config: EvaluationConfig,
}

impl<E: IlluminantEstimator> EvaluationPipeline<E> {
    pub fn new(estimator: E) -> Self {
        Self::with_config(estimator, EvaluationConfig::default())
    }

    pub fn with_config(estimator: E, config: EvaluationConfig) -> Self {
        Self { estimator, config }
    }

    fn evaluate_sample(&self, sample: &LabeledSample) -> Result<SampleResult> {
        let image = validate(&sample.image)?;
        let estimate = self.estimator.estimate(&image)?;
        let angular_error = angular_error(estimate, sample.ground_truth)?;
        debug!(id = %sample.id, angular_error, "sample graded");
        Ok(SampleResult {
            id: sample.id.clone(),
            estimate,
            angular_error,
        })
    }

    pub fn evaluate(&self, samples: &[LabeledSample]) -> Result<EvaluationOutcome> {
        self.evaluate_with_timings(samples).map(|(outcome, _)| outcome)
    }

    #[instrument(skip(self, samples), fields(estimator = %self.estimator.name(), samples = samples.len()))]
    pub fn evaluate_with_timings(
        &self,
        samples: &[LabeledSample],
    ) -> Result<(EvaluationOutcome, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        info!("Starting evaluation");

        let graded: Vec<Result<SampleResult>> = timings.time("estimate_samples", || {
            let _span = tracing::info_span!("estimate_samples", parallel = self.config.parallel)
                .entered();
            if self.config.parallel {
                samples.par_iter().map(|s| self.evaluate_sample(s)).collect()
            } else {
                samples.iter().map(|s| self.evaluate_sample(s)).collect()
            }
        });

        let mut results = Vec::with_capacity(graded.len());
        let mut failures = Vec::new();
        for (sample, outcome) in samples.iter().zip(graded) {
            match outcome {
                Ok(result) => results.push(result),
                Err(error)
                    if self.config.failure_policy == FailurePolicy::Skip
                        && error.is_sample_error() =>
                {
                    warn!(id = %sample.id, %error, "Skipping sample");
                    failures.push(SampleFailure {
                        id: sample.id.clone(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        let errors: Vec<f64> = results.iter().map(|r| r.angular_error).collect();
        let report = timings.time("compute_statistics", || {
            let _span = tracing::info_span!("compute_statistics", graded = errors.len()).entered();
            compute_statistics(&errors, &self.config.statistics)
        })?;

        let meets_target = report.meets_target(self.config.target_angular_error);
        info!(
            graded = results.len(),
            skipped = failures.len(),
            mean = report.mean,
            median = report.median,
            meets_target,
            "Evaluation complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );

        let outcome = EvaluationOutcome {
            estimator: self.estimator.name(),
            results,
            failures,
            report,
            meets_target,
        };
        Ok((outcome, timings))
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EvaluationConfig) {
        self.config = config;
    }
}
