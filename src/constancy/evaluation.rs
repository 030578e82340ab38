//! Evaluation engine
//!
//! Per-sample angular error, batch statistics and a pipeline that grades any
//! [`IlluminantEstimator`](crate::constancy::estimator::IlluminantEstimator)
//! against labeled data.

mod metrics;
mod pipeline;
mod report;
mod timing;
pub mod types;


pub use metrics::{angular_errors, compute_statistics};
pub use pipeline::EvaluationPipeline;
pub use report::{PercentileValue, StatisticsReport, ThresholdRate};
pub use timing::{PipelineTimings, StepTiming};
pub use types::{
    EvaluationConfig, EvaluationConfigBuilder, EvaluationOutcome, FailurePolicy, LabeledSample,
    SampleFailure, SampleResult, StatisticsConfig,
};
