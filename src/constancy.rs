//! Color constancy core
//!
//! Classical illuminant estimators and the angular-error evaluation engine.
//! Data flows from the image contract, through an estimator, to vector
//! normalization and finally batch statistics.

pub mod classical;
pub mod common;
pub mod estimator;
pub mod evaluation;
pub mod image;
pub mod vector;

pub use common::{ConstancyError, Result, ShapeError};

pub use image::{validate, ArrayData, ElementType, ImageView, NdArray};

pub use vector::{angular_error, normalize, Illuminant, UnitIlluminant, DEGENERATE_NORM_THRESHOLD};

pub use estimator::IlluminantEstimator;

pub use classical::{
    edge_based, gray_world, max_rgb, robust_awb, shades_of_gray, white_patch, ClassicalMethod,
    ClassicalSuiteConfig,
};

pub use evaluation::{
    compute_statistics, EvaluationConfig, EvaluationPipeline, FailurePolicy, LabeledSample,
    StatisticsConfig, StatisticsReport,
};
