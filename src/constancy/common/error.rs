use thiserror::Error;

use crate::constancy::image::ElementType;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    #[error("image must be 3D, got {0}D")]
    Dimensions(usize),

    #[error("image must have 3 channels, got {0}")]
    Channels(usize),

    #[error("image has no pixels: height={height}, width={width}")]
    Empty { height: usize, width: usize },
}

#[derive(Error, Debug)]
pub enum ConstancyError {
    #[error("Input is not a well-formed array: {0}")]
    TypeError(String),

    #[error("Invalid image shape: {0}")]
    ShapeError(#[from] ShapeError),

    #[error("Unsupported image dtype: {0}")]
    DtypeError(ElementType),

    #[error("Illuminant vector has zero norm (norm={norm:e})")]
    DegenerateVectorError { norm: f64 },

    #[error("Statistics requested over an empty sequence")]
    EmptyInputError,

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Failed to serialize report: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConstancyError {
    pub fn invalid_parameter(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }

    /// True for errors caused by a single malformed sample rather than by the
    /// caller's configuration; these are the ones a skip policy may drop.
    pub fn is_sample_error(&self) -> bool {
        matches!(
            self,
            ConstancyError::TypeError(_)
                | ConstancyError::ShapeError(_)
                | ConstancyError::DtypeError(_)
                | ConstancyError::DegenerateVectorError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ConstancyError>;
