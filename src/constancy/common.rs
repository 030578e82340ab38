//! Common utilities module
//!
//! Error types and order statistics shared by the image contract, the
//! estimators and the evaluation engine.

pub mod error;
pub mod numeric;

pub use error::{ConstancyError, Result, ShapeError};
