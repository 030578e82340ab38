//! Image contract module
//!
//! Pixel arrays arrive from an upstream loader as a shape plus a typed element
//! buffer. [`validate`] is the gate every estimator goes through before reading
//! pixel data; it yields a borrowed [`ImageView`] and never copies or converts.

pub mod types;
mod validate;

pub use types::{ArrayData, ElementType, ImageView, NdArray, PixelIter, Samples, CHANNELS};
pub use validate::validate;
