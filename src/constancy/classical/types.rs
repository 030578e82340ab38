//! Parameter types for the classical estimators
//!
//! Percentile ranks are given in percent (0..=100). Intensity thresholds are
//! fractions of the image dtype's nominal range (255 for `uint8`, 1.0 for
//! floats), so the same parameters work for either kind of image.

use serde::{Deserialize, Serialize};

use crate::constancy::common::error::{ConstancyError, Result};

/// Gray world parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrayWorldParams {
    /// Percent of values dropped from each end of every channel before
    /// averaging. 0 gives the plain mean.
    pub exclude_percent: f64,
}

impl GrayWorldParams {
    #[must_use]
    pub const fn with_exclusion(exclude_percent: f64) -> Self {
        Self { exclude_percent }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..50.0).contains(&self.exclude_percent) {
            return Err(ConstancyError::invalid_parameter(
                "exclude_percent",
                self.exclude_percent,
            ));
        }
        Ok(())
    }
}

/// White patch parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhitePatchParams {
    /// Percentile used in place of the maximum. 100 is the true maximum.
    pub percentile: f64,
}

impl Default for WhitePatchParams {
    fn default() -> Self {
        Self { percentile: 100.0 }
    }
}

impl WhitePatchParams {
    /// Robust variant that resists single-pixel sensor noise.
    #[must_use]
    pub const fn robust(percentile: f64) -> Self {
        Self { percentile }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.percentile) {
            return Err(ConstancyError::invalid_parameter("percentile", self.percentile));
        }
        Ok(())
    }
}

/// Shades of gray parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadesOfGrayParams {
    /// Minkowski norm order. 1 is gray world, `f64::INFINITY` is max-RGB.
    pub p: f64,
}

impl Default for ShadesOfGrayParams {
    fn default() -> Self {
        Self { p: 6.0 }
    }
}

impl ShadesOfGrayParams {
    #[must_use]
    pub const fn with_p(p: f64) -> Self {
        Self { p }
    }

    pub fn validate(&self) -> Result<()> {
        validate_minkowski_p(self.p)
    }
}

/// Derivative used by the edge-based estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientOrder {
    /// Gradient magnitude sqrt(gx² + gy²).
    #[default]
    First,
    /// Hessian magnitude sqrt(gxx² + gyy² + 2·gxy²).
    Second,
}

/// Edge-based (gray edge) parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeBasedParams {
    pub p: f64,
    pub order: GradientOrder,
}

impl Default for EdgeBasedParams {
    fn default() -> Self {
        Self {
            p: 6.0,
            order: GradientOrder::First,
        }
    }
}

impl EdgeBasedParams {
    #[must_use]
    pub const fn with_p(p: f64) -> Self {
        Self {
            p,
            order: GradientOrder::First,
        }
    }

    #[must_use]
    pub const fn order(mut self, order: GradientOrder) -> Self {
        self.order = order;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_minkowski_p(self.p)
    }
}

/// Robust auto white balance parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobustAwbParams {
    /// A pixel with any channel at or above this fraction of the nominal
    /// maximum is saturated.
    pub saturation_fraction: f64,
    /// A pixel with any channel at or below this fraction of the nominal
    /// maximum is near-black.
    pub dark_fraction: f64,
    /// Pixels further than this many degrees from the current estimate are
    /// excluded from the next pass.
    pub outlier_angle_deg: f64,
    /// Hard upper bound on refinement passes.
    pub max_iterations: usize,
    /// Largest per-channel chromaticity change still counted as converged.
    pub tolerance: f64,
}

impl Default for RobustAwbParams {
    fn default() -> Self {
        Self {
            saturation_fraction: 0.95,
            dark_fraction: 0.02,
            outlier_angle_deg: 5.0,
            max_iterations: 20,
            tolerance: 1e-6,
        }
    }
}

impl RobustAwbParams {
    #[must_use]
    pub const fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub const fn outlier_angle_deg(mut self, degrees: f64) -> Self {
        self.outlier_angle_deg = degrees;
        self
    }

    #[must_use]
    pub const fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.saturation_fraction > 0.0 && self.saturation_fraction <= 1.0) {
            return Err(ConstancyError::invalid_parameter(
                "saturation_fraction",
                self.saturation_fraction,
            ));
        }
        if !(self.dark_fraction >= 0.0 && self.dark_fraction < self.saturation_fraction) {
            return Err(ConstancyError::invalid_parameter("dark_fraction", self.dark_fraction));
        }
        if !(self.outlier_angle_deg > 0.0 && self.outlier_angle_deg <= 180.0) {
            return Err(ConstancyError::invalid_parameter(
                "outlier_angle_deg",
                self.outlier_angle_deg,
            ));
        }
        if !(self.tolerance >= 0.0 && self.tolerance.is_finite()) {
            return Err(ConstancyError::invalid_parameter("tolerance", self.tolerance));
        }
        Ok(())
    }
}

fn validate_minkowski_p(p: f64) -> Result<()> {
    // Infinity is allowed and means the maximum.
    if !(p > 0.0) {
        return Err(ConstancyError::invalid_parameter("p", p));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GrayWorldParams::default().validate().is_ok());
        assert!(WhitePatchParams::default().validate().is_ok());
        assert!(ShadesOfGrayParams::default().validate().is_ok());
        assert!(EdgeBasedParams::default().validate().is_ok());
        assert!(RobustAwbParams::default().validate().is_ok());
    }

    #[test]
    fn test_fractional_p_accepted() {
        assert!(ShadesOfGrayParams::with_p(0.5).validate().is_ok());
        assert!(EdgeBasedParams::with_p(0.25).validate().is_ok());
    }

    #[test]
    fn test_out_of_domain_params_rejected() {
        assert!(GrayWorldParams::with_exclusion(50.0).validate().is_err());
        assert!(GrayWorldParams::with_exclusion(-1.0).validate().is_err());
        assert!(WhitePatchParams::robust(101.0).validate().is_err());
        assert!(ShadesOfGrayParams::with_p(0.0).validate().is_err());
        assert!(ShadesOfGrayParams::with_p(-2.0).validate().is_err());
        assert!(EdgeBasedParams::with_p(0.0).validate().is_err());
        assert!(ShadesOfGrayParams::with_p(f64::NAN).validate().is_err());
        assert!(ShadesOfGrayParams::with_p(f64::INFINITY).validate().is_ok());
        assert!(RobustAwbParams::default().outlier_angle_deg(0.0).validate().is_err());
        assert!(RobustAwbParams::default().tolerance(-1.0).validate().is_err());
    }
}
