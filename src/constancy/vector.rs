//! Illuminant vectors and angular comparison
//!
//! Estimators return a raw [`Illuminant`] at arbitrary positive scale. Before
//! two illuminants are compared they are brought to unit Euclidean norm; a
//! vector too close to zero to have a direction is an error, never a default.

use serde::{Deserialize, Serialize};

use crate::constancy::common::error::{ConstancyError, Result};

/// Norms below this are treated as having no direction.
pub const DEGENERATE_NORM_THRESHOLD: f64 = 1e-8;

/// Raw RGB illuminant estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Illuminant(pub [f64; 3]);

impl Illuminant {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self([r, g, b])
    }

    pub const ZERO: Self = Self([0.0; 3]);

    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    pub fn norm(&self) -> f64 {
        self.0.iter().map(|c| c * c).sum::<f64>().sqrt()
    }

    pub fn normalize(&self) -> Result<UnitIlluminant> {
        normalize(*self)
    }
}

impl From<[f64; 3]> for Illuminant {
    fn from(rgb: [f64; 3]) -> Self {
        Self(rgb)
    }
}

impl From<UnitIlluminant> for Illuminant {
    fn from(unit: UnitIlluminant) -> Self {
        Self(unit.0)
    }
}

/// Illuminant of unit Euclidean norm. Only obtainable through [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitIlluminant([f64; 3]);

impl UnitIlluminant {
    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    pub fn dot(&self, other: &UnitIlluminant) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }
}

/// Scales `vector` to unit norm.
///
/// Fails with [`ConstancyError::DegenerateVectorError`] when the norm is below
/// [`DEGENERATE_NORM_THRESHOLD`] or not finite.
pub fn normalize(vector: impl Into<Illuminant>) -> Result<UnitIlluminant> {
    let vector = vector.into();
    let norm = vector.norm();
    // Written so that a NaN norm also fails.
    if !(norm >= DEGENERATE_NORM_THRESHOLD) || !norm.is_finite() {
        return Err(ConstancyError::DegenerateVectorError { norm });
    }
    let [r, g, b] = vector.0;
    Ok(UnitIlluminant([r / norm, g / norm, b / norm]))
}

/// Angle in degrees between two illuminants, in [0, 180].
///
/// Both inputs are normalized first. The cosine is clamped to [-1, 1] because
/// rounding can push it just past 1 for near-parallel vectors.
pub fn angular_error(a: impl Into<Illuminant>, b: impl Into<Illuminant>) -> Result<f64> {
    let a = normalize(a)?;
    let b = normalize(b)?;
    Ok(unit_angle(&a, &b))
}

pub(crate) fn unit_angle(a: &UnitIlluminant, b: &UnitIlluminant) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}
