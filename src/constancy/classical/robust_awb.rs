use tracing::{debug, warn};

use crate::constancy::classical::types::RobustAwbParams;
use crate::constancy::common::error::Result;
use crate::constancy::image::{ImageView, CHANNELS};
use crate::constancy::vector::{normalize, unit_angle, Illuminant};

/// Outcome of a robust AWB run, including how the iteration ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustAwbTrace {
    pub illuminant: Illuminant,
    /// Refinement passes performed, never more than `max_iterations`.
    pub iterations: usize,
    pub converged: bool,
    /// Pixels contributing to the final estimate.
    pub inliers: usize,
}

/// Robust auto white balance. See [`robust_awb_with_trace`].
pub fn robust_awb(image: &ImageView<'_>, params: &RobustAwbParams) -> Result<Illuminant> {
    robust_awb_with_trace(image, params).map(|trace| trace.illuminant)
}

/// Gray-world mean over usable pixels, refined by dropping chromatic outliers.
///
/// 1. Pixels with any channel saturated or near-black are discarded once.
/// 2. Each pass keeps the usable pixels within `outlier_angle_deg` of the
///    current estimate and re-averages them.
/// 3. Passes stop at `max_iterations`, when the chromaticity change drops
///    below `tolerance`, or when a pass would keep no pixel.
///
/// An image with no usable pixel yields the zero vector.
pub fn robust_awb_with_trace(
    image: &ImageView<'_>,
    params: &RobustAwbParams,
) -> Result<RobustAwbTrace> {
    params.validate()?;

    let nominal_max = image.nominal_max();
    let saturated = params.saturation_fraction * nominal_max;
    let dark = params.dark_fraction * nominal_max;

    let usable: Vec<[f64; CHANNELS]> = image
        .pixels()
        .filter(|pixel| pixel.iter().all(|&v| v > dark && v < saturated))
        .collect();

    if usable.is_empty() {
        warn!(
            pixels = image.pixel_count(),
            "robust AWB found no pixel that is neither saturated nor near-black"
        );
        return Ok(RobustAwbTrace {
            illuminant: Illuminant::ZERO,
            iterations: 0,
            converged: false,
            inliers: 0,
        });
    }

    let mut estimate = mean_pixel(usable.iter());
    let mut inliers = usable.len();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < params.max_iterations {
        let Ok(reference) = normalize(estimate) else {
            break;
        };
        iterations += 1;

        let selected: Vec<&[f64; CHANNELS]> = usable
            .iter()
            .filter(|pixel| {
                normalize(**pixel)
                    .is_ok_and(|unit| unit_angle(&unit, &reference) <= params.outlier_angle_deg)
            })
            .collect();
        if selected.is_empty() {
            break;
        }

        let next = mean_pixel(selected.iter().copied());
        let change = chromaticity_change(&estimate, &next);
        estimate = next;
        inliers = selected.len();

        if change < params.tolerance {
            converged = true;
            break;
        }
    }

    debug!(
        ?estimate,
        iterations,
        converged,
        inliers,
        usable = usable.len(),
        "robust AWB estimate"
    );
    Ok(RobustAwbTrace {
        illuminant: Illuminant(estimate),
        iterations,
        converged,
        inliers,
    })
}

fn mean_pixel<'p>(pixels: impl ExactSizeIterator<Item = &'p [f64; CHANNELS]>) -> [f64; CHANNELS] {
    let count = pixels.len() as f64;
    let mut sum = [0.0; CHANNELS];
    for pixel in pixels {
        for (acc, v) in sum.iter_mut().zip(pixel.iter()) {
            *acc += v;
        }
    }
    sum.map(|s| s / count)
}

fn chromaticity_change(a: &[f64; CHANNELS], b: &[f64; CHANNELS]) -> f64 {
    let sum_a: f64 = a.iter().sum();
    let sum_b: f64 = b.iter().sum();
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x / sum_a - y / sum_b).abs())
        .fold(0.0, f64::max)
}
