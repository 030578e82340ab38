use tracing::debug;

use crate::constancy::classical::channels::minkowski_mean;
use crate::constancy::classical::types::{EdgeBasedParams, GradientOrder};
use crate::constancy::common::error::Result;
use crate::constancy::image::{ImageView, CHANNELS};
use crate::constancy::vector::Illuminant;

/// Edge based (gray edge): spatial derivatives of reflectance average to
/// gray, so the Minkowski p-mean of each channel's derivative magnitude is
/// the illuminant.
///
/// A featureless image has no edges and yields the zero vector, which fails
/// normalization downstream.
pub fn edge_based(image: &ImageView<'_>, params: &EdgeBasedParams) -> Result<Illuminant> {
    params.validate()?;

    let (height, width) = (image.height(), image.width());
    let mut estimate = [0.0; CHANNELS];
    for (channel, slot) in estimate.iter_mut().enumerate() {
        let field = image.channel(channel);
        let magnitude = match params.order {
            GradientOrder::First => first_order_magnitude(&field, height, width),
            GradientOrder::Second => second_order_magnitude(&field, height, width),
        };
        *slot = minkowski_mean(&magnitude, params.p);
    }

    debug!(?estimate, p = params.p, order = ?params.order, "edge based estimate");
    Ok(Illuminant(estimate))
}

fn first_order_magnitude(field: &[f64], height: usize, width: usize) -> Vec<f64> {
    let gx = derivative_x(field, height, width);
    let gy = derivative_y(field, height, width);
    gx.iter()
        .zip(gy.iter())
        .map(|(x, y)| x.hypot(*y))
        .collect()
}

fn second_order_magnitude(field: &[f64], height: usize, width: usize) -> Vec<f64> {
    let gx = derivative_x(field, height, width);
    let gy = derivative_y(field, height, width);
    let gxx = derivative_x(&gx, height, width);
    let gyy = derivative_y(&gy, height, width);
    let gxy = derivative_y(&gx, height, width);
    gxx.iter()
        .zip(gyy.iter())
        .zip(gxy.iter())
        .map(|((xx, yy), xy)| (xx * xx + yy * yy + 2.0 * xy * xy).sqrt())
        .collect()
}

/// Central differences inside, one-sided differences at the borders, zero
/// along an axis of length one.
fn derivative_x(field: &[f64], height: usize, width: usize) -> Vec<f64> {
    let mut out = vec![0.0; field.len()];
    if width < 2 {
        return out;
    }
    for row in 0..height {
        let line = &field[row * width..(row + 1) * width];
        let dst = &mut out[row * width..(row + 1) * width];
        dst[0] = line[1] - line[0];
        dst[width - 1] = line[width - 1] - line[width - 2];
        for col in 1..width - 1 {
            dst[col] = (line[col + 1] - line[col - 1]) / 2.0;
        }
    }
    out
}

fn derivative_y(field: &[f64], height: usize, width: usize) -> Vec<f64> {
    let mut out = vec![0.0; field.len()];
    if height < 2 {
        return out;
    }
    let at = |row: usize, col: usize| field[row * width + col];
    for col in 0..width {
        out[col] = at(1, col) - at(0, col);
        out[(height - 1) * width + col] = at(height - 1, col) - at(height - 2, col);
        for row in 1..height - 1 {
            out[row * width + col] = (at(row + 1, col) - at(row - 1, col)) / 2.0;
        }
    }
    out
}
