use tracing::debug;

use crate::constancy::classical::channels::minkowski_mean;
use crate::constancy::classical::types::ShadesOfGrayParams;
use crate::constancy::common::error::Result;
use crate::constancy::image::{ImageView, CHANNELS};
use crate::constancy::vector::Illuminant;

/// Shades of gray: per-channel Minkowski p-mean of the intensities.
///
/// Interpolates between gray world (p = 1) and max-RGB (p = ∞).
pub fn shades_of_gray(image: &ImageView<'_>, params: &ShadesOfGrayParams) -> Result<Illuminant> {
    params.validate()?;

    let mut estimate = [0.0; CHANNELS];
    for (channel, slot) in estimate.iter_mut().enumerate() {
        *slot = minkowski_mean(&image.channel(channel), params.p);
    }

    debug!(?estimate, p = params.p, "shades of gray estimate");
    Ok(Illuminant(estimate))
}
