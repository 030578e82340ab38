use tracing::debug;

use crate::constancy::classical::channels::{magnitudes, trimmed_mean};
use crate::constancy::classical::types::GrayWorldParams;
use crate::constancy::common::error::Result;
use crate::constancy::common::numeric::mean;
use crate::constancy::image::{ImageView, CHANNELS};
use crate::constancy::vector::Illuminant;

/// Gray world: the average scene reflectance is achromatic, so the per-channel
/// mean of magnitudes is the illuminant. A non-zero `exclude_percent` averages
/// only the values between the lower and upper exclusion percentiles.
pub fn gray_world(image: &ImageView<'_>, params: &GrayWorldParams) -> Result<Illuminant> {
    params.validate()?;

    let mut estimate = [0.0; CHANNELS];
    for (channel, slot) in estimate.iter_mut().enumerate() {
        let values = magnitudes(&image.channel(channel));
        *slot = if params.exclude_percent > 0.0 {
            trimmed_mean(&values, params.exclude_percent)
        } else {
            mean(&values)
        };
    }

    debug!(?estimate, exclude_percent = params.exclude_percent, "gray world estimate");
    Ok(Illuminant(estimate))
}
