use tracing::debug;

use crate::constancy::classical::channels::channel_max;
use crate::constancy::classical::types::WhitePatchParams;
use crate::constancy::common::error::Result;
use crate::constancy::common::numeric::{percentile_of_sorted, sorted};
use crate::constancy::image::{ImageView, CHANNELS};
use crate::constancy::vector::Illuminant;

/// White patch: the brightest response per channel is a specular highlight
/// of the illuminant. Below the 100th percentile the estimate ignores the
/// top tail of each channel.
pub fn white_patch(image: &ImageView<'_>, params: &WhitePatchParams) -> Result<Illuminant> {
    params.validate()?;

    let mut estimate = [0.0; CHANNELS];
    for (channel, slot) in estimate.iter_mut().enumerate() {
        let values = image.channel(channel);
        *slot = if params.percentile >= 100.0 {
            channel_max(&values)
        } else {
            percentile_of_sorted(&sorted(&values), params.percentile)
        };
    }

    debug!(?estimate, percentile = params.percentile, "white patch estimate");
    Ok(Illuminant(estimate))
}
