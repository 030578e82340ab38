use tracing::debug;

use crate::constancy::classical::channels::channel_max;
use crate::constancy::common::error::Result;
use crate::constancy::image::{ImageView, CHANNELS};
use crate::constancy::vector::Illuminant;

/// Max-RGB: the per-channel peak response, with no robustness option.
pub fn max_rgb(image: &ImageView<'_>) -> Result<Illuminant> {
    let mut estimate = [0.0; CHANNELS];
    for (channel, slot) in estimate.iter_mut().enumerate() {
        *slot = channel_max(&image.channel(channel));
    }

    debug!(?estimate, "max-RGB estimate");
    Ok(Illuminant(estimate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constancy::classical::{white_patch, WhitePatchParams};
    use crate::constancy::image::{validate, NdArray};

    #[test]
    fn test_matches_non_robust_white_patch() {
        let array = NdArray::from_rgb_f64(
            1,
            3,
            &[[0.1, 0.9, 0.3], [0.7, 0.2, 0.3], [0.2, 0.2, 0.8]],
        );
        let view = validate(&array).unwrap();
        let max = max_rgb(&view).unwrap();
        assert_eq!(max.as_array(), [0.7, 0.9, 0.8]);
        assert_eq!(max, white_patch(&view, &WhitePatchParams::default()).unwrap());
    }
}
