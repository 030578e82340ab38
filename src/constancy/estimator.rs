use crate::constancy::common::error::Result;
use crate::constancy::image::ImageView;
use crate::constancy::vector::Illuminant;

/// Maps an image to a raw illuminant estimate.
///
/// Classical estimators implement this through
/// [`ClassicalMethod`](crate::constancy::classical::ClassicalMethod); a learned
/// model wrapped by the caller implements it the same way and is graded by the
/// same evaluation pipeline.
pub trait IlluminantEstimator: Sync {
    fn name(&self) -> String;
    fn estimate(&self, image: &ImageView<'_>) -> Result<Illuminant>;
}

impl<T: IlluminantEstimator + ?Sized> IlluminantEstimator for &T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn estimate(&self, image: &ImageView<'_>) -> Result<Illuminant> {
        (**self).estimate(image)
    }
}
