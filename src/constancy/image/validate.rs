use tracing::trace;

use crate::constancy::common::error::{ConstancyError, Result, ShapeError};
use crate::constancy::image::types::{ArrayData, ImageView, NdArray, Samples, CHANNELS};

const REQUIRED_NDIM: usize = 3;

/// Checks that `array` is a (height, width, 3) image of an accepted dtype.
///
/// Checks run in a fixed order: buffer consistency, dimensionality, channel
/// count, element type, then non-empty spatial extent. The first failing check
/// decides the error.
pub fn validate(array: &NdArray) -> Result<ImageView<'_>> {
    let shape = array.shape();
    let len = array.data().len();

    let expected = shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| ConstancyError::TypeError(format!("shape {shape:?} overflows usize")))?;
    if expected != len {
        return Err(ConstancyError::TypeError(format!(
            "buffer holds {len} elements but shape {shape:?} requires {expected}"
        )));
    }

    if shape.len() != REQUIRED_NDIM {
        return Err(ShapeError::Dimensions(shape.len()).into());
    }

    if shape[2] != CHANNELS {
        return Err(ShapeError::Channels(shape[2]).into());
    }

    let samples = match array.data() {
        ArrayData::U8(v) => Samples::U8(v),
        ArrayData::F32(v) => Samples::F32(v),
        ArrayData::F64(v) => Samples::F64(v),
        other => return Err(ConstancyError::DtypeError(other.element_type())),
    };

    let (height, width) = (shape[0], shape[1]);
    if height == 0 || width == 0 {
        return Err(ShapeError::Empty { height, width }.into());
    }

    trace!(height, width, dtype = %array.element_type(), "image validated");
    Ok(ImageView {
        height,
        width,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constancy::image::ElementType;

    #[test]
    fn test_valid_u8_image() {
        let array = NdArray::from_rgb_u8(2, 2, &[[10, 20, 30]; 4]);
        let view = validate(&array).unwrap();
        assert_eq!(view.height(), 2);
        assert_eq!(view.width(), 2);
        assert_eq!(view.element_type(), ElementType::U8);
        assert_eq!(view.pixel(3), [10.0, 20.0, 30.0]);
        assert_eq!(view.nominal_max(), 255.0);
    }

    #[test]
    fn test_valid_float_images() {
        let array = NdArray::new([1, 2, 3], vec![0.1f32, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let view = validate(&array).unwrap();
        assert_eq!(view.element_type(), ElementType::F32);
        assert_eq!(view.nominal_max(), 1.0);
        assert_eq!(view.channel(2), vec![f64::from(0.3f32), f64::from(0.6f32)]);

        let array = NdArray::uniform_f64(3, 4, [0.5, 0.5, 0.5]);
        assert_eq!(validate(&array).unwrap().pixels().count(), 12);
    }

    #[test]
    fn test_buffer_shape_mismatch_is_type_error() {
        let array = NdArray::new([2, 2, 3], vec![0u8; 5]);
        assert!(matches!(validate(&array), Err(ConstancyError::TypeError(_))));
    }

    #[test]
    fn test_wrong_ndim_reports_actual_ndim() {
        let array = NdArray::new([4, 3], vec![0u8; 12]);
        assert!(matches!(
            validate(&array),
            Err(ConstancyError::ShapeError(ShapeError::Dimensions(2)))
        ));

        let array = NdArray::new([1, 2, 2, 3], vec![0u8; 12]);
        assert!(matches!(
            validate(&array),
            Err(ConstancyError::ShapeError(ShapeError::Dimensions(4)))
        ));
    }

    #[test]
    fn test_wrong_channel_count_reports_actual_count() {
        let array = NdArray::new([2, 2, 4], vec![0u8; 16]);
        assert!(matches!(
            validate(&array),
            Err(ConstancyError::ShapeError(ShapeError::Channels(4)))
        ));
    }

    #[test]
    fn test_unsupported_dtype() {
        let array = NdArray::new([1, 1, 3], vec![1u16, 2, 3]);
        assert!(matches!(
            validate(&array),
            Err(ConstancyError::DtypeError(ElementType::U16))
        ));

        let array = NdArray::new([1, 1, 3], vec![1i32, 2, 3]);
        assert!(matches!(
            validate(&array),
            Err(ConstancyError::DtypeError(ElementType::I32))
        ));
    }

    #[test]
    fn test_checks_run_in_order() {
        // Wrong channel count and wrong dtype: the shape check wins.
        let array = NdArray::new([1, 1, 4], vec![1u16, 2, 3, 4]);
        assert!(matches!(
            validate(&array),
            Err(ConstancyError::ShapeError(ShapeError::Channels(4)))
        ));
    }

    #[test]
    fn test_empty_image_rejected() {
        let array = NdArray::new([0, 5, 3], Vec::<u8>::new());
        assert!(matches!(
            validate(&array),
            Err(ConstancyError::ShapeError(ShapeError::Empty { height: 0, width: 5 }))
        ));
    }

    #[test]
    fn test_validation_does_not_touch_input() {
        let array = NdArray::from_rgb_u8(1, 2, &[[1, 2, 3], [4, 5, 6]]);
        let before = array.clone();
        let _ = validate(&array).unwrap();
        assert_eq!(array, before);
    }
}
