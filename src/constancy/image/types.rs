//! Array and image types

use std::fmt;

/// Number of color channels an image must carry.
pub const CHANNELS: usize = 3;

/// Element type of an array buffer.
///
/// Only `U8`, `F32` and `F64` are accepted as images; the other kinds exist so
/// that upstream buffers of the wrong type can be described and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    U8,
    U16,
    I32,
    F32,
    F64,
}

impl ElementType {
    pub fn is_image_type(self) -> bool {
        matches!(self, ElementType::U8 | ElementType::F32 | ElementType::F64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::U8 => "uint8",
            ElementType::U16 => "uint16",
            ElementType::I32 => "int32",
            ElementType::F32 => "float32",
            ElementType::F64 => "float64",
        };
        f.write_str(name)
    }
}

/// Owned, row-major element buffer of an [`NdArray`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ArrayData {
    pub fn len(&self) -> usize {
        match self {
            ArrayData::U8(v) => v.len(),
            ArrayData::U16(v) => v.len(),
            ArrayData::I32(v) => v.len(),
            ArrayData::F32(v) => v.len(),
            ArrayData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            ArrayData::U8(_) => ElementType::U8,
            ArrayData::U16(_) => ElementType::U16,
            ArrayData::I32(_) => ElementType::I32,
            ArrayData::F32(_) => ElementType::F32,
            ArrayData::F64(_) => ElementType::F64,
        }
    }
}

impl From<Vec<u8>> for ArrayData {
    fn from(v: Vec<u8>) -> Self {
        ArrayData::U8(v)
    }
}

impl From<Vec<u16>> for ArrayData {
    fn from(v: Vec<u16>) -> Self {
        ArrayData::U16(v)
    }
}

impl From<Vec<i32>> for ArrayData {
    fn from(v: Vec<i32>) -> Self {
        ArrayData::I32(v)
    }
}

impl From<Vec<f32>> for ArrayData {
    fn from(v: Vec<f32>) -> Self {
        ArrayData::F32(v)
    }
}

impl From<Vec<f64>> for ArrayData {
    fn from(v: Vec<f64>) -> Self {
        ArrayData::F64(v)
    }
}

/// N-dimensional array as handed over by the upstream loader.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: ArrayData,
}

impl NdArray {
    pub fn new(shape: impl Into<Vec<usize>>, data: impl Into<ArrayData>) -> Self {
        Self {
            shape: shape.into(),
            data: data.into(),
        }
    }

    /// Builds a (height, width, 3) `uint8` array from interleaved pixels.
    pub fn from_rgb_u8(height: usize, width: usize, pixels: &[[u8; CHANNELS]]) -> Self {
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        Self::new([height, width, CHANNELS], data)
    }

    /// Builds a (height, width, 3) `float64` array from interleaved pixels.
    pub fn from_rgb_f64(height: usize, width: usize, pixels: &[[f64; CHANNELS]]) -> Self {
        let data: Vec<f64> = pixels.iter().flatten().copied().collect();
        Self::new([height, width, CHANNELS], data)
    }

    /// Builds an image where every pixel has the same value.
    pub fn uniform_f64(height: usize, width: usize, rgb: [f64; CHANNELS]) -> Self {
        Self::from_rgb_f64(height, width, &vec![rgb; height * width])
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }
}

/// Borrowed element buffer of a validated image.
#[derive(Debug, Clone, Copy)]
pub enum Samples<'a> {
    U8(&'a [u8]),
    F32(&'a [f32]),
    F64(&'a [f64]),
}

impl Samples<'_> {
    #[inline]
    fn get(&self, index: usize) -> f64 {
        match self {
            Samples::U8(v) => f64::from(v[index]),
            Samples::F32(v) => f64::from(v[index]),
            Samples::F64(v) => v[index],
        }
    }
}

/// Read-only view of a validated (height, width, 3) image.
///
/// All accessors widen samples to `f64`; the underlying buffer is never copied.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    pub(crate) height: usize,
    pub(crate) width: usize,
    pub(crate) samples: Samples<'a>,
}

impl<'a> ImageView<'a> {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    pub fn element_type(&self) -> ElementType {
        match self.samples {
            Samples::U8(_) => ElementType::U8,
            Samples::F32(_) => ElementType::F32,
            Samples::F64(_) => ElementType::F64,
        }
    }

    /// Top of the nominal intensity range: 255 for `uint8`, 1.0 for floats.
    ///
    /// Intensity thresholds given as fractions are scaled by this value.
    pub fn nominal_max(&self) -> f64 {
        match self.samples {
            Samples::U8(_) => f64::from(u8::MAX),
            Samples::F32(_) | Samples::F64(_) => 1.0,
        }
    }

    /// Pixel at flat (row-major) index.
    #[inline]
    pub fn pixel(&self, index: usize) -> [f64; CHANNELS] {
        let base = index * CHANNELS;
        [
            self.samples.get(base),
            self.samples.get(base + 1),
            self.samples.get(base + 2),
        ]
    }

    pub fn pixels(&self) -> PixelIter<'a> {
        PixelIter {
            view: *self,
            index: 0,
        }
    }

    /// All values of one channel, in row-major order.
    pub fn channel(&self, channel: usize) -> Vec<f64> {
        (0..self.pixel_count())
            .map(|i| self.samples.get(i * CHANNELS + channel))
            .collect()
    }
}

pub struct PixelIter<'a> {
    view: ImageView<'a>,
    index: usize,
}

impl Iterator for PixelIter<'_> {
    type Item = [f64; CHANNELS];

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.view.pixel_count() {
            return None;
        }
        let pixel = self.view.pixel(self.index);
        self.index += 1;
        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.view.pixel_count() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PixelIter<'_> {}
