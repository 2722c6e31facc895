//! Owned 8-bit rasters: interleaved RGB input and single-channel output.
use crate::error::TransformError;

/// Number of interleaved channels in a color raster.
pub const RGB_CHANNELS: usize = 3;

/// Owned color raster, W×H with 3 interleaved 8-bit channels (RGB order),
/// row-major with tightly packed rows.
#[derive(Clone, Debug)]
pub struct RgbImageU8 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Interleaved RGB samples, `3 * w * h` bytes
    pub data: Vec<u8>,
}

impl RgbImageU8 {
    /// Wrap an interleaved RGB buffer, validating its length against the
    /// stated dimensions.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<Self, TransformError> {
        let expected = w * h * RGB_CHANNELS;
        if data.len() != expected {
            return Err(TransformError::BufferMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Row `y` as interleaved RGB bytes (`3 * w` of them).
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w * RGB_CHANNELS;
        &self.data[start..start + self.w * RGB_CHANNELS]
    }

    /// The `[r, g, b]` triple at (x, y).
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.w + x) * RGB_CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Owned single-channel 8-bit raster, row-major, `stride == w`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// One byte per pixel, `w * h` total
    pub data: Vec<u8>,
}

impl GrayImageU8 {
    /// Zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Wrap an existing single-channel buffer, validating its length.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<Self, TransformError> {
        if data.len() != w * h {
            return Err(TransformError::BufferMismatch {
                expected: w * h,
                got: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.w + x] = v;
    }
}

impl crate::image::traits::ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl crate::image::traits::ImageViewMut for GrayImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}
