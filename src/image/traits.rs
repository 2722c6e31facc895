//! Read and write access to single-channel rasters by row.
//!
//! The sketch stages only ever walk whole rows, so the traits expose row
//! slices rather than per-pixel accessors; concrete types add `get`/`set`
//! where random access is needed.

/// Read-only view of a single-channel raster.
pub trait ImageView {
    type Pixel: Copy;

    /// Width in pixels.
    fn width(&self) -> usize;
    /// Height in pixels.
    fn height(&self) -> usize;
    /// Elements between consecutive rows.
    fn stride(&self) -> usize;

    /// Row `y` as a slice of `width` pixels.
    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Iterate rows top to bottom.
    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width()
    }

    /// Whole buffer as one slice when rows are tightly packed.
    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

/// Mutable row access for owned rasters.
pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}

/// Iterator over the rows of an [`ImageView`].
pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
