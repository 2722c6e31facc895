//! Decode/encode between byte streams and the crate's raster types.
//!
//! - `decode_rgb`: sniff and decode any format the `image` crate supports,
//!   normalized to interleaved 8-bit RGB.
//! - `encode_gray_png`: PNG-encode a single-channel raster in memory.
//! - `load_rgb` / `save_gray_png`: file-path variants for offline tools.
use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};

use super::{GrayImageU8, RgbImageU8};
use crate::error::SketchError;

/// Decode an in-memory byte stream into an RGB raster.
///
/// The container format is sniffed from the bytes; anything the decoder
/// cannot parse is a [`SketchError::Decode`].
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImageU8, SketchError> {
    let decoded = image::load_from_memory(bytes).map_err(SketchError::Decode)?;
    let rgb = decoded.to_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    Ok(RgbImageU8::from_raw(w, h, rgb.into_raw())?)
}

/// PNG-encode a single-channel raster in memory.
pub fn encode_gray_png(img: &GrayImageU8) -> Result<Vec<u8>, SketchError> {
    let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(img.w as u32, img.h as u32, img.data.clone())
            .ok_or_else(|| SketchError::Encode("pixel buffer does not match dimensions".into()))?;
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(buffer)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| SketchError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Read and decode an image file into an RGB raster.
pub fn load_rgb(path: &Path) -> Result<RgbImageU8, SketchError> {
    let bytes = fs::read(path).map_err(|e| SketchError::storage(path, e))?;
    decode_rgb(&bytes)
}

/// PNG-encode a single-channel raster and write it to `path`, creating
/// parent directories as needed.
pub fn save_gray_png(img: &GrayImageU8, path: &Path) -> Result<(), SketchError> {
    let png = encode_gray_png(img)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SketchError::storage(parent, e))?;
        }
    }
    fs::write(path, png).map_err(|e| SketchError::storage(path, e))
}
