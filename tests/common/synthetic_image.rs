use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use pencil_sketch::image::RgbImageU8;

/// Generates a solid-color RGB image.
pub fn solid_rgb(width: usize, height: usize, rgb: [u8; 3]) -> RgbImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        data.extend_from_slice(&rgb);
    }
    RgbImageU8::from_raw(width, height, data).expect("buffer length matches dimensions")
}

/// Generates a two-tone color checkerboard.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> RgbImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let sum = (x / cell + y / cell) as i32;
            let tone = if sum & 1 == 0 { 32u8 } else { 220u8 };
            data.extend_from_slice(&[tone, tone, tone]);
        }
    }
    RgbImageU8::from_raw(width, height, data).expect("buffer length matches dimensions")
}

/// PNG-encode a solid-color image for upload scenarios.
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(width, height, |_, _| Rgb(rgb));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(buffer)
        .write_to(&mut out, ImageFormat::Png)
        .expect("in-memory PNG encode");
    out.into_inner()
}
