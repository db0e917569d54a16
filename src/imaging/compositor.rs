//! Uniform white padding around a raster.
//!
//! The source pixels are copied unchanged into the centre of a new canvas that
//! is `border` pixels larger on every edge. New pixels are white: every
//! channel, alpha included, at the maximum value of the subpixel type
//! (`255` for 8-bit, `65535` for 16-bit, `1.0` for float).

use super::calculations::bordered_dimensions;
use image::{DynamicImage, ImageBuffer, Pixel, Primitive, imageops};

/// Pad `raster` by `border` pixels on every edge with white.
///
/// The color mode of the result matches the input. A zero border returns an
/// identical copy.
pub fn add_border(raster: &DynamicImage, border: u32) -> DynamicImage {
    match raster {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(pad(buf, border)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(pad(buf, border)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(pad(buf, border)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(pad(buf, border)),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(pad(buf, border)),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(pad(buf, border)),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(pad(buf, border)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(pad(buf, border)),
        DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(pad(buf, border)),
        DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(pad(buf, border)),
        // DynamicImage is non-exhaustive; RGBA float holds any future mode losslessly
        other => DynamicImage::ImageRgba32F(pad(&other.to_rgba32f(), border)),
    }
}

/// White for pixel type `P`: every channel at the subpixel maximum.
pub fn white<P: Pixel>() -> P {
    let channels =
        vec![<P::Subpixel as Primitive>::DEFAULT_MAX_VALUE; usize::from(P::CHANNEL_COUNT)];
    *P::from_slice(&channels)
}

fn pad<P: Pixel>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    border: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let (width, height) = bordered_dimensions(src.dimensions(), border);
    let mut canvas = ImageBuffer::from_pixel(width, height, white::<P>());
    imageops::replace(&mut canvas, src, i64::from(border), i64::from(border));
    canvas
}
