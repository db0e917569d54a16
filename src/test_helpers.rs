//! Shared test utilities: synthetic JPEG/PNG fixtures built in memory.
//!
//! Fixtures are generated rather than checked in so every test states the
//! exact size and metadata it depends on.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let jpeg = jpeg_with_exif(40, 30, &sample_exif());
//! let png = png_with_text(8, 8, &[("Author", "X")]);
//! ```

use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

/// A recognisable gradient so padding and content are easy to tell apart.
pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a gradient as a baseline JPEG with no metadata segments.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient_rgb(width, height);
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// A JPEG carrying `exif` in an APP1 segment right after SOI.
///
/// Built by hand so loader tests do not depend on the exporter's splicing.
pub fn jpeg_with_exif(width: u32, height: u32, exif: &[u8]) -> Vec<u8> {
    let plain = jpeg_bytes(width, height);
    let payload_len = 6 + exif.len() + 2;
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&(payload_len as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(exif);
    out.extend_from_slice(&plain[2..]);
    out
}

/// A minimal big-endian TIFF structure with one IFD entry
/// (Orientation = 6), as found in phone photos.
pub fn sample_exif() -> Vec<u8> {
    vec![
        b'M', b'M', 0x00, 0x2A, // byte order + magic
        0x00, 0x00, 0x00, 0x08, // offset of IFD0
        0x00, 0x01, // one entry
        0x01, 0x12, // tag: Orientation
        0x00, 0x03, // type: SHORT
        0x00, 0x00, 0x00, 0x01, // count
        0x00, 0x06, 0x00, 0x00, // value: 6 (rotate 90 CW)
        0x00, 0x00, 0x00, 0x00, // no next IFD
    ]
}

/// Encode an RGB gradient PNG with the given text chunks.
///
/// Latin-1 values go in `tEXt`, anything else in `iTXt`.
pub fn png_with_text(width: u32, height: u32, text: &[(&str, &str)]) -> Vec<u8> {
    let img = gradient_rgb(width, height);
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        for (key, value) in text {
            if value.chars().all(|c| (c as u32) <= 0xFF) {
                encoder
                    .add_text_chunk(key.to_string(), value.to_string())
                    .unwrap();
            } else {
                encoder
                    .add_itxt_chunk(key.to_string(), value.to_string())
                    .unwrap();
            }
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(img.as_raw()).unwrap();
        writer.finish().unwrap();
    }
    buf
}

/// A PNG with no text chunks.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    png_with_text(width, height, &[])
}
