//! Re-encoding the bordered raster with the source's metadata.
//!
//! Metadata survives differently per container, so the output format is a
//! closed policy chosen from the source format:
//!
//! | Policy | Encoder | Metadata | MIME | Extension |
//! |---|---|---|---|---|
//! | [`OutputFormat::Jpeg`] | `jpeg_encoder::Encoder`, quality 95, optimized Huffman tables | EXIF blob written as APP1 after the JFIF header | `image/jpeg` | `jpg` |
//! | [`OutputFormat::Png`] | `png::Encoder`, best compression, adaptive filter | every textual entry as a text chunk | `image/png` | `png` |
//!
//! Every non-JPEG source goes through the PNG policy.

use super::error::BorderError;
use super::loader::{EXIF_KEY, Metadata, MetadataValue, SourceFormat};
use super::params::{EncodeSettings, Quality};

/// Prefix of an APP1 payload that carries EXIF.
const EXIF_HEADER: &[u8] = b"Exif\0\0";
use super::png_text::{is_latin1, is_valid_keyword};
use image::{ColorType, DynamicImage};
use serde::Serialize;

/// Output container, chosen from the source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

/// An encoded image ready to hand to the output boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub extension: &'static str,
}

impl OutputFormat {
    pub fn for_source(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Jpeg => OutputFormat::Jpeg,
            _ => OutputFormat::Png,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Encode `raster`, carrying over whatever part of `metadata` this
    /// container can hold.
    pub fn encode(
        self,
        raster: &DynamicImage,
        metadata: &Metadata,
        settings: &EncodeSettings,
    ) -> Result<EncodedImage, BorderError> {
        let bytes = match self {
            OutputFormat::Jpeg => encode_jpeg(raster, metadata, settings.jpeg_quality)?,
            OutputFormat::Png => encode_png(raster, metadata)?,
        };
        log::debug!(
            "encoded {}x{} as {} ({} bytes)",
            raster.width(),
            raster.height(),
            self.mime(),
            bytes.len()
        );
        Ok(EncodedImage {
            bytes,
            mime: self.mime(),
            extension: self.extension(),
        })
    }
}

fn encode_jpeg(
    raster: &DynamicImage,
    metadata: &Metadata,
    quality: Quality,
) -> Result<Vec<u8>, BorderError> {
    let color = match raster.color() {
        ColorType::L8 => jpeg_encoder::ColorType::Luma,
        ColorType::Rgb8 => jpeg_encoder::ColorType::Rgb,
        other => {
            return Err(BorderError::Encode(format!(
                "JPEG cannot represent {other:?} images"
            )));
        }
    };
    let (width, height) = match (u16::try_from(raster.width()), u16::try_from(raster.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(BorderError::Encode(format!(
                "{}x{} exceeds the JPEG limit of 65535 px per side",
                raster.width(),
                raster.height()
            )));
        }
    };
    let jpeg_error =
        |e: jpeg_encoder::EncodingError| BorderError::Encode(format!("JPEG encode failed: {e}"));

    let mut buf = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut buf, quality.as_u8());
    encoder.set_optimized_huffman_tables(true);
    if let Some(MetadataValue::Binary(exif)) = metadata.get(EXIF_KEY) {
        let mut payload = Vec::with_capacity(EXIF_HEADER.len() + exif.len());
        payload.extend_from_slice(EXIF_HEADER);
        payload.extend_from_slice(exif);
        encoder.add_app_segment(1, &payload).map_err(jpeg_error)?;
    }
    encoder
        .encode(raster.as_bytes(), width, height, color)
        .map_err(jpeg_error)?;
    Ok(buf)
}

fn encode_png(raster: &DynamicImage, metadata: &Metadata) -> Result<Vec<u8>, BorderError> {
    let (color, depth, data) = png_layout(raster);
    let png_error = |e: png::EncodingError| BorderError::Encode(format!("PNG encode failed: {e}"));

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, raster.width(), raster.height());
        encoder.set_color(color);
        encoder.set_depth(depth);
        encoder.set_compression(png::Compression::Best);
        encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);

        for (key, value) in metadata {
            let Some(text) = value.as_text() else {
                log::warn!("not copying binary metadata '{key}' into PNG");
                continue;
            };
            if !is_valid_keyword(key) {
                log::warn!("not copying metadata '{key}': invalid PNG keyword");
                continue;
            }
            let added = if is_latin1(text) {
                encoder.add_text_chunk(key.clone(), text.to_string())
            } else {
                encoder.add_itxt_chunk(key.clone(), text.to_string())
            };
            added.map_err(png_error)?;
        }

        let mut writer = encoder.write_header().map_err(png_error)?;
        writer.write_image_data(&data).map_err(png_error)?;
        writer.finish().map_err(png_error)?;
    }
    Ok(buf)
}

/// PNG color type, bit depth, and big-endian sample bytes for a raster.
///
/// Float rasters have no PNG equivalent and are stored as 16-bit.
fn png_layout(raster: &DynamicImage) -> (png::ColorType, png::BitDepth, Vec<u8>) {
    use png::BitDepth::{Eight, Sixteen};
    use png::ColorType::{Grayscale, GrayscaleAlpha, Rgb, Rgba};

    match raster {
        DynamicImage::ImageLuma8(_) => (Grayscale, Eight, raster.as_bytes().to_vec()),
        DynamicImage::ImageLumaA8(_) => (GrayscaleAlpha, Eight, raster.as_bytes().to_vec()),
        DynamicImage::ImageRgb8(_) => (Rgb, Eight, raster.as_bytes().to_vec()),
        DynamicImage::ImageRgba8(_) => (Rgba, Eight, raster.as_bytes().to_vec()),
        DynamicImage::ImageLuma16(buf) => (Grayscale, Sixteen, be_bytes(buf.as_raw())),
        DynamicImage::ImageLumaA16(buf) => (GrayscaleAlpha, Sixteen, be_bytes(buf.as_raw())),
        DynamicImage::ImageRgb16(buf) => (Rgb, Sixteen, be_bytes(buf.as_raw())),
        DynamicImage::ImageRgba16(buf) => (Rgba, Sixteen, be_bytes(buf.as_raw())),
        DynamicImage::ImageRgb32F(_) => (Rgb, Sixteen, be_bytes(raster.to_rgb16().as_raw())),
        _ => (Rgba, Sixteen, be_bytes(raster.to_rgba16().as_raw())),
    }
}

fn be_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}
