//! Decoding an uploaded image together with the metadata worth keeping.
//!
//! | Step | How |
//! |---|---|
//! | Allow-list | declared extension must be `jpg`, `jpeg` or `png` |
//! | Format tag | sniffed from the bytes via `image::guess_format` |
//! | Pixels | `image::load_from_memory_with_format` |
//! | JPEG metadata | EXIF blob from APP1 ([`jpeg_segments`](super::jpeg_segments)) |
//! | PNG metadata | text chunks ([`png_text`](super::png_text)) |

use super::error::BorderError;
use super::{jpeg_segments, png_text};
use image::{ColorType, DynamicImage, ImageFormat};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Extensions accepted at the input boundary.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Metadata key under which a JPEG's EXIF blob is stored.
pub const EXIF_KEY: &str = "exif";

/// Encoded format of the uploaded file, as sniffed from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl SourceFormat {
    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// A single metadata entry lifted from the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    Text(String),
    Binary(Vec<u8>),
}

impl MetadataValue {
    /// The entry as text: `Text` as-is, `Binary` only when it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            MetadataValue::Binary(bytes) => std::str::from_utf8(bytes).ok(),
        }
    }
}

/// Metadata keyed by name. Later entries with the same key replace earlier ones.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A decoded upload. Immutable once loaded; owned by a single run.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub raster: DynamicImage,
    pub format: SourceFormat,
    pub metadata: Metadata,
}

impl SourceImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.raster.width(), self.raster.height())
    }

    pub fn color(&self) -> ColorType {
        self.raster.color()
    }

    /// The EXIF blob, if the source carried one.
    pub fn exif(&self) -> Option<&[u8]> {
        match self.metadata.get(EXIF_KEY) {
            Some(MetadataValue::Binary(blob)) => Some(blob),
            _ => None,
        }
    }
}

/// Whether the declared file name passes the extension allow-list.
pub fn is_supported_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Decode `bytes` uploaded under the name `name`.
///
/// The name is only used for the allow-list check and error messages; the
/// format tag always comes from the content.
pub fn load(name: &str, bytes: &[u8]) -> Result<SourceImage, BorderError> {
    if !is_supported_name(name) {
        return Err(BorderError::UnsupportedType {
            name: name.to_string(),
        });
    }

    let format = image::guess_format(bytes)
        .ok()
        .and_then(SourceFormat::from_image_format)
        .ok_or_else(|| BorderError::Decode {
            name: name.to_string(),
            reason: "content is not a JPEG or PNG image".into(),
        })?;

    let raster = image::load_from_memory_with_format(bytes, format.image_format()).map_err(
        |e| BorderError::Decode {
            name: name.to_string(),
            reason: e.to_string(),
        },
    )?;

    let metadata = read_metadata(format, bytes);
    log::debug!(
        "decoded {name}: {} {}x{} {:?}, metadata keys {:?}",
        format.name(),
        raster.width(),
        raster.height(),
        raster.color(),
        metadata.keys().collect::<Vec<_>>()
    );

    Ok(SourceImage {
        raster,
        format,
        metadata,
    })
}

fn read_metadata(format: SourceFormat, bytes: &[u8]) -> Metadata {
    let mut metadata = Metadata::new();
    match format {
        SourceFormat::Jpeg => {
            if let Some(exif) = jpeg_segments::read_exif(bytes) {
                metadata.insert(EXIF_KEY.to_string(), MetadataValue::Binary(exif.to_vec()));
            }
        }
        SourceFormat::Png => {
            for (key, text) in png_text::read_text_chunks(bytes) {
                metadata.insert(key, MetadataValue::Text(text));
            }
        }
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{jpeg_bytes, jpeg_with_exif, png_bytes, png_with_text, sample_exif};

    #[test]
    fn allow_list_is_case_insensitive() {
        assert!(is_supported_name("photo.JPG"));
        assert!(is_supported_name("photo.jpeg"));
        assert!(is_supported_name("scan.Png"));
        assert!(is_supported_name("dir/with.dots/photo.jpg"));
    }

    #[test]
    fn allow_list_rejects_other_types() {
        assert!(!is_supported_name("anim.gif"));
        assert!(!is_supported_name("photo"));
        assert!(!is_supported_name("photo.jpg.txt"));
        assert!(!is_supported_name(".png"));
    }

    #[test]
    fn load_jpeg_reports_format_and_size() {
        let source = load("photo.jpg", &jpeg_bytes(40, 30)).unwrap();
        assert_eq!(source.format, SourceFormat::Jpeg);
        assert_eq!(source.dimensions(), (40, 30));
        assert_eq!(source.color(), ColorType::Rgb8);
        assert!(source.metadata.is_empty());
        assert_eq!(source.exif(), None);
    }

    #[test]
    fn load_jpeg_extracts_exif() {
        let exif = sample_exif();
        let source = load("photo.jpg", &jpeg_with_exif(20, 10, &exif)).unwrap();
        assert_eq!(source.exif(), Some(exif.as_slice()));
    }

    #[test]
    fn load_png_extracts_text_chunks() {
        let source = load("scan.png", &png_with_text(8, 8, &[("Author", "X")])).unwrap();
        assert_eq!(source.format, SourceFormat::Png);
        assert_eq!(
            source.metadata.get("Author"),
            Some(&MetadataValue::Text("X".into()))
        );
    }

    #[test]
    fn format_comes_from_content_not_name() {
        let source = load("mislabelled.png", &jpeg_bytes(8, 8)).unwrap();
        assert_eq!(source.format, SourceFormat::Jpeg);
    }

    #[test]
    fn load_rejects_disallowed_extension_before_decoding() {
        let err = load("anim.gif", &png_bytes(4, 4)).unwrap_err();
        assert!(matches!(err, BorderError::UnsupportedType { .. }));
    }

    #[test]
    fn load_rejects_garbage() {
        let err = load("photo.jpg", b"not an image at all").unwrap_err();
        assert!(matches!(err, BorderError::Decode { ref name, .. } if name == "photo.jpg"));
        assert_eq!(err.stage(), "decode");
    }

    #[test]
    fn load_rejects_jpeg_without_frame() {
        // SOI + JFIF header only: sniffs as JPEG but has no image data
        let mut data = jpeg_bytes(64, 64);
        data.truncate(20);
        assert!(matches!(
            load("photo.jpg", &data),
            Err(BorderError::Decode { .. })
        ));
    }

    #[test]
    fn binary_metadata_as_text_requires_utf8() {
        assert_eq!(MetadataValue::Binary(b"hello".to_vec()).as_text(), Some("hello"));
        assert_eq!(MetadataValue::Binary(vec![0xFF, 0xFE]).as_text(), None);
        assert_eq!(MetadataValue::Text("x".into()).as_text(), Some("x"));
    }
}
