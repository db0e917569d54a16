//! Image processing in pure Rust, no system libraries.
//!
//! | Stage | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory_with_format` |
//! | **EXIF** | custom APP1 walker ([`jpeg_segments`]) on read, encoder APP segment on write |
//! | **PNG text** | `png` crate decoder/encoder |
//! | **Border** | `image::imageops::replace` onto a white canvas |
//! | **Encode** | `jpeg_encoder::Encoder` (quality 95, optimized Huffman) or `png::Encoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for border math (unit testable)
//! - **Parameters**: Validated inputs ([`BorderPercent`], [`Quality`])
//! - **Loader**: Bytes → [`SourceImage`] with metadata
//! - **Compositor**: Raster → padded raster
//! - **Export**: Padded raster → [`EncodedImage`] via the [`OutputFormat`] policy

mod calculations;
pub mod compositor;
mod error;
pub mod export;
pub(crate) mod jpeg_segments;
pub mod loader;
mod params;
pub(crate) mod png_text;

pub use calculations::{border_width, bordered_dimensions, calculate_border_width};
pub use compositor::add_border;
pub use error::BorderError;
pub use export::{EncodedImage, OutputFormat};
pub use loader::{Metadata, MetadataValue, SourceFormat, SourceImage, load};
pub use params::{
    BorderPercent, DEFAULT_PERCENT, EncodeSettings, MAX_PERCENT, MIN_PERCENT, Quality,
};
