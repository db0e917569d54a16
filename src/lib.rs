//! # Simple Border
//!
//! Adds a uniform white border to a photo, sized as a percentage of its
//! longest edge, and writes it back in the original format without losing
//! the metadata that matters.
//!
//! # Architecture: One Straight Pipeline
//!
//! ```text
//! bytes ─ decode ─ border width ─ pad with white ─ encode + metadata ─ artifact
//! ```
//!
//! Each invocation runs the whole pipeline once. There is no cache and no
//! state between runs: [`pipeline::run`] is a pure function of a
//! [`pipeline::RunContext`] (file name, bytes, percentage) and the encoder
//! settings, so it is tested without touching the file system.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Decode, border math, compositing, format-specific encoding |
//! | [`pipeline`] | Run context and the end-to-end `run` / `inspect` functions |
//! | [`preview`] | Side-by-side HTML preview rendered with Maud |
//! | [`naming`] | `{stem}_bordered.{ext}` output names |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Metadata Follows the Container
//!
//! JPEG and PNG keep metadata in different places, so the exporter is a
//! closed [`imaging::OutputFormat`] policy rather than a chain of
//! conditionals:
//!
//! - **JPEG** keeps its EXIF blob byte-for-byte. Capture time and camera
//!   orientation live there, and losing them on a border round trip would
//!   rotate phone photos and reorder albums.
//! - **PNG** keeps its text chunks key-for-key.
//!
//! Anything that is not a JPEG is written as PNG.
//!
//! ## Integer Border Math
//!
//! The border is `floor(longest_edge × percent / 100)` in integer arithmetic.
//! The same upload and percentage always give the same pixel count, on every
//! platform.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding uses the `image` crate; encoding uses `jpeg-encoder` and `png`. No
//! ImageMagick, no libjpeg, no system dependencies.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod preview;

#[cfg(test)]
pub(crate) mod test_helpers;
