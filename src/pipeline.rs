//! The border pipeline as a pure function of its run context.
//!
//! ```text
//! RunContext { file_name, bytes, percentage }
//!     → validate percentage        (InvalidParameter)
//!     → decode + metadata          (Decode / UnsupportedType)
//!     → border width
//!     → pad with white
//!     → encode per output policy   (Encode)
//!     → Run { source, border, bordered, artifact }
//! ```
//!
//! Nothing here touches the file system or global state; the CLI reads the
//! upload, calls [`run`], and writes the artifact. Every error ends the run
//! with no artifact.

use crate::imaging::{
    BorderError, BorderPercent, EncodeSettings, OutputFormat, SourceFormat, SourceImage,
    add_border, bordered_dimensions, calculate_border_width, load,
};
use crate::naming::output_filename;
use image::DynamicImage;
use serde::Serialize;

/// Everything a single run needs, passed in explicitly.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    /// Name the image was uploaded under (used for the allow-list and output name).
    pub file_name: &'a str,
    /// Raw uploaded bytes.
    pub bytes: &'a [u8],
    /// Border thickness as a percentage of the longest edge.
    pub percentage: u32,
}

/// The downloadable result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// A completed run. Owns both rasters until it is dropped.
#[derive(Debug, Clone)]
pub struct Run {
    pub source: SourceImage,
    pub percent: BorderPercent,
    pub border: u32,
    pub bordered: DynamicImage,
    pub artifact: Artifact,
}

impl Run {
    pub fn bordered_dimensions(&self) -> (u32, u32) {
        (self.bordered.width(), self.bordered.height())
    }
}

/// Decode-only view of an upload, for `inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub file_name: String,
    pub format: SourceFormat,
    pub width: u32,
    pub height: u32,
    pub color: String,
    pub metadata_keys: Vec<String>,
    pub percentage: u32,
    pub border: u32,
    pub bordered_width: u32,
    pub bordered_height: u32,
    pub output_format: OutputFormat,
}

/// Run the whole pipeline: decode, border, encode.
///
/// The percentage is validated before any decoding happens.
pub fn run(ctx: &RunContext<'_>, settings: &EncodeSettings) -> Result<Run, BorderError> {
    let percent = BorderPercent::new(ctx.percentage)?;
    let source = load(ctx.file_name, ctx.bytes)?;

    let border = calculate_border_width(percent, source.dimensions());
    log::debug!(
        "{}: {}% of longest edge → {border}px border",
        ctx.file_name,
        percent.value()
    );
    let bordered = add_border(&source.raster, border);

    let policy = OutputFormat::for_source(source.format);
    let encoded = policy.encode(&bordered, &source.metadata, settings)?;
    let artifact = Artifact {
        file_name: output_filename(ctx.file_name, encoded.extension),
        mime: encoded.mime,
        bytes: encoded.bytes,
    };

    log::info!(
        "{} → {} ({}x{}, {} bytes)",
        ctx.file_name,
        artifact.file_name,
        bordered.width(),
        bordered.height(),
        artifact.bytes.len()
    );

    Ok(Run {
        source,
        percent,
        border,
        bordered,
        artifact,
    })
}

/// Decode an upload and report what a run with `ctx.percentage` would do.
pub fn inspect(ctx: &RunContext<'_>) -> Result<Inspection, BorderError> {
    let percent = BorderPercent::new(ctx.percentage)?;
    let source = load(ctx.file_name, ctx.bytes)?;
    let (width, height) = source.dimensions();
    let border = calculate_border_width(percent, (width, height));
    let (bordered_width, bordered_height) = bordered_dimensions((width, height), border);

    Ok(Inspection {
        file_name: ctx.file_name.to_string(),
        format: source.format,
        width,
        height,
        color: format!("{:?}", source.color()),
        metadata_keys: source.metadata.keys().cloned().collect(),
        percentage: percent.value(),
        border,
        bordered_width,
        bordered_height,
        output_format: OutputFormat::for_source(source.format),
    })
}
