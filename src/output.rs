//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Add
//!
//! ```text
//! photo.jpg (JPEG, 4032 × 3024)
//!     Border: 5% → 201 px
//!     New size: 4434 × 3426
//!     Metadata: exif
//!     Output: photo_bordered.jpg (image/jpeg, 3.1 MB)
//! ```
//!
//! ## Inspect
//!
//! ```text
//! scan.png (PNG, 800 × 600, Rgba8)
//!     Metadata: Author, Software
//!     Border at 5%: 40 px → 880 × 680
//!     Output format: png
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::imaging::{BorderError, Metadata};
use crate::pipeline::{Inspection, Run};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count (`512 B`, `14.2 KB`, `3.1 MB`).
fn format_bytes(len: usize) -> String {
    const KB: f64 = 1024.0;
    let len_f = len as f64;
    if len_f < KB {
        format!("{len} B")
    } else if len_f < KB * KB {
        format!("{:.1} KB", len_f / KB)
    } else {
        format!("{:.1} MB", len_f / (KB * KB))
    }
}

/// Comma-separated metadata keys, or `none`.
fn metadata_keys(metadata: &Metadata) -> String {
    if metadata.is_empty() {
        "none".to_string()
    } else {
        metadata.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

// ============================================================================
// add
// ============================================================================

/// Format the summary of a finished run and where its artifact went.
pub fn format_run_output(upload_name: &str, run: &Run, written_to: &Path) -> Vec<String> {
    let (width, height) = run.source.dimensions();
    let (new_width, new_height) = run.bordered_dimensions();
    let ind = indent(1);
    vec![
        format!(
            "{upload_name} ({}, {width} × {height})",
            run.source.format.name()
        ),
        format!("{ind}Border: {}% → {} px", run.percent.value(), run.border),
        format!("{ind}New size: {new_width} × {new_height}"),
        format!("{ind}Metadata: {}", metadata_keys(&run.source.metadata)),
        format!(
            "{ind}Output: {} ({}, {})",
            written_to.display(),
            run.artifact.mime,
            format_bytes(run.artifact.bytes.len())
        ),
    ]
}

pub fn print_run_output(upload_name: &str, run: &Run, written_to: &Path) {
    for line in format_run_output(upload_name, run, written_to) {
        println!("{}", line);
    }
}

// ============================================================================
// inspect
// ============================================================================

/// Format a decode-only inspection report.
pub fn format_inspection(report: &Inspection) -> Vec<String> {
    let ind = indent(1);
    let keys = if report.metadata_keys.is_empty() {
        "none".to_string()
    } else {
        report.metadata_keys.join(", ")
    };
    vec![
        format!(
            "{} ({}, {} × {}, {})",
            report.file_name,
            report.format.name(),
            report.width,
            report.height,
            report.color
        ),
        format!("{ind}Metadata: {keys}"),
        format!(
            "{ind}Border at {}%: {} px → {} × {}",
            report.percentage, report.border, report.bordered_width, report.bordered_height
        ),
        format!("{ind}Output format: {}", report.output_format.extension()),
    ]
}

pub fn print_inspection(report: &Inspection) {
    for line in format_inspection(report) {
        println!("{}", line);
    }
}

// ============================================================================
// errors
// ============================================================================

/// One-line error message naming the stage that failed.
pub fn format_error(err: &BorderError) -> String {
    format!("error ({}): {}", err.stage(), err)
}
