//! Output filename derivation.
//!
//! Every output is named after the upload: the last extension is stripped,
//! a suffix is appended, then the new extension.
//!
//! - `photo.JPG` + `jpg` → `photo_bordered.jpg`
//! - `scan.final.png` + `png` → `scan.final_bordered.png`
//! - `README` + `png` → `README_bordered.png`

use std::path::Path;

/// Suffix appended to the stem of every bordered image.
pub const BORDERED_SUFFIX: &str = "_bordered";

/// Strip directories and the last extension from an uploaded file name.
///
/// Only the text after the final `.` is removed, so `a.b.jpg` → `a.b`.
/// Names without a dot are returned unchanged.
pub fn upload_stem(name: &str) -> &str {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    match base.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => base,
    }
}

/// File name for the bordered image: `{stem}_bordered.{extension}`.
pub fn output_filename(upload_name: &str, extension: &str) -> String {
    format!("{}{BORDERED_SUFFIX}.{extension}", upload_stem(upload_name))
}

/// File name for the HTML side-by-side preview: `{stem}_preview.html`.
pub fn preview_filename(upload_name: &str) -> String {
    format!("{}_preview.html", upload_stem(upload_name))
}
