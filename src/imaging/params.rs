//! Parameter types for the border pipeline.
//!
//! - [`BorderPercent`]: Border thickness as a percentage of the longest edge (1–20, default 5).
//!   Rejected on construction when out of range.
//! - [`Quality`]: Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`EncodeSettings`]: Everything the exporter needs besides the raster and metadata.

use super::error::BorderError;

/// Smallest accepted border percentage.
pub const MIN_PERCENT: u32 = 1;
/// Largest accepted border percentage.
pub const MAX_PERCENT: u32 = 20;
/// Border percentage used when the user does not pick one.
pub const DEFAULT_PERCENT: u32 = 5;

/// Border thickness as a percentage of the image's longest dimension.
///
/// Only values in `MIN_PERCENT..=MAX_PERCENT` can be constructed, so the
/// calculator never sees an out-of-range percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderPercent(u32);

impl BorderPercent {
    pub fn new(value: u32) -> Result<Self, BorderError> {
        if (MIN_PERCENT..=MAX_PERCENT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(BorderError::InvalidParameter(format!(
                "border percentage must be {MIN_PERCENT}-{MAX_PERCENT}, got {value}"
            )))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }

}

impl Default for BorderPercent {
    fn default() -> Self {
        Self(DEFAULT_PERCENT)
    }
}

/// Quality setting for lossy image encoding (1-100).
///
/// Only constructible through [`Quality::new`], so the value is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The value as the single byte JPEG encoders take.
    pub fn as_u8(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Encoder knobs that come from configuration rather than from the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeSettings {
    pub jpeg_quality: Quality,
}
