//! Tool configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional user file in the config directory (the current
//! directory unless `--config` says otherwise).
//!
//! ```toml
//! # defaults
//!
//! [border]
//! percentage = 5    # Border as % of the longest edge (1-20)
//!
//! [jpeg]
//! quality = 95      # JPEG encoding quality (1-100)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{EncodeSettings, MAX_PERCENT, MIN_PERCENT, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Border defaults.
    pub border: BorderConfig,
    /// JPEG output settings.
    pub jpeg: JpegConfig,
}

/// Border defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BorderConfig {
    /// Percentage of the longest edge used when `--percent` is not given.
    pub percentage: u32,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self { percentage: 5 }
    }
}

/// JPEG output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegConfig {
    /// Encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for JpegConfig {
    fn default() -> Self {
        Self { quality: 95 }
    }
}

impl ToolConfig {
    /// Range-check the border percentage and JPEG quality.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PERCENT..=MAX_PERCENT).contains(&self.border.percentage) {
            return Err(ConfigError::Validation(format!(
                "border.percentage must be {MIN_PERCENT}-{MAX_PERCENT}"
            )));
        }
        if !(1..=100).contains(&self.jpeg.quality) {
            return Err(ConfigError::Validation(
                "jpeg.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    /// Encoder settings derived from this config.
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            jpeg_quality: Quality::new(self.jpeg.quality),
        }
    }
}

// ----------------------------------------------------------------------------
// Loading
// ----------------------------------------------------------------------------

/// Built-in defaults as a TOML table, the layer a user file is laid over.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ToolConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`, descending into tables.
///
/// For this tool the tables are the `[border]` and `[jpeg]` sections: a user
/// file with only `[jpeg] quality` keeps the stock `[border] percentage`, and
/// within a section each user key replaces the stock one. A non-table value
/// in `overlay` always wins.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut sections), toml::Value::Table(user)) => {
            for (name, user_value) in user {
                let layered = match sections.remove(&name) {
                    Some(stock) => merge_toml(stock, user_value),
                    None => user_value,
                };
                sections.insert(name, layered);
            }
            toml::Value::Table(sections)
        }
        (_, user) => user,
    }
}

/// Parse `dir/config.toml` into an untyped table of `[border]`/`[jpeg]`
/// sections, or `None` when the directory has no such file.
///
/// Keys are not checked here; unknown ones surface when the merged table is
/// deserialized into [`ToolConfig`].
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    log::debug!("using {}", path.display());
    Ok(Some(toml::from_str(&text)?))
}

/// Stock sections plus optional user sections, deserialized into a
/// [`ToolConfig`] and range-checked (`border.percentage` 1-20,
/// `jpeg.quality` 1-100).
pub fn resolve_config(
    stock: toml::Value,
    user: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let layered = match user {
        Some(user) => merge_toml(stock, user),
        None => stock,
    };
    let config: ToolConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Effective configuration for a run started with `--config dir`.
///
/// A missing file means stock defaults. Misspelled keys and out-of-range
/// values are errors, never silently ignored.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Annotated `config.toml` printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# simple-border configuration
# ===========================
# Every key is optional; the values below are what you get without this file.
#
# The file is read from the current directory, or from the directory
# passed with --config. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Border
# ---------------------------------------------------------------------------
[border]
# Border thickness as a percentage of the image's longest dimension,
# used when --percent is not given. Allowed range: 1-20.
percentage = 5

# ---------------------------------------------------------------------------
# JPEG output
# ---------------------------------------------------------------------------
[jpeg]
# Encoding quality for JPEG sources (1 = worst, 100 = best).
# PNG sources are always written losslessly.
quality = 95
"##
}
