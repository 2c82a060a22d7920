//! Geotag configuration.
//!
//! Settings live in an optional `geotag.toml` inside the directory being
//! processed. User values are merged on top of stock defaults, so a file only
//! needs the keys it wants to change:
//!
//! ```toml
//! # Only look at JPEGs, and only at the top level
//! [scan]
//! extensions = ["jpg", "jpeg"]
//! recursive = false
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [scan]
//! extensions = ["jpg", "jpeg", "png", "webp"]  # Files to include in a scan
//! recursive = true                             # Descend into subdirectories
//! follow_links = false                         # Follow symlinks while walking
//!
//! [output]
//! precision = 6             # Decimals in location strings (0-12)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the processed directory.
pub const CONFIG_FILE: &str = "geotag.toml";

/// Upper bound for `output.precision`; f64 carries ~15 significant digits
/// and longitudes use three of them before the decimal point.
const MAX_PRECISION: usize = 12;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeotagConfig {
    /// Which files a directory scan picks up and how it walks.
    pub scan: ScanConfig,
    /// Formatting of reported coordinates.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl GeotagConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .scan
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "scan.extensions entries are bare extensions like \"jpg\", got {bad:?}"
            )));
        }
        if self.output.precision > MAX_PRECISION {
            return Err(ConfigError::Validation(format!(
                "output.precision must be 0-{MAX_PRECISION}"
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Directory scan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions (case-insensitive, no leading dot) to include.
    /// Non-JPEG entries are listed in the manifest as skipped.
    pub extensions: Vec<String>,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            recursive: true,
            follow_links: false,
        }
    }
}

impl ScanConfig {
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Output formatting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Decimal places in `"lat, lon"` location strings.
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel extraction workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(GeotagConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `geotag.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GeotagConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GeotagConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config for a directory: stock defaults plus its `geotag.toml`, if any.
pub fn load_config(dir: &Path) -> Result<GeotagConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_some() {
        tracing::debug!(dir = %dir.display(), "loaded {CONFIG_FILE}");
    }
    resolve_config(stock_defaults_value()?, overlay)
}

/// A fully-commented stock `geotag.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Cacao Geotag Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as `geotag.toml` in the directory you scan.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Directory scan
# ---------------------------------------------------------------------------
[scan]
# File extensions to include (case-insensitive, no leading dot).
# Only JPEG files carry the EXIF layout we read; other listed types are
# reported as skipped so they still show up in the manifest.
extensions = ["jpg", "jpeg", "png", "webp"]

# Descend into subdirectories.
recursive = true

# Follow symbolic links while walking.
follow_links = false

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Decimal places in "latitude, longitude" location strings (0-12).
# 6 decimals is roughly 0.1 m on the ground.
precision = 6

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel extraction workers. Omit to use all CPU cores.
# Values above the core count are clamped.
# max_processes = 4
"##
}
