//! Batch GPS extraction over an upload directory.
//!
//! Walks a directory of field photos, runs extraction on every matching file,
//! and produces a [`ScanManifest`] the CLI writes out as JSON.
//!
//! ```text
//! uploads/
//! ├── geotag.toml               # Optional settings
//! ├── lote-3/
//! │   ├── IMG_0412.jpg          # → located
//! │   └── IMG_0413.JPG          # → not_found (stripped metadata)
//! ├── leaf-scan.png             # → skipped (not a JPEG)
//! └── notes.txt                 # ignored (extension not listed)
//! ```
//!
//! Each file is independent, so extraction fans out over the rayon pool.
//! Entries are sorted by relative path afterwards, so the manifest is the same
//! no matter how the work was scheduled. A file that can't be read is recorded
//! as `unreadable`; it does not abort the scan.

use crate::config::{GeotagConfig, ScanConfig};
use crate::extract::{MediaType, read_gps};
use crate::types::{GpsCoordinate, GpsStatus};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),
}

/// Manifest produced by a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanManifest {
    pub root: String,
    pub images: Vec<ImageRecord>,
}

/// One scanned file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Path relative to the scan root, `/`-separated.
    pub path: String,
    pub media_type: String,
    /// `"lat, lon"` at the configured precision, ready to pre-fill a
    /// sector/location field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub gps: RecordStatus,
}

/// [`GpsStatus`] plus the I/O failure case a scan has to tolerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordStatus {
    Extracted(GpsStatus),
    Unreadable { error: String },
}

impl ImageRecord {
    pub fn coordinate(&self) -> Option<&GpsCoordinate> {
        match &self.gps {
            RecordStatus::Extracted(status) => status.coordinate(),
            RecordStatus::Unreadable { .. } => None,
        }
    }
}

/// Per-status counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub located: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub unreadable: usize,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} located, {} without GPS, {} skipped",
            self.total(),
            self.located,
            self.not_found,
            self.skipped
        )?;
        if self.unreadable > 0 {
            write!(f, ", {} unreadable", self.unreadable)?;
        }
        Ok(())
    }
}

impl ScanSummary {
    pub fn from_records(records: &[ImageRecord]) -> Self {
        let mut summary = ScanSummary::default();
        for record in records {
            match &record.gps {
                RecordStatus::Extracted(GpsStatus::Located(_)) => summary.located += 1,
                RecordStatus::Extracted(GpsStatus::NotFound) => summary.not_found += 1,
                RecordStatus::Extracted(GpsStatus::Skipped) => summary.skipped += 1,
                RecordStatus::Unreadable { .. } => summary.unreadable += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.located + self.not_found + self.skipped + self.unreadable
    }
}

impl ScanManifest {
    pub fn summary(&self) -> ScanSummary {
        ScanSummary::from_records(&self.images)
    }
}

/// Scan `root` and extract GPS from every file the config selects.
pub fn scan(root: &Path, config: &GeotagConfig) -> Result<ScanManifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let files = collect_files(root, &config.scan);
    tracing::debug!(root = %root.display(), files = files.len(), "scanning");

    let precision = config.output.precision;
    let mut images: Vec<ImageRecord> = files
        .par_iter()
        .map(|path| build_record(root, path, precision))
        .collect();
    images.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(ScanManifest {
        root: root.display().to_string(),
        images,
    })
}

/// Extract GPS for an explicit list of files (the `extract` command).
/// Order is preserved; paths are reported as given.
pub fn extract_files(paths: &[PathBuf], config: &GeotagConfig) -> Vec<ImageRecord> {
    let precision = config.output.precision;
    paths
        .par_iter()
        .map(|path| record_for(path.display().to_string(), path, precision))
        .collect()
}

/// Unreadable directories and symlink loops are logged and skipped.
fn collect_files(root: &Path, scan: &ScanConfig) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(scan.follow_links);
    if !scan.recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker.into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && scan.matches_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files
}

/// Dotfiles and dot-directories, except the root itself.
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn build_record(root: &Path, path: &Path, precision: usize) -> ImageRecord {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    record_for(rel, path, precision)
}

fn record_for(display_path: String, path: &Path, precision: usize) -> ImageRecord {
    let media_type = MediaType::from_path(path);
    let gps = match read_gps(path) {
        Ok(status) => RecordStatus::Extracted(status),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "could not read image");
            RecordStatus::Unreadable {
                error: err.to_string(),
            }
        }
    };
    let location = match &gps {
        RecordStatus::Extracted(status) => {
            status.coordinate().map(|c| c.location_string(precision))
        }
        RecordStatus::Unreadable { .. } => None,
    };
    ImageRecord {
        path: display_path,
        media_type: media_type.label().to_string(),
        location,
        gps,
    }
}
