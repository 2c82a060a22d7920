//! GPS extraction entry points.
//!
//! Two layers:
//!
//! - [`try_extract_gps`] runs the full reader pipeline and reports *why* a file
//!   has no coordinate. Used for debug logs and `extract --explain`.
//! - [`extract_gps_from_jpeg`] is the best-effort contract callers rely on: it
//!   never panics and never fails, it just returns `None`. Missing GPS metadata
//!   is the normal case for screenshots, exported images, and stripped files,
//!   so it is logged at debug level only.
//!
//! Callers gate on media type before extracting. [`MediaType`] does that for
//! declared MIME types (uploads) and for file extensions (directory scans);
//! [`read_gps`] applies the extension gate to a file on disk.

use crate::exif::{ExifError, Tiff, decode_gps_ifd, find_exif_tiff};
use crate::types::{GpsCoordinate, GpsStatus};
use std::path::Path;

/// Run the reader pipeline: JPEG segments → TIFF header → GPS IFD → coordinate.
pub fn try_extract_gps(bytes: &[u8]) -> Result<GpsCoordinate, ExifError> {
    let tiff_block = find_exif_tiff(bytes)?;
    let tiff = Tiff::parse(tiff_block)?;
    let gps_offset = tiff.find_gps_ifd()?;
    decode_gps_ifd(&tiff, gps_offset)
}

/// Best-effort GPS extraction from JPEG bytes.
///
/// Every failure (not a JPEG, truncated data, missing tags, zero
/// denominators) becomes `None`.
pub fn extract_gps_from_jpeg(bytes: &[u8]) -> Option<GpsCoordinate> {
    match try_extract_gps(bytes) {
        Ok(coord) => Some(coord),
        Err(reason) => {
            tracing::debug!(%reason, len = bytes.len(), "no GPS metadata");
            None
        }
    }
}

/// Coarse media type, enough to decide whether EXIF extraction applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
    Tiff,
    Other,
}

impl MediaType {
    /// From a declared MIME type such as an upload's `Content-Type`.
    /// Parameters (`; charset=...`) are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => MediaType::Jpeg,
            "image/png" => MediaType::Png,
            "image/webp" => MediaType::Webp,
            "image/tiff" => MediaType::Tiff,
            _ => MediaType::Other,
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" | "jfif" => MediaType::Jpeg,
            "png" => MediaType::Png,
            "webp" => MediaType::Webp,
            "tif" | "tiff" => MediaType::Tiff,
            _ => MediaType::Other,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(MediaType::Other)
    }

    pub fn is_jpeg(self) -> bool {
        self == MediaType::Jpeg
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Jpeg => "jpeg",
            MediaType::Png => "png",
            MediaType::Webp => "webp",
            MediaType::Tiff => "tiff",
            MediaType::Other => "other",
        }
    }
}

/// Extract GPS from uploaded bytes with a declared MIME type.
///
/// Non-JPEG uploads are [`GpsStatus::Skipped`] without looking at the bytes.
pub fn extract_for_upload(mime: &str, bytes: &[u8]) -> GpsStatus {
    if !MediaType::from_mime(mime).is_jpeg() {
        return GpsStatus::Skipped;
    }
    status_from(extract_gps_from_jpeg(bytes))
}

/// Read a file and extract GPS, gating on its extension.
///
/// Only I/O failures are errors; everything about the content itself is
/// expressed through [`GpsStatus`]. Non-JPEG files are not read at all.
pub fn read_gps(path: &Path) -> std::io::Result<GpsStatus> {
    if !MediaType::from_path(path).is_jpeg() {
        return Ok(GpsStatus::Skipped);
    }
    let bytes = std::fs::read(path)?;
    Ok(status_from(extract_gps_from_jpeg(&bytes)))
}

/// Why a JPEG file has no coordinate, or `None` if it has one.
pub fn explain_file(path: &Path) -> std::io::Result<Option<ExifError>> {
    let bytes = std::fs::read(path)?;
    Ok(try_extract_gps(&bytes).err())
}

fn status_from(coord: Option<GpsCoordinate>) -> GpsStatus {
    match coord {
        Some(coord) => GpsStatus::Located(coord),
        None => GpsStatus::NotFound,
    }
}
