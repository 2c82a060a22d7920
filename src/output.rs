//! CLI output formatting.
//!
//! Every file gets a header line (positional index + path) and indented
//! context lines describing what was found:
//!
//! ```text
//! 001 lote-3/IMG_0412.jpg
//!     Location: -2.189444, -79.896389
//!     Altitude: 500.0 m
//! 002 lote-3/IMG_0413.JPG
//!     No GPS metadata
//!     Reason: no APP1/EXIF segment before image data
//! 003 leaf-scan.png
//!     Skipped (png)
//!
//! 3 files: 1 located, 1 without GPS, 1 skipped
//! ```
//!
//! `format_*` functions return `Vec<String>` and do no I/O; `print_*` wrappers
//! write them to stdout.

use crate::scan::{ImageRecord, RecordStatus, ScanManifest};
use crate::types::GpsStatus;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Context lines for one record (without the header).
fn record_details(record: &ImageRecord) -> Vec<String> {
    let pad = indent(1);
    match &record.gps {
        RecordStatus::Extracted(GpsStatus::Located(coord)) => {
            let location = record
                .location
                .clone()
                .unwrap_or_else(|| coord.location_string(6));
            let mut lines = vec![format!("{pad}Location: {location}")];
            if let Some(alt) = coord.altitude {
                lines.push(format!("{pad}Altitude: {alt:.1} m"));
            }
            lines
        }
        RecordStatus::Extracted(GpsStatus::NotFound) => vec![format!("{pad}No GPS metadata")],
        RecordStatus::Extracted(GpsStatus::Skipped) => {
            vec![format!("{pad}Skipped ({})", record.media_type)]
        }
        RecordStatus::Unreadable { error } => vec![format!("{pad}Unreadable: {error}")],
    }
}

/// Format records in order. `reason` may add a `Reason:` line to a record,
/// used by `extract --explain` for files without GPS.
pub fn format_records<F>(records: &[ImageRecord], reason: F) -> Vec<String>
where
    F: Fn(&ImageRecord) -> Option<String>,
{
    let mut lines = Vec::new();
    for (i, record) in records.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), record.path));
        lines.extend(record_details(record));
        if let Some(why) = reason(record) {
            lines.push(format!("{}Reason: {why}", indent(1)));
        }
    }
    lines
}

/// Format the full scan output: records followed by a summary line.
pub fn format_scan_output(manifest: &ScanManifest) -> Vec<String> {
    let mut lines = vec![format!("Scanned {}", manifest.root)];
    lines.extend(format_records(&manifest.images, |_| None));
    lines.push(String::new());
    lines.push(manifest.summary().to_string());
    lines
}

pub fn print_records<F>(records: &[ImageRecord], reason: F)
where
    F: Fn(&ImageRecord) -> Option<String>,
{
    for line in format_records(records, reason) {
        println!("{}", line);
    }
}

pub fn print_scan_output(manifest: &ScanManifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}
