//! # Cacao Geotag
//!
//! Reads GPS coordinates out of JPEG EXIF metadata so field photos of cacao
//! plots can be tagged with a location and the sector/location field of the
//! record they belong to can be pre-filled.
//!
//! Extraction is best-effort. Most images reaching an upload form have no GPS
//! block (screenshots, messaging-app exports, stripped files), so "no
//! coordinate" is an ordinary answer, never an error, and never blocks the
//! upload.
//!
//! # Pipeline
//!
//! ```text
//! file bytes
//!   → JPEG marker walk       first APP1 segment starting with Exif\0\0
//!   → TIFF header            II/MM byte order, magic 42, IFD0 offset
//!   → IFD0                   GPSInfo pointer (0x8825)
//!   → GPS IFD                refs + D/M/S rationals (+ altitude)
//!   → GpsCoordinate          signed decimal degrees
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`exif`] | Hand-rolled binary reader: byte access, JPEG walk, IFD walk, GPS decode |
//! | [`extract`] | Entry points: best-effort extraction, MIME/extension gate, file reads |
//! | [`scan`] | Batch extraction over a directory, in parallel, into a JSON manifest |
//! | [`config`] | `geotag.toml` loading, merging onto stock defaults, validation |
//! | [`types`] | `GpsCoordinate` and `GpsStatus`, shared by the manifest and the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No Metadata Library
//!
//! Only five GPS tags are read, and the layout they live in is fixed. A
//! purpose-built reader keeps the extractor small, allocation-free, and easy
//! to audit for out-of-bounds behavior: every read goes through
//! [`exif::ByteReader`], which returns an error instead of panicking.
//!
//! ## All-or-Nothing Coordinates
//!
//! Latitude and longitude need both reference letters and both D/M/S triples.
//! Anything less (a missing tag, a zero denominator) yields no coordinate at
//! all rather than a half-filled one. Altitude is optional on top of that.
//!
//! ## Altitude Sign
//!
//! `GPSAltitudeRef` is not read, so altitude is always reported as meters above
//! sea level. Altitude is informational only.

pub mod config;
pub mod exif;
pub mod extract;
pub mod output;
pub mod scan;
pub mod types;

pub use extract::{extract_gps_from_jpeg, try_extract_gps};
pub use types::{GpsCoordinate, GpsStatus};

#[cfg(test)]
pub(crate) mod test_helpers;
