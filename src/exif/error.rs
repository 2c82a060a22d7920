//! Failure taxonomy for the EXIF/GPS reader.
//!
//! None of these are fatal for callers: [`crate::extract::extract_gps_from_jpeg`]
//! folds every variant into "no GPS data". They exist so diagnostics (debug
//! logs, `extract --explain`) can say *why* a file had no coordinate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExifError {
    #[error("not a JPEG stream (missing SOI marker)")]
    NotJpeg,
    #[error("malformed JPEG segment at offset {0}")]
    MalformedSegment(usize),
    #[error("no APP1/EXIF segment before image data")]
    NoExifSegment,
    #[error("unrecognized TIFF byte-order marker {0:#06x}")]
    BadByteOrder(u16),
    #[error("bad TIFF magic number {0:#06x}")]
    BadMagic(u16),
    #[error("read of {len} bytes at offset {offset} runs past end of buffer ({available} bytes)")]
    Truncated {
        offset: usize,
        len: usize,
        available: usize,
    },
    #[error("missing tag: {0}")]
    MissingTag(&'static str),
    #[error("rational value with zero denominator")]
    InvalidRational,
}
