//! JPEG marker walk: locate the APP1 segment that carries EXIF.
//!
//! ```text
//! FF D8                      SOI
//! FF E0 <len> JFIF...        APP0 (skipped)
//! FF E1 <len> Exif\0\0 TIFF  APP1/EXIF  ← we want the TIFF block
//! FF DB <len> ...            DQT, SOF, DHT... (skipped)
//! FF DA                      SOS: entropy-coded data follows, stop here
//! ```
//!
//! Segment lengths are big-endian and include the two length bytes.

use super::error::ExifError;
use super::reader::{ByteOrder, ByteReader};

const SOI: &[u8] = &[0xFF, 0xD8];
const MARKER_PREFIX: u8 = 0xFF;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;
const MARKER_APP1: u8 = 0xE1;
const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";

/// Smallest APP1 length that can hold the `Exif\0\0` signature.
const MIN_EXIF_SEGMENT_LEN: usize = 8;

/// Find the TIFF block inside the first APP1/EXIF segment of a JPEG stream.
///
/// The returned slice starts at the TIFF byte-order marker and ends at the end
/// of the APP1 segment, so every IFD offset can be resolved against it directly.
/// Later APP1/EXIF segments are ignored.
pub fn find_exif_tiff(data: &[u8]) -> Result<&[u8], ExifError> {
    let reader = ByteReader::new(data);

    if !data.starts_with(SOI) {
        return Err(ExifError::NotJpeg);
    }

    let mut offset = SOI.len();
    while offset < reader.len() {
        if reader.read_u8(offset)? != MARKER_PREFIX {
            return Err(ExifError::MalformedSegment(offset));
        }

        let marker = reader.read_u8(offset + 1)?;
        if marker == MARKER_SOS || marker == MARKER_EOI {
            break;
        }

        let length = reader.read_u16(offset + 2, ByteOrder::Big)? as usize;
        if length < 2 {
            return Err(ExifError::MalformedSegment(offset));
        }

        if marker == MARKER_APP1 && length >= MIN_EXIF_SEGMENT_LEN {
            let payload = reader.slice(offset + 4, length - 2)?;
            if let Some(tiff) = payload.strip_prefix(EXIF_SIGNATURE) {
                return Ok(tiff);
            }
        }

        offset += 2 + length;
    }

    Err(ExifError::NoExifSegment)
}
