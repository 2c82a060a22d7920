//! GPS sub-IFD decoding.
//!
//! | Tag | Name | Type | Count |
//! |---|---|---|---|
//! | `0x0001` | GPSLatitudeRef (`N`/`S`) | ASCII | any |
//! | `0x0002` | GPSLatitude (deg, min, sec) | RATIONAL | 3 |
//! | `0x0003` | GPSLongitudeRef (`E`/`W`) | ASCII | any |
//! | `0x0004` | GPSLongitude (deg, min, sec) | RATIONAL | 3 |
//! | `0x0006` | GPSAltitude (meters) | RATIONAL | 1 |
//!
//! Latitude and longitude are all-or-nothing: both refs and both triples must
//! decode, otherwise there is no coordinate. Altitude is optional and only
//! attached when it decodes cleanly. `GPSAltitudeRef` is not consulted, so
//! altitude is always reported as above sea level.

use super::error::ExifError;
use super::tiff::{IfdEntry, Tiff, field_type};
use crate::types::GpsCoordinate;

pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;
pub const TAG_GPS_ALTITUDE: u16 = 0x0006;

/// Bytes per RATIONAL: u32 numerator + u32 denominator.
const RATIONAL_SIZE: usize = 8;

/// Unsigned TIFF RATIONAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn to_f64(self) -> Result<f64, ExifError> {
        if self.denominator == 0 {
            return Err(ExifError::InvalidRational);
        }
        Ok(f64::from(self.numerator) / f64::from(self.denominator))
    }
}

/// Degrees, minutes, seconds → decimal degrees.
pub fn dms_to_decimal([degrees, minutes, seconds]: [f64; 3]) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Decode the GPS IFD at `offset` into a coordinate.
pub fn decode_gps_ifd(tiff: &Tiff<'_>, offset: usize) -> Result<GpsCoordinate, ExifError> {
    let ifd = tiff.ifd_at(offset)?;

    let mut lat_ref = None;
    let mut lat = None;
    let mut lon_ref = None;
    let mut lon = None;
    let mut alt = None;

    for entry in ifd.entries() {
        let entry = entry?;
        match entry.tag {
            TAG_GPS_LATITUDE_REF => lat_ref = read_ref(tiff, &entry)?,
            TAG_GPS_LATITUDE => lat = Some(entry),
            TAG_GPS_LONGITUDE_REF => lon_ref = read_ref(tiff, &entry)?,
            TAG_GPS_LONGITUDE => lon = Some(entry),
            TAG_GPS_ALTITUDE => alt = Some(entry),
            _ => {}
        }
    }

    let lat_ref = lat_ref.ok_or(ExifError::MissingTag("GPSLatitudeRef"))?;
    let lat = lat.ok_or(ExifError::MissingTag("GPSLatitude"))?;
    let lon_ref = lon_ref.ok_or(ExifError::MissingTag("GPSLongitudeRef"))?;
    let lon = lon.ok_or(ExifError::MissingTag("GPSLongitude"))?;

    let mut latitude = read_degrees(tiff, &lat, "GPSLatitude")?;
    if lat_ref == 'S' {
        latitude = -latitude;
    }
    let mut longitude = read_degrees(tiff, &lon, "GPSLongitude")?;
    if lon_ref == 'W' {
        longitude = -longitude;
    }

    let altitude = match alt {
        Some(entry) => read_altitude(tiff, &entry)?,
        None => None,
    };

    Ok(GpsCoordinate {
        latitude,
        longitude,
        altitude,
    })
}

/// First character of an ASCII reference tag, up to the first NUL.
/// An empty or non-ASCII value counts as absent.
fn read_ref(tiff: &Tiff<'_>, entry: &IfdEntry) -> Result<Option<char>, ExifError> {
    if entry.field_type != field_type::ASCII {
        return Ok(None);
    }
    let bytes = entry.byte_data(tiff)?;
    let text = bytes.split(|&b| b == 0).next().unwrap_or_default();
    Ok(text.first().map(|&b| char::from(b).to_ascii_uppercase()))
}

fn read_rational(tiff: &Tiff<'_>, base: usize, index: usize) -> Result<Rational, ExifError> {
    let at = base.saturating_add(index * RATIONAL_SIZE);
    Ok(Rational {
        numerator: tiff.read_u32(at)?,
        denominator: tiff.read_u32(at.saturating_add(4))?,
    })
}

fn read_degrees(tiff: &Tiff<'_>, entry: &IfdEntry, name: &'static str) -> Result<f64, ExifError> {
    if entry.field_type != field_type::RATIONAL || entry.count < 3 {
        return Err(ExifError::MissingTag(name));
    }
    let base = entry.value_offset(tiff)?;
    let mut dms = [0.0; 3];
    for (i, slot) in dms.iter_mut().enumerate() {
        *slot = read_rational(tiff, base, i)?.to_f64()?;
    }
    Ok(dms_to_decimal(dms))
}

/// Altitude in meters, or `None` if the tag can't be interpreted.
/// Out-of-bounds reads still fail the whole decode.
fn read_altitude(tiff: &Tiff<'_>, entry: &IfdEntry) -> Result<Option<f64>, ExifError> {
    if entry.field_type != field_type::RATIONAL || entry.count == 0 {
        return Ok(None);
    }
    let base = entry.value_offset(tiff)?;
    Ok(read_rational(tiff, base, 0)?.to_f64().ok())
}
