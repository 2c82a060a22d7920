//! Shared result types.
//!
//! These are serialized into the scan manifest and printed by the CLI, so
//! field names are part of the JSON output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location read from EXIF GPS tags.
///
/// Latitude and longitude are signed decimal degrees (negative = South/West).
/// Altitude is in meters and only present when the file carried a decodable
/// `GPSAltitude` tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl GpsCoordinate {
    /// `"lat, lon"` with `precision` decimals, the form used to pre-fill a
    /// record's sector/location field.
    pub fn location_string(&self, precision: usize) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.latitude,
            self.longitude,
            prec = precision
        )
    }
}

impl fmt::Display for GpsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location_string(6))?;
        if let Some(alt) = self.altitude {
            write!(f, " ({alt:.1} m)")?;
        }
        Ok(())
    }
}

/// Outcome of looking for GPS data in one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GpsStatus {
    /// The file is a JPEG with a complete GPS block.
    Located(GpsCoordinate),
    /// The file is a JPEG but carries no usable GPS block.
    NotFound,
    /// The file is not a JPEG; extraction was never attempted.
    Skipped,
}

impl GpsStatus {
    pub fn coordinate(&self) -> Option<&GpsCoordinate> {
        match self {
            GpsStatus::Located(coord) => Some(coord),
            _ => None,
        }
    }
}
