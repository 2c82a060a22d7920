//! EXIF GPS reader, hand-rolled with no image-metadata dependency.
//!
//! | Stage | Module | Input → output |
//! |---|---|---|
//! | **Byte access** | [`reader`] | bounds-checked u8/u16/u32 reads, either byte order |
//! | **JPEG walk** | [`jpeg`] | file bytes → TIFF block of the first APP1/EXIF segment |
//! | **IFD walk** | [`tiff`] | TIFF block → byte order, IFD0, GPS sub-IFD offset |
//! | **GPS decode** | [`gps`] | GPS IFD → signed decimal-degree coordinate |
//!
//! Every stage returns [`ExifError`] on failure. Turning those into "no GPS
//! data" is the caller's job (see [`crate::extract`]).

mod error;
pub mod gps;
pub mod jpeg;
pub mod reader;
pub mod tiff;

pub use error::ExifError;
pub use gps::{Rational, decode_gps_ifd, dms_to_decimal};
pub use jpeg::find_exif_tiff;
pub use reader::{ByteOrder, ByteReader};
pub use tiff::{Ifd, IfdEntry, Tiff, TiffHeader};
