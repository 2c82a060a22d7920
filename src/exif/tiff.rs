//! TIFF header and Image File Directory (IFD) walking.
//!
//! All offsets in this module are relative to the start of the TIFF header
//! (the byte right after `Exif\0\0`), never to the start of the file.
//!
//! IFD layout:
//!
//! ```text
//! u16            entry count N
//! N × 12 bytes   entries: tag u16 | type u16 | count u32 | value-or-offset [u8; 4]
//! u32            offset of next IFD (unused here)
//! ```

use super::error::ExifError;
use super::reader::{ByteOrder, ByteReader};

const TIFF_MAGIC: u16 = 0x002A;
const BYTE_ORDER_LITTLE: u16 = 0x4949; // "II"
const BYTE_ORDER_BIG: u16 = 0x4D4D; // "MM"

/// Size of one IFD entry in bytes.
pub const IFD_ENTRY_SIZE: usize = 12;

/// Tag in IFD0 whose value is the offset of the GPS sub-IFD.
pub const TAG_GPS_IFD_POINTER: u16 = 0x8825;

/// TIFF field types.
pub mod field_type {
    pub const ASCII: u16 = 2;
    pub const RATIONAL: u16 = 5;
}

/// Parsed 8-byte TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub byte_order: ByteOrder,
    pub ifd0_offset: usize,
}

impl TiffHeader {
    pub fn parse(data: &[u8]) -> Result<Self, ExifError> {
        let reader = ByteReader::new(data);
        // The marker is a palindrome, so either order reads it the same way.
        let byte_order = match reader.read_u16(0, ByteOrder::Big)? {
            BYTE_ORDER_LITTLE => ByteOrder::Little,
            BYTE_ORDER_BIG => ByteOrder::Big,
            other => return Err(ExifError::BadByteOrder(other)),
        };

        let magic = reader.read_u16(2, byte_order)?;
        if magic != TIFF_MAGIC {
            return Err(ExifError::BadMagic(magic));
        }

        let ifd0_offset = reader.read_u32(4, byte_order)? as usize;
        Ok(Self {
            byte_order,
            ifd0_offset,
        })
    }
}

/// A TIFF block with its byte order resolved.
#[derive(Debug, Clone, Copy)]
pub struct Tiff<'a> {
    reader: ByteReader<'a>,
    header: TiffHeader,
}

impl<'a> Tiff<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self, ExifError> {
        Ok(Self {
            reader: ByteReader::new(data),
            header: TiffHeader::parse(data)?,
        })
    }

    pub fn header(&self) -> TiffHeader {
        self.header
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], ExifError> {
        self.reader.slice(offset, len)
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16, ExifError> {
        self.reader.read_u16(offset, self.header.byte_order)
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, ExifError> {
        self.reader.read_u32(offset, self.header.byte_order)
    }

    /// Open the IFD at `offset`, reading its entry count.
    pub fn ifd_at(&self, offset: usize) -> Result<Ifd<'a>, ExifError> {
        let count = self.read_u16(offset)?;
        Ok(Ifd {
            tiff: *self,
            offset,
            count,
        })
    }

    pub fn ifd0(&self) -> Result<Ifd<'a>, ExifError> {
        self.ifd_at(self.header.ifd0_offset)
    }

    /// Locate the GPS sub-IFD via the GPSInfo pointer in IFD0.
    ///
    /// Returns the GPS IFD offset. Iteration stops at the first pointer tag;
    /// nothing else in IFD0 is of interest.
    pub fn find_gps_ifd(&self) -> Result<usize, ExifError> {
        for entry in self.ifd0()?.entries() {
            let entry = entry?;
            if entry.tag == TAG_GPS_IFD_POINTER {
                return Ok(self.read_u32(entry.value_field)? as usize);
            }
        }
        Err(ExifError::MissingTag("GPSInfo IFD pointer"))
    }
}

/// One Image File Directory.
#[derive(Debug, Clone, Copy)]
pub struct Ifd<'a> {
    tiff: Tiff<'a>,
    offset: usize,
    count: u16,
}

impl<'a> Ifd<'a> {
    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Read entry `index` (0-based).
    pub fn entry(&self, index: usize) -> Result<IfdEntry, ExifError> {
        let at = self
            .offset
            .saturating_add(2)
            .saturating_add(index.saturating_mul(IFD_ENTRY_SIZE));
        IfdEntry::read(&self.tiff, at)
    }

    /// Entries in directory order. A truncated entry yields an error and
    /// callers are expected to stop there.
    pub fn entries(&self) -> impl Iterator<Item = Result<IfdEntry, ExifError>> + 'a {
        let ifd = *self;
        (0..ifd.len()).map(move |i| ifd.entry(i))
    }
}

/// A 12-byte directory entry, viewed in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    /// Offset of the 4-byte value-or-offset field.
    pub value_field: usize,
}

impl IfdEntry {
    fn read(tiff: &Tiff<'_>, at: usize) -> Result<Self, ExifError> {
        // Touch the whole entry up front so a half-present entry is rejected.
        tiff.slice(at, IFD_ENTRY_SIZE)?;
        Ok(Self {
            tag: tiff.read_u16(at)?,
            field_type: tiff.read_u16(at + 2)?,
            count: tiff.read_u32(at + 4)?,
            value_field: at + 8,
        })
    }

    /// Interpret the value field as an offset to out-of-line data.
    pub fn value_offset(&self, tiff: &Tiff<'_>) -> Result<usize, ExifError> {
        Ok(tiff.read_u32(self.value_field)? as usize)
    }

    /// Raw bytes of a byte-sized value (ASCII/BYTE/UNDEFINED): inline when
    /// `count <= 4`, otherwise at the offset stored in the value field.
    pub fn byte_data<'a>(&self, tiff: &Tiff<'a>) -> Result<&'a [u8], ExifError> {
        let len = self.count as usize;
        if len <= 4 {
            tiff.slice(self.value_field, len)
        } else {
            tiff.slice(self.value_offset(tiff)?, len)
        }
    }
}
