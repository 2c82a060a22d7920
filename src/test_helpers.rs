//! Shared test utilities: synthetic JPEG/EXIF buffers.
//!
//! [`GpsFixture`] assembles a minimal but structurally complete JPEG in
//! memory, with a TIFF block in either byte order, so parser tests don't
//! depend on camera files checked into the repo.
//!
//! ```text
//! SOI
//! APP0  JFIF
//! APP1  http://ns.adobe.com/xap/1.0/   (optional, must be skipped)
//! APP1  Exif\0\0 + TIFF
//!         header  II/MM, 42, IFD0 @ 8
//!         IFD0    ImageWidth, GPSInfo pointer
//!         GPS IFD present tags only
//!         data    rationals, long ASCII values
//! SOS   + a few scan bytes
//! EOI
//! ```
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fixture = GpsFixture { lon_ref: None, ..GpsFixture::guayaquil() };
//! assert_eq!(extract_gps_from_jpeg(&fixture.jpeg()), None);
//! ```

use crate::exif::ByteOrder;
use std::path::Path;

const FIELD_SHORT: u16 = 3;
const FIELD_ASCII: u16 = 2;
const FIELD_LONG: u16 = 4;
const FIELD_RATIONAL: u16 = 5;

const IFD0_OFFSET: u32 = 8;
/// IFD0 holds two entries: count (2) + 2 * 12 + next-IFD pointer (4).
const GPS_IFD_OFFSET: u32 = IFD0_OFFSET + 2 + 2 * 12 + 4;

const SCAN_TRAILER: &[u8] = &[
    0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, // SOS header
    0x12, 0x34, 0x56, 0x78, // entropy-coded bytes
    0xFF, 0xD9, // EOI
];

/// A triple of `(numerator, denominator)` pairs: degrees, minutes, seconds.
pub type Dms = [(u32, u32); 3];

/// Description of the GPS block to encode. `None` leaves the tag out.
#[derive(Debug, Clone)]
pub struct GpsFixture {
    pub order: ByteOrder,
    pub lat_ref: Option<&'static str>,
    pub lat: Option<Dms>,
    pub lon_ref: Option<&'static str>,
    pub lon: Option<Dms>,
    pub altitude: Option<(u32, u32)>,
    /// Field type written for both reference tags (ASCII unless overridden).
    pub ref_type: u16,
    /// Put an XMP APP1 segment in front of the EXIF one.
    pub xmp_before_exif: bool,
    /// Leave the GPSInfo pointer out of IFD0.
    pub omit_gps_pointer: bool,
}

impl GpsFixture {
    /// 2°11'22.0"S 79°53'47.0"W, no altitude, little-endian.
    pub fn guayaquil() -> Self {
        Self {
            order: ByteOrder::Little,
            lat_ref: Some("S"),
            lat: Some([(2, 1), (11, 1), (22, 1)]),
            lon_ref: Some("W"),
            lon: Some([(79, 1), (53, 1), (47, 1)]),
            altitude: None,
            ref_type: FIELD_ASCII,
            xmp_before_exif: false,
            omit_gps_pointer: false,
        }
    }

    /// The raw TIFF block (what follows `Exif\0\0` in APP1).
    pub fn tiff(&self) -> Vec<u8> {
        let order = self.order;
        let mut out = Vec::new();

        match order {
            ByteOrder::Little => out.extend_from_slice(b"II"),
            ByteOrder::Big => out.extend_from_slice(b"MM"),
        }
        push_u16(&mut out, 42, order);
        push_u32(&mut out, IFD0_OFFSET, order);

        // IFD0
        push_u16(&mut out, 2, order);
        push_entry(&mut out, order, 0x0100, FIELD_SHORT, 1, &short_field(640, order));
        let pointer_tag = if self.omit_gps_pointer { 0x0110 } else { 0x8825 };
        push_entry(
            &mut out,
            order,
            pointer_tag,
            FIELD_LONG,
            1,
            &u32_bytes(GPS_IFD_OFFSET, order),
        );
        push_u32(&mut out, 0, order);
        debug_assert_eq!(out.len(), GPS_IFD_OFFSET as usize);

        // GPS IFD: entries first, out-of-line values appended to `data`.
        let entry_count = [
            self.lat_ref.is_some(),
            self.lat.is_some(),
            self.lon_ref.is_some(),
            self.lon.is_some(),
            self.altitude.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count();
        let data_start = GPS_IFD_OFFSET as usize + 2 + entry_count * 12 + 4;
        let mut data: Vec<u8> = Vec::new();

        push_u16(&mut out, entry_count as u16, order);
        if let Some(r) = self.lat_ref {
            push_ascii(&mut out, &mut data, data_start, order, 0x0001, self.ref_type, r);
        }
        if let Some(dms) = self.lat {
            push_rationals(&mut out, &mut data, data_start, order, 0x0002, &dms);
        }
        if let Some(r) = self.lon_ref {
            push_ascii(&mut out, &mut data, data_start, order, 0x0003, self.ref_type, r);
        }
        if let Some(dms) = self.lon {
            push_rationals(&mut out, &mut data, data_start, order, 0x0004, &dms);
        }
        if let Some(alt) = self.altitude {
            push_rationals(&mut out, &mut data, data_start, order, 0x0006, &[alt]);
        }
        push_u32(&mut out, 0, order);
        debug_assert_eq!(out.len(), data_start);

        out.extend_from_slice(&data);
        out
    }

    /// The complete APP1 segment, marker included.
    pub fn app1_segment(&self) -> Vec<u8> {
        let tiff = self.tiff();
        let mut seg = vec![0xFF, 0xE1];
        seg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        seg.extend_from_slice(b"Exif\0\0");
        seg.extend_from_slice(&tiff);
        seg
    }

    /// A full JPEG stream with the EXIF segment embedded.
    pub fn jpeg(&self) -> Vec<u8> {
        self.jpeg_with_app1_end().0
    }

    /// The JPEG stream plus the index one past the last byte of the EXIF APP1
    /// segment. Truncating anywhere before that index must lose the GPS data.
    pub fn jpeg_with_app1_end(&self) -> (Vec<u8>, usize) {
        let mut out = vec![0xFF, 0xD8];
        out.extend_from_slice(&app0_jfif());
        if self.xmp_before_exif {
            out.extend_from_slice(&app1_xmp());
        }
        out.extend_from_slice(&self.app1_segment());
        let app1_end = out.len();
        out.extend_from_slice(SCAN_TRAILER);
        (out, app1_end)
    }

    /// Bytes that follow the last metadata segment (SOS through EOI).
    pub fn trailer_len(&self) -> usize {
        SCAN_TRAILER.len()
    }
}

/// A valid JPEG stream with APP0 only.
pub fn jpeg_without_exif() -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend_from_slice(&app0_jfif());
    out.extend_from_slice(SCAN_TRAILER);
    out
}

/// PNG signature plus an empty IHDR-sized tail.
pub fn png_bytes() -> Vec<u8> {
    let mut out = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    out.extend_from_slice(&[0u8; 25]);
    out
}

/// Write `bytes` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

/// Assert two floats agree within 1e-6.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// =========================================================================
// Encoding primitives
// =========================================================================

fn app0_jfif() -> Vec<u8> {
    let mut seg = vec![0xFF, 0xE0, 0x00, 0x10];
    seg.extend_from_slice(b"JFIF\0");
    seg.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    seg
}

fn app1_xmp() -> Vec<u8> {
    let payload = b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta/>";
    let mut seg = vec![0xFF, 0xE1];
    seg.extend_from_slice(&((2 + payload.len()) as u16).to_be_bytes());
    seg.extend_from_slice(payload);
    seg
}

fn u16_bytes(v: u16, order: ByteOrder) -> [u8; 2] {
    match order {
        ByteOrder::Little => v.to_le_bytes(),
        ByteOrder::Big => v.to_be_bytes(),
    }
}

fn u32_bytes(v: u32, order: ByteOrder) -> [u8; 4] {
    match order {
        ByteOrder::Little => v.to_le_bytes(),
        ByteOrder::Big => v.to_be_bytes(),
    }
}

/// A SHORT stored inline occupies the first two bytes of the value field.
fn short_field(v: u16, order: ByteOrder) -> [u8; 4] {
    let b = u16_bytes(v, order);
    [b[0], b[1], 0, 0]
}

fn push_u16(out: &mut Vec<u8>, v: u16, order: ByteOrder) {
    out.extend_from_slice(&u16_bytes(v, order));
}

fn push_u32(out: &mut Vec<u8>, v: u32, order: ByteOrder) {
    out.extend_from_slice(&u32_bytes(v, order));
}

fn push_entry(
    out: &mut Vec<u8>,
    order: ByteOrder,
    tag: u16,
    field_type: u16,
    count: u32,
    value: &[u8; 4],
) {
    push_u16(out, tag, order);
    push_u16(out, field_type, order);
    push_u32(out, count, order);
    out.extend_from_slice(value);
}

fn push_ascii(
    out: &mut Vec<u8>,
    data: &mut Vec<u8>,
    data_start: usize,
    order: ByteOrder,
    tag: u16,
    field_type: u16,
    text: &str,
) {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    let count = bytes.len() as u32;
    if bytes.len() <= 4 {
        let mut field = [0u8; 4];
        field[..bytes.len()].copy_from_slice(&bytes);
        push_entry(out, order, tag, field_type, count, &field);
    } else {
        let offset = (data_start + data.len()) as u32;
        data.extend_from_slice(&bytes);
        push_entry(out, order, tag, field_type, count, &u32_bytes(offset, order));
    }
}

fn push_rationals(
    out: &mut Vec<u8>,
    data: &mut Vec<u8>,
    data_start: usize,
    order: ByteOrder,
    tag: u16,
    values: &[(u32, u32)],
) {
    let offset = (data_start + data.len()) as u32;
    for &(num, den) in values {
        data.extend_from_slice(&u32_bytes(num, order));
        data.extend_from_slice(&u32_bytes(den, order));
    }
    push_entry(
        out,
        order,
        tag,
        FIELD_RATIONAL,
        values.len() as u32,
        &u32_bytes(offset, order),
    );
}
