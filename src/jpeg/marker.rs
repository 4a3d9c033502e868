// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! JPEG marker segment scanning.
//!
//! [`read_marker`] parses exactly one segment at the cursor and reports how
//! many bytes it spans. [`find_marker`] repeats that from offset 0 until a
//! requested marker shows up. Advancement is driven purely by the segment
//! length arithmetic, so markers this crate knows nothing about (APPn, COM,
//! DHT, ...) are stepped over without being interpreted.

use super::error::{JpegError, Result};

/// JPEG marker constants (second byte of the `0xFF xx` pair).
pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOF0: u8 = 0xC0;
pub const DHT: u8 = 0xC4;
pub const DQT: u8 = 0xDB;
pub const DRI: u8 = 0xDD;
pub const SOS: u8 = 0xDA;
pub const RST0: u8 = 0xD0;
pub const RST7: u8 = 0xD7;

/// One marker segment as seen by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSegment {
    /// Marker id, without the 0xFF prefix.
    pub marker: u8,
    /// Bytes spanned by the segment, including the 2-byte `0xFF xx` prefix.
    pub total_len: usize,
}

/// True for markers that are a bare `0xFF xx` pair with nothing after them.
pub fn is_standalone(marker: u8) -> bool {
    marker == SOI || marker == EOI || (RST0..=RST7).contains(&marker)
}

/// Parse the marker segment starting at `bytes[0]`.
///
/// Errors carry offsets relative to the start of `bytes`; [`find_marker`]
/// rebases them onto the whole buffer.
pub fn read_marker(bytes: &[u8]) -> Result<MarkerSegment> {
    if bytes.len() < 2 {
        return Err(JpegError::Truncated { offset: 0, needed: 2, available: bytes.len() });
    }
    if bytes[0] != 0xFF {
        return Err(JpegError::BadMarkerPrefix { offset: 0, found: bytes[0] });
    }
    let marker = bytes[1];
    if is_standalone(marker) {
        return Ok(MarkerSegment { marker, total_len: 2 });
    }

    if bytes.len() < 4 {
        return Err(JpegError::Truncated { offset: 0, needed: 4, available: bytes.len() });
    }
    // DRI is treated as a fixed 4-byte segment; its length field is not read.
    if marker == DRI {
        return Ok(MarkerSegment { marker, total_len: 4 });
    }

    let declared = u16::from_be_bytes([bytes[2], bytes[3]]);
    if declared < 2 {
        return Err(JpegError::BadLength { offset: 0, marker, length: declared });
    }
    Ok(MarkerSegment { marker, total_len: declared as usize + 2 })
}

/// Walk the segments of `data` from offset 0 and return the offset of the
/// first segment whose marker id is `wanted`, together with that segment.
///
/// Fails with [`JpegError::MarkerNotFound`] if the walk runs off the end of
/// the buffer, or if a segment along the way cannot be scanned; in the
/// latter case the scan error is attached as the cause.
pub fn find_marker(data: &[u8], wanted: u8) -> Result<(usize, MarkerSegment)> {
    let mut offset = 0usize;
    while offset < data.len() {
        let segment = read_marker(&data[offset..]).map_err(|e| JpegError::MarkerNotFound {
            marker: wanted,
            cause: Some(Box::new(e.rebased(offset))),
        })?;
        if segment.marker == wanted {
            return Ok((offset, segment));
        }
        offset += segment.total_len;
    }
    Err(JpegError::MarkerNotFound { marker: wanted, cause: None })
}
