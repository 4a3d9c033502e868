// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for JPEG scanning and baseline encoding.

use std::fmt;

/// Errors that can occur while walking JPEG marker segments or while
/// writing a baseline JPEG.
///
/// Offsets are absolute byte positions in the buffer that was handed to the
/// public entry point ([`find_marker`](super::marker::find_marker),
/// [`locate_dimensions`](super::frame::locate_dimensions),
/// [`split_at_scan`](super::split::split_at_scan)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JpegError {
    /// Fewer bytes remain at `offset` than the marker being read needs.
    Truncated { offset: usize, needed: usize, available: usize },
    /// A segment was expected at `offset` but the byte there is not 0xFF.
    BadMarkerPrefix { offset: usize, found: u8 },
    /// A variable-length segment declares a length that does not even
    /// cover its own 2-byte length field.
    BadLength { offset: usize, marker: u8, length: u16 },
    /// The walk reached the end of the buffer (or failed to scan a segment,
    /// see `cause`) before the wanted marker appeared.
    MarkerNotFound { marker: u8, cause: Option<Box<JpegError>> },
    /// SOF0 was found but the buffer ends inside its height/width field.
    TruncatedDimensions { offset: usize, len: usize },
    /// SOS was found but the buffer ends before the fixed scan header does.
    TruncatedScanHeader { split: usize, len: usize },
    /// Image dimensions are zero or do not fit a 16-bit frame header.
    InvalidDimensions { width: u32, height: u32 },
    /// Pixel buffer length does not match `width * height * 3`.
    PixelBufferSize { expected: usize, actual: usize },
    /// The Huffman table has no code for a symbol the scan needs.
    MissingHuffmanCode(u8),
}

impl JpegError {
    /// Shift every offset carried by this error by `base` bytes.
    pub(crate) fn rebased(self, base: usize) -> Self {
        match self {
            Self::Truncated { offset, needed, available } => {
                Self::Truncated { offset: offset + base, needed, available }
            }
            Self::BadMarkerPrefix { offset, found } => {
                Self::BadMarkerPrefix { offset: offset + base, found }
            }
            Self::BadLength { offset, marker, length } => {
                Self::BadLength { offset: offset + base, marker, length }
            }
            other => other,
        }
    }
}

impl fmt::Display for JpegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { offset, needed, available } => write!(
                f,
                "buffer underflow at offset {offset}: need {needed} bytes, {available} available"
            ),
            Self::BadMarkerPrefix { offset, found } => {
                write!(f, "bad marker prefix at offset {offset}: expected 0xFF, found 0x{found:02X}")
            }
            Self::BadLength { offset, marker, length } => {
                write!(f, "bad length {length} for marker 0xFF{marker:02X} at offset {offset}")
            }
            Self::MarkerNotFound { marker, cause: None } => {
                write!(f, "end of data before marker 0xFF{marker:02X}")
            }
            Self::MarkerNotFound { marker, cause: Some(cause) } => {
                write!(f, "marker 0xFF{marker:02X} not found: {cause}")
            }
            Self::TruncatedDimensions { offset, len } => {
                write!(f, "end of data before dimensions at offset {offset} (length {len})")
            }
            Self::TruncatedScanHeader { split, len } => {
                write!(f, "end of data before scan header end at offset {split} (length {len})")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {width}x{height}")
            }
            Self::PixelBufferSize { expected, actual } => {
                write!(f, "pixel buffer has {actual} bytes, expected {expected}")
            }
            Self::MissingHuffmanCode(sym) => {
                write!(f, "Huffman table missing code for symbol 0x{sym:02X}")
            }
        }
    }
}

impl std::error::Error for JpegError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MarkerNotFound { cause: Some(cause), .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, JpegError>;
