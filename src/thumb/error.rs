// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the thumbnail pipeline.
//!
//! [`ThumbError`] covers registry lookups, payload framing, the image
//! pipeline and the strict head checks. Format-level failures from the JPEG
//! walker are wrapped as [`ThumbError::Jpeg`].

use core::fmt;

use crate::jpeg::error::JpegError;

/// Errors that can occur while building or reconstituting a thumbnail.
#[derive(Debug)]
pub enum ThumbError {
    /// No registry entry for this type id.
    UnknownType(u8),
    /// Payload shorter than the 5-byte type/dimension prefix.
    Truncated { len: usize },
    /// The minimized JPEG could not be walked (missing SOF0/SOS, bad
    /// segment lengths, truncated fields).
    Jpeg(JpegError),
    /// The source bytes are not an image the decoder understands.
    DecodeFailed(image::ImageError),
    /// The source decodes to a colour type the baseline writer cannot take.
    UnsupportedColorSpace(image::ColorType),
    /// The baseline re-encode failed.
    EncodeFailed(JpegError),
    /// Canonical head differs from the registry head. `offset` is the
    /// first differing byte (or the shorter length if one is a prefix of
    /// the other).
    HeaderMismatch { offset: usize, got_len: usize, expected_len: usize },
    /// SOF0 height/width field is not where the registry expects it.
    DimensionOffsetMismatch { got: usize, expected: usize },
}

impl fmt::Display for ThumbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(id) => write!(f, "unknown type id: {id}"),
            Self::Truncated { len } => {
                write!(f, "payload too short: {len} bytes, need at least 5")
            }
            Self::Jpeg(e) => write!(f, "invalid JPEG: {e}"),
            Self::DecodeFailed(e) => write!(f, "decode source image: {e}"),
            Self::UnsupportedColorSpace(c) => write!(f, "unsupported colour type {c:?}"),
            Self::EncodeFailed(e) => write!(f, "baseline encode: {e}"),
            Self::HeaderMismatch { offset, got_len, expected_len } => write!(
                f,
                "unexpected header: first difference at offset {offset} (got {got_len} bytes, expected {expected_len})"
            ),
            Self::DimensionOffsetMismatch { got, expected } => {
                write!(f, "unexpected dimension offset: got {got} expected {expected}")
            }
        }
    }
}

impl std::error::Error for ThumbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Jpeg(e) | Self::EncodeFailed(e) => Some(e),
            Self::DecodeFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<JpegError> for ThumbError {
    fn from(e: JpegError) -> Self {
        Self::Jpeg(e)
    }
}

impl From<image::ImageError> for ThumbError {
    fn from(e: image::ImageError) -> Self {
        Self::DecodeFailed(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn jpeg_errors_chain() {
        let inner = JpegError::MarkerNotFound {
            marker: 0xDA,
            cause: Some(Box::new(JpegError::BadLength { offset: 9, marker: 0xFE, length: 1 })),
        };
        let err = ThumbError::from(inner.clone());
        assert_eq!(err.source().map(|s| s.to_string()), Some(inner.to_string()));
        let root = err.source().and_then(|s| s.source()).map(|s| s.to_string());
        assert_eq!(root.as_deref(), Some("bad length 1 for marker 0xFFFE at offset 9"));
    }

    #[test]
    fn messages_carry_context() {
        assert_eq!(ThumbError::UnknownType(9).to_string(), "unknown type id: 9");
        let msg = ThumbError::HeaderMismatch { offset: 10, got_len: 589, expected_len: 589 }.to_string();
        assert!(msg.contains("offset 10"));
        let msg = ThumbError::DimensionOffsetMismatch { got: 143, expected: 141 }.to_string();
        assert_eq!(msg, "unexpected dimension offset: got 143 expected 141");
    }
}
