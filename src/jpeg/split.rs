// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Head/tail split at the start of entropy-coded scan data.

use super::error::{JpegError, Result};
use super::marker::{find_marker, SOS};

/// Bytes of SOS header after the marker and length field, for the fixed
/// 3-component baseline scan header layout: component count (1),
/// 3 × (component selector, table selectors) (6), Ss, Se, Ah/Al (3).
///
/// Grayscale or 4-component scans have a different size and are split at
/// the wrong place; the strict head comparison is what catches that.
pub const SCAN_HEADER_SUFFIX_LEN: usize = 10;

/// A JPEG cut into the part shared by every image of a type (`head`) and
/// the per-image entropy-coded data (`tail`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    pub head: &'a [u8],
    pub tail: &'a [u8],
}

/// Split `data` right after the SOS header.
///
/// `head ‖ tail` is always exactly `data`. The tail may be empty.
pub fn split_at_scan(data: &[u8]) -> Result<Split<'_>> {
    let (sos_offset, _) = find_marker(data, SOS)?;
    let split = sos_offset + 4 + SCAN_HEADER_SUFFIX_LEN;
    if split > data.len() {
        return Err(JpegError::TruncatedScanHeader { split, len: data.len() });
    }
    let (head, tail) = data.split_at(split);
    Ok(Split { head, tail })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOS_HEADER: [u8; 14] = [
        0xFF, 0xDA, 0x00, 0x0C, 3, 1, 0x00, 2, 0x11, 3, 0x11, 0, 63, 0,
    ];

    #[test]
    fn split_after_scan_header() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x03, b'x'];
        data.extend_from_slice(&SOS_HEADER);
        let head_len = data.len();
        data.extend_from_slice(&[0x12, 0x34, 0xFF, 0x00, 0x56, 0xFF, 0xD9]);

        let split = split_at_scan(&data).unwrap();
        assert_eq!(split.head.len(), head_len);
        assert_eq!(split.tail, &[0x12, 0x34, 0xFF, 0x00, 0x56, 0xFF, 0xD9]);
        assert_eq!([split.head, split.tail].concat(), data);
    }

    #[test]
    fn empty_tail_is_allowed() {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&SOS_HEADER);
        let split = split_at_scan(&data).unwrap();
        assert_eq!(split.head, &data[..]);
        assert!(split.tail.is_empty());
    }

    #[test]
    fn truncated_scan_header() {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&SOS_HEADER[..10]);
        assert!(matches!(
            split_at_scan(&data),
            Err(JpegError::TruncatedScanHeader { split: 16, len: 12 })
        ));
    }

    #[test]
    fn no_scan_marker() {
        let data = [0xFF, 0xD8, 0xFF, 0xC4, 0x00, 0x02, 0xFF, 0xD9];
        assert!(matches!(
            split_at_scan(&data),
            Err(JpegError::MarkerNotFound { marker: SOS, cause: None })
        ));
    }

    #[test]
    fn garbage_before_scan_is_reported() {
        let data = [0xFF, 0xD8, 0x00, 0x11, 0xFF, 0xDA];
        match split_at_scan(&data) {
            Err(JpegError::MarkerNotFound { marker: SOS, cause: Some(cause) }) => {
                assert_eq!(*cause, JpegError::BadMarkerPrefix { offset: 2, found: 0x00 });
            }
            other => panic!("expected MarkerNotFound, got {other:?}"),
        }
    }
}
