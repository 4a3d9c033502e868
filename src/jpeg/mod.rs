// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Pure-Rust JPEG marker walking and baseline encoding.
//!
//! Two halves live here:
//!
//! - Reading: [`marker::read_marker`] / [`marker::find_marker`] walk a JPEG
//!   segment by segment using the declared lengths, which is all
//!   [`frame::locate_dimensions`] and [`split::split_at_scan`] need to find
//!   the height/width field and the start of entropy-coded data.
//! - Writing: [`encode_baseline`] turns an RGB buffer into a baseline
//!   sequential JPEG with a fixed header layout (one DQT, SOF0 4:2:0, one
//!   DHT with the standard tables, 3-component SOS).
//!
//! Does NOT support:
//! - Decoding scan data (pixels come in through the `image` crate)
//! - Progressive, arithmetic-coded or 12-bit output
//! - Restart intervals or APPn segments on output

pub mod error;
pub mod marker;
pub mod frame;
pub mod split;
pub mod tables;
pub mod huffman;
pub mod bitio;
pub mod dct;
pub mod color;
pub mod scan;

use dct::forward_dct_plane;
use error::{JpegError, Result};
use frame::FrameInfo;
use tables::{scaled_quant_table, standard_huffman_specs, STD_CHROMA_QUANT, STD_LUMA_QUANT};

/// Encode an interleaved 8-bit RGB buffer as a baseline JPEG.
///
/// The output is `SOI, DQT, SOF0, DHT, SOS, scan data, EOI`. For a given
/// `quality` every byte before the scan data is identical across images
/// except the 4-byte height/width field in SOF0. `quality` is clamped to
/// 1..=100.
pub fn encode_baseline(rgb: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
    let (w16, h16) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(JpegError::InvalidDimensions { width, height }),
    };
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(JpegError::PixelBufferSize { expected, actual: rgb.len() });
    }

    let frame = FrameInfo::ycbcr_420(w16, h16)?;
    let luma_qt = scaled_quant_table(&STD_LUMA_QUANT, quality);
    let chroma_qt = scaled_quant_table(&STD_CHROMA_QUANT, quality);

    let planes = color::ycbcr_420_planes(rgb, &frame);
    let grids: Vec<_> = planes
        .iter()
        .zip(&frame.components)
        .map(|(plane, comp)| {
            let qt = if comp.quant_table_id == 0 { &luma_qt } else { &chroma_qt };
            forward_dct_plane(plane, qt)
        })
        .collect();

    let huffman = standard_huffman_specs();
    let scan_components = scan::ycbcr_scan_components();
    let scan_bytes = scan::encode_scan(&frame, &scan_components, &grids, &huffman)?;

    let mut out = Vec::with_capacity(600 + scan_bytes.len());
    out.extend_from_slice(&[0xFF, marker::SOI]);
    out.extend_from_slice(&tables::write_dqt(&[(0, &luma_qt), (1, &chroma_qt)]));
    out.extend_from_slice(&frame.write_sof());
    out.extend_from_slice(&tables::write_dht(&huffman));
    out.extend_from_slice(&scan::write_sos(&frame, &scan_components));
    out.extend_from_slice(&scan_bytes);
    out.extend_from_slice(&[0xFF, marker::EOI]);

    Ok(out)
}
