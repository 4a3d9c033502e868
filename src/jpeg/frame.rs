// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! JPEG frame header (SOF0): locating the dimension field and writing it.
//!
//! The SOF0 body starts with the sample precision byte, followed by the
//! 16-bit big-endian height and width. Those four bytes are the only part of
//! a thumbnail head that varies between images of the same type, so
//! [`locate_dimensions`] reports both their value and where they live.

use super::error::{JpegError, Result};
use super::marker::{find_marker, SOF0};

/// Distance from the start of the SOF0 segment to the height field:
/// marker (2) + length (2) + sample precision (1).
pub const DIMENSION_FIELD_SKIP: usize = 5;

/// Height and width as stored in SOF0, plus their absolute offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Big-endian height followed by big-endian width.
    pub bytes: [u8; 4],
    /// Absolute byte offset of `bytes[0]` in the scanned buffer.
    pub offset: usize,
}

impl Dimensions {
    pub fn height(&self) -> u16 {
        u16::from_be_bytes([self.bytes[0], self.bytes[1]])
    }

    pub fn width(&self) -> u16 {
        u16::from_be_bytes([self.bytes[2], self.bytes[3]])
    }
}

/// Find the SOF0 frame header and copy out its height/width field.
///
/// The returned bytes are a copy, so the caller may overwrite the field in
/// its own buffer afterwards without disturbing the result.
pub fn locate_dimensions(data: &[u8]) -> Result<Dimensions> {
    let (sof_offset, _) = find_marker(data, SOF0)?;
    let offset = sof_offset + DIMENSION_FIELD_SKIP;
    if offset + 4 > data.len() {
        return Err(JpegError::TruncatedDimensions { offset, len: data.len() });
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    Ok(Dimensions { bytes, offset })
}

/// Information about one image component in the frame.
#[derive(Debug, Clone)]
pub struct Component {
    /// Component ID (1=Y, 2=Cb, 3=Cr).
    pub id: u8,
    /// Horizontal sampling factor.
    pub h_sampling: u8,
    /// Vertical sampling factor.
    pub v_sampling: u8,
    /// Quantization table ID.
    pub quant_table_id: u8,
}

/// Frame layout used by the baseline writer.
#[derive(Debug, Clone)]
pub struct FrameInfo {
    pub height: u16,
    pub width: u16,
    pub components: Vec<Component>,
    pub max_h_sampling: u8,
    pub max_v_sampling: u8,
    /// Number of MCUs horizontally.
    pub mcus_wide: u16,
    /// Number of MCUs vertically.
    pub mcus_tall: u16,
}

impl FrameInfo {
    /// YCbCr frame with 4:2:0 chroma subsampling: Y is 2×2, Cb and Cr are
    /// 1×1 and share quantization table 1.
    pub fn ycbcr_420(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(JpegError::InvalidDimensions { width: width as u32, height: height as u32 });
        }
        let components = vec![
            Component { id: 1, h_sampling: 2, v_sampling: 2, quant_table_id: 0 },
            Component { id: 2, h_sampling: 1, v_sampling: 1, quant_table_id: 1 },
            Component { id: 3, h_sampling: 1, v_sampling: 1, quant_table_id: 1 },
        ];
        let mcu_size = 16u32;
        Ok(Self {
            height,
            width,
            components,
            max_h_sampling: 2,
            max_v_sampling: 2,
            mcus_wide: (width as u32).div_ceil(mcu_size) as u16,
            mcus_tall: (height as u32).div_ceil(mcu_size) as u16,
        })
    }

    /// Number of 8×8 blocks wide for a given component.
    pub fn blocks_wide(&self, comp_idx: usize) -> usize {
        self.mcus_wide as usize * self.components[comp_idx].h_sampling as usize
    }

    /// Number of 8×8 blocks tall for a given component.
    pub fn blocks_tall(&self, comp_idx: usize) -> usize {
        self.mcus_tall as usize * self.components[comp_idx].v_sampling as usize
    }

    /// Serialize the SOF0 segment, marker included.
    pub fn write_sof(&self) -> Vec<u8> {
        let length = 2 + 6 + 3 * self.components.len();
        let mut out = Vec::with_capacity(length + 2);
        out.extend_from_slice(&[0xFF, SOF0]);
        out.extend_from_slice(&(length as u16).to_be_bytes());
        out.push(8); // sample precision
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.width.to_be_bytes());
        out.push(self.components.len() as u8);
        for c in &self.components {
            out.push(c.id);
            out.push((c.h_sampling << 4) | c.v_sampling);
            out.push(c.quant_table_id);
        }
        out
    }
}
