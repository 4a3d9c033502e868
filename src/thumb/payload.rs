// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Wire format of a thumbnail payload.
//!
//! ```text
//! [0]     type id
//! [1..3]  height, big-endian
//! [3..5]  width, big-endian
//! [5..]   entropy-coded scan data through EOI
//! ```

use super::error::ThumbError;

/// Type id plus SOF0 dimension bytes.
pub const PREFIX_LEN: usize = 5;

/// A parsed or to-be-serialized payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub type_id: u8,
    /// Height then width, both big-endian, exactly as stored in SOF0.
    pub dimensions: [u8; 4],
    pub tail: Vec<u8>,
}

impl Payload {
    /// Split a serialized payload into its fields. The registry is not
    /// consulted here.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ThumbError> {
        if data.len() < PREFIX_LEN {
            return Err(ThumbError::Truncated { len: data.len() });
        }
        let mut dimensions = [0u8; 4];
        dimensions.copy_from_slice(&data[1..PREFIX_LEN]);
        Ok(Self { type_id: data[0], dimensions, tail: data[PREFIX_LEN..].to_vec() })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PREFIX_LEN + self.tail.len());
        out.push(self.type_id);
        out.extend_from_slice(&self.dimensions);
        out.extend_from_slice(&self.tail);
        out
    }

    pub fn height(&self) -> u16 {
        u16::from_be_bytes([self.dimensions[0], self.dimensions[1]])
    }

    pub fn width(&self) -> u16 {
        u16::from_be_bytes([self.dimensions[2], self.dimensions[3]])
    }
}
