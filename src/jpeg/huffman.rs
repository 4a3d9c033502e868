// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Huffman encode tables and JPEG value categories.

use super::error::{JpegError, Result};
use super::tables::HuffmanSpec;

/// Huffman encode table: maps symbol → (code_bits, code_length).
pub struct HuffmanEncodeTable {
    /// Length 0 means the symbol is not in the table.
    table: [(u16, u8); 256],
}

impl HuffmanEncodeTable {
    /// Build canonical codes (T.81 Annex C) from a DHT-style spec.
    pub fn build(spec: &HuffmanSpec) -> Self {
        let mut table = [(0u16, 0u8); 256];
        let mut code: u32 = 0;
        let mut symbols = spec.huffval.iter();

        for length in 1..=16u8 {
            for _ in 0..spec.bits[(length - 1) as usize] {
                if let Some(&symbol) = symbols.next() {
                    table[symbol as usize] = (code as u16, length);
                }
                code += 1;
            }
            code <<= 1;
        }

        Self { table }
    }

    /// Encode a symbol: returns (code_bits, code_length).
    pub fn encode(&self, symbol: u8) -> Result<(u16, u8)> {
        match self.table[symbol as usize] {
            (_, 0) => Err(JpegError::MissingHuffmanCode(symbol)),
            entry => Ok(entry),
        }
    }
}

/// Encode a signed value into JPEG "additional bits" representation.
/// Returns (magnitude_bits, category/size).
pub fn encode_value(value: i16) -> (u16, u8) {
    if value == 0 {
        return (0, 0);
    }
    let size = 16 - value.unsigned_abs().leading_zeros() as u8;
    // Negative values are sent as the one's complement of their magnitude.
    let bits = if value > 0 { value as u16 } else { (value - 1) as u16 };
    (bits & ((1u16 << size) - 1), size)
}
