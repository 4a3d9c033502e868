// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Quantization and Huffman tables for the baseline writer.
//!
//! Everything here ends up in the shared thumbnail head, so the byte layout
//! of [`write_dqt`] and [`write_dht`] is part of the wire contract: one DQT
//! segment holding both tables, and one DHT segment holding all four
//! Huffman tables in the order DC0, AC0, DC1, AC1.

use super::dct::QuantTable;
use super::marker::{DHT, DQT};

/// Maps zigzag index (0–63) to natural row-major index (0–63).
pub const ZIGZAG_TO_NATURAL: [usize; 64] = [
     0,  1,  8, 16,  9,  2,  3, 10,
    17, 24, 32, 25, 18, 11,  4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13,  6,  7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

/// Inverse of [`ZIGZAG_TO_NATURAL`].
pub const NATURAL_TO_ZIGZAG: [usize; 64] = {
    let mut table = [0usize; 64];
    let mut i = 0;
    while i < 64 {
        table[ZIGZAG_TO_NATURAL[i]] = i;
        i += 1;
    }
    table
};

/// ITU-T T.81 Table K.1, natural order.
pub const STD_LUMA_QUANT: [u16; 64] = [
    16, 11, 10, 16,  24,  40,  51,  61,
    12, 12, 14, 19,  26,  58,  60,  55,
    14, 13, 16, 24,  40,  57,  69,  56,
    14, 17, 22, 29,  51,  87,  80,  62,
    18, 22, 37, 56,  68, 109, 103,  77,
    24, 35, 55, 64,  81, 104, 113,  92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103,  99,
];

/// ITU-T T.81 Table K.2, natural order.
pub const STD_CHROMA_QUANT: [u16; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99,
    18, 21, 26, 66, 99, 99, 99, 99,
    24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
];

/// Scale a base table to a 1–100 quality factor (libjpeg convention).
///
/// Entries are clamped to 1..=255 so the table always fits 8-bit DQT
/// precision.
pub fn scaled_quant_table(base: &[u16; 64], quality: u8) -> QuantTable {
    let quality = quality.clamp(1, 100) as u32;
    let scale = if quality < 50 { 5000 / quality } else { 200 - quality * 2 };
    let mut values = [0u16; 64];
    for (v, &b) in values.iter_mut().zip(base.iter()) {
        *v = ((b as u32 * scale + 50) / 100).clamp(1, 255) as u16;
    }
    QuantTable::new(values)
}

/// Write one DQT segment (marker included) containing every table in
/// `tables`, each as 8-bit precision in zigzag order.
pub fn write_dqt(tables: &[(u8, &QuantTable)]) -> Vec<u8> {
    let length = 2 + tables.len() * 65;
    let mut out = Vec::with_capacity(length + 2);
    out.extend_from_slice(&[0xFF, DQT]);
    out.extend_from_slice(&(length as u16).to_be_bytes());
    for &(id, qt) in tables {
        out.push(id & 0x0F);
        out.extend(ZIGZAG_TO_NATURAL.iter().map(|&ni| qt.values[ni].min(255) as u8));
    }
    out
}

/// Huffman table specification as carried in DHT.
#[derive(Debug, Clone)]
pub struct HuffmanSpec {
    /// Table class: 0 = DC, 1 = AC.
    pub class: u8,
    /// Table ID (0–3).
    pub id: u8,
    /// Number of codes of each length (1–16).
    pub bits: [u8; 16],
    /// Symbol values in order of increasing code length.
    pub huffval: Vec<u8>,
}

const LUMA_DC_BITS: [u8; 16] = [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0];
const CHROMA_DC_BITS: [u8; 16] = [0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0];
const DC_VALUES: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

const LUMA_AC_BITS: [u8; 16] = [0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 0x7D];
const LUMA_AC_VALUES: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07,
    0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08, 0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0,
    0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28,
    0x29, 0x2A, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49,
    0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
    0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89,
    0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7,
    0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5,
    0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
    0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8,
    0xF9, 0xFA,
];

const CHROMA_AC_BITS: [u8; 16] = [0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 0x77];
const CHROMA_AC_VALUES: [u8; 162] = [
    0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61, 0x71,
    0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91, 0xA1, 0xB1, 0xC1, 0x09, 0x23, 0x33, 0x52, 0xF0,
    0x15, 0x62, 0x72, 0xD1, 0x0A, 0x16, 0x24, 0x34, 0xE1, 0x25, 0xF1, 0x17, 0x18, 0x19, 0x1A, 0x26,
    0x27, 0x28, 0x29, 0x2A, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48,
    0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
    0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87,
    0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5,
    0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3,
    0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA,
    0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8,
    0xF9, 0xFA,
];

/// The four Annex K tables in DHT order: luma DC, luma AC, chroma DC,
/// chroma AC.
pub fn standard_huffman_specs() -> [HuffmanSpec; 4] {
    [
        HuffmanSpec { class: 0, id: 0, bits: LUMA_DC_BITS, huffval: DC_VALUES.to_vec() },
        HuffmanSpec { class: 1, id: 0, bits: LUMA_AC_BITS, huffval: LUMA_AC_VALUES.to_vec() },
        HuffmanSpec { class: 0, id: 1, bits: CHROMA_DC_BITS, huffval: DC_VALUES.to_vec() },
        HuffmanSpec { class: 1, id: 1, bits: CHROMA_AC_BITS, huffval: CHROMA_AC_VALUES.to_vec() },
    ]
}

/// Write one DHT segment (marker included) containing every spec.
pub fn write_dht(specs: &[HuffmanSpec]) -> Vec<u8> {
    let body: usize = specs.iter().map(|s| 1 + 16 + s.huffval.len()).sum();
    let length = 2 + body;
    let mut out = Vec::with_capacity(length + 2);
    out.extend_from_slice(&[0xFF, DHT]);
    out.extend_from_slice(&(length as u16).to_be_bytes());
    for spec in specs {
        out.push((spec.class << 4) | (spec.id & 0x0F));
        out.extend_from_slice(&spec.bits);
        out.extend_from_slice(&spec.huffval);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_tables_are_inverse() {
        for i in 0..64 {
            assert_eq!(NATURAL_TO_ZIGZAG[ZIGZAG_TO_NATURAL[i]], i);
        }
        assert_eq!(ZIGZAG_TO_NATURAL[2], 8);
        assert_eq!(ZIGZAG_TO_NATURAL[63], 63);
    }

    #[test]
    fn quality_scaling() {
        // q=7 → scale 714: 16*714/100 rounds to 114
        let qt = scaled_quant_table(&STD_LUMA_QUANT, 7);
        assert_eq!(qt.values[0], 114);
        assert_eq!(qt.values[63], 255);

        // q=50 leaves the base table untouched
        let qt = scaled_quant_table(&STD_LUMA_QUANT, 50);
        assert_eq!(qt.values, STD_LUMA_QUANT);

        // q=100 drives every entry to the floor of 1
        let qt = scaled_quant_table(&STD_CHROMA_QUANT, 100);
        assert!(qt.values.iter().all(|&v| v == 1));

        // Out-of-range qualities are clamped rather than dividing by zero
        assert_eq!(scaled_quant_table(&STD_LUMA_QUANT, 0).values, scaled_quant_table(&STD_LUMA_QUANT, 1).values);
    }

    #[test]
    fn dqt_carries_both_tables_in_zigzag_order() {
        let luma = scaled_quant_table(&STD_LUMA_QUANT, 30);
        let chroma = scaled_quant_table(&STD_CHROMA_QUANT, 30);
        let seg = write_dqt(&[(0, &luma), (1, &chroma)]);
        assert_eq!(seg.len(), 134);
        assert_eq!(&seg[..4], &[0xFF, 0xDB, 0x00, 0x84]);
        assert_eq!(seg[4], 0x00);
        assert_eq!(seg[69], 0x01);
        // zigzag position 2 is natural (1, 0): luma 12 at q30 → 20
        assert_eq!(seg[5 + 2], 20);
        // chroma zigzag 0..3 = 17, 18, 18, 24 at q30 (scale 166)
        assert_eq!(&seg[70..74], &[28, 30, 30, 40]);
    }

    #[test]
    fn dht_length_for_standard_tables() {
        let seg = write_dht(&standard_huffman_specs());
        assert_eq!(seg.len(), 420);
        assert_eq!(&seg[..5], &[0xFF, 0xC4, 0x01, 0xA2, 0x00]);
        // class/id bytes follow each table
        assert_eq!(seg[4 + 17 + 12], 0x10);
        assert_eq!(seg[4 + 17 + 12 + 17 + 162], 0x01);
        assert_eq!(seg[4 + 2 * (17 + 12) + 17 + 162], 0x11);
    }

    #[test]
    fn standard_specs_are_complete() {
        for spec in standard_huffman_specs() {
            let total: usize = spec.bits.iter().map(|&b| b as usize).sum();
            assert_eq!(total, spec.huffval.len());
        }
    }
}
