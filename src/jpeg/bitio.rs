// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Bit-level writer for JPEG entropy-coded data.

/// MSB-first bit writer with JPEG byte-stuffing (0xFF → 0xFF 0x00).
pub struct BitWriter {
    output: Vec<u8>,
    /// Pending bits, right-aligned.
    acc: u32,
    /// Number of valid bits in `acc` (always < 8 between calls).
    pending: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { output: Vec::new(), acc: 0, pending: 0 }
    }

    /// Write the low `count` bits (1–16) of `value`.
    pub fn write_bits(&mut self, value: u16, count: u8) {
        debug_assert!((1..=16).contains(&count));
        let mask = (1u32 << count) - 1;
        self.acc = (self.acc << count) | (value as u32 & mask);
        self.pending += count;
        while self.pending >= 8 {
            self.pending -= 8;
            let byte = (self.acc >> self.pending) as u8;
            self.emit_byte(byte);
        }
        self.acc &= (1u32 << self.pending) - 1;
    }

    /// Pad the last partial byte with 1-bits and return the stuffed bytes.
    pub fn flush(mut self) -> Vec<u8> {
        if self.pending > 0 {
            let fill = 8 - self.pending;
            let byte = ((self.acc << fill) | ((1u32 << fill) - 1)) as u8;
            self.emit_byte(byte);
        }
        self.output
    }

    fn emit_byte(&mut self, byte: u8) {
        self.output.push(byte);
        if byte == 0xFF {
            self.output.push(0x00);
        }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibbles_pack_into_one_byte() {
        let mut w = BitWriter::new();
        w.write_bits(0b1100, 4);
        w.write_bits(0b0011, 4);
        assert_eq!(w.flush(), vec![0xC3]);
    }

    #[test]
    fn partial_byte_is_padded_with_ones() {
        let mut w = BitWriter::new();
        w.write_bits(0b01, 2);
        assert_eq!(w.flush(), vec![0b0111_1111]);
    }

    #[test]
    fn ff_is_stuffed() {
        let mut w = BitWriter::new();
        w.write_bits(0xFFFF, 16);
        w.write_bits(0, 8);
        assert_eq!(w.flush(), vec![0xFF, 0x00, 0xFF, 0x00, 0x00]);
    }

    #[test]
    fn padding_that_produces_ff_is_stuffed() {
        let mut w = BitWriter::new();
        w.write_bits(0b1111, 4);
        assert_eq!(w.flush(), vec![0xFF, 0x00]);
    }

    #[test]
    fn codes_span_byte_boundaries() {
        let mut w = BitWriter::new();
        w.write_bits(0b101, 3);
        w.write_bits(0b1_0000_0001, 9);
        w.write_bits(0b0110, 4);
        // 101 100000001 0110 → 1011_0000 0001_0110
        assert_eq!(w.flush(), vec![0xB0, 0x16]);
    }

    #[test]
    fn empty_writer_flushes_nothing() {
        assert!(BitWriter::new().flush().is_empty());
    }
}
