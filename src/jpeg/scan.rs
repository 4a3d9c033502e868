// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Baseline scan header and entropy-coded scan data.
//!
//! Encodes [`DctGrid`]s (one per component) into interleaved MCUs with DC
//! prediction, run-length AC coding and byte stuffing.

use super::bitio::BitWriter;
use super::dct::DctGrid;
use super::error::Result;
use super::frame::FrameInfo;
use super::huffman::{encode_value, HuffmanEncodeTable};
use super::marker::SOS;
use super::tables::{HuffmanSpec, NATURAL_TO_ZIGZAG};

/// Component selector for one scan component.
#[derive(Debug, Clone)]
pub struct ScanComponent {
    /// Index into FrameInfo.components.
    pub comp_idx: usize,
    /// DC Huffman table index.
    pub dc_table: usize,
    /// AC Huffman table index.
    pub ac_table: usize,
}

/// Luma on tables 0, chroma on tables 1.
pub fn ycbcr_scan_components() -> Vec<ScanComponent> {
    (0..3)
        .map(|comp_idx| {
            let table = usize::from(comp_idx != 0);
            ScanComponent { comp_idx, dc_table: table, ac_table: table }
        })
        .collect()
}

/// Serialize the SOS segment for a full-spectrum sequential scan
/// (Ss=0, Se=63, Ah=Al=0), marker included.
pub fn write_sos(frame: &FrameInfo, scan_components: &[ScanComponent]) -> Vec<u8> {
    let length = 2 + 1 + 2 * scan_components.len() + 3;
    let mut out = Vec::with_capacity(length + 2);
    out.extend_from_slice(&[0xFF, SOS]);
    out.extend_from_slice(&(length as u16).to_be_bytes());
    out.push(scan_components.len() as u8);
    for sc in scan_components {
        out.push(frame.components[sc.comp_idx].id);
        out.push(((sc.dc_table as u8) << 4) | sc.ac_table as u8);
    }
    out.extend_from_slice(&[0, 63, 0]);
    out
}

/// Encode DctGrids to entropy-coded scan data (without the SOS header).
///
/// `huffman` holds the specs the scan components refer to; a DC table `n`
/// is looked up as class 0 / id `n`, an AC table as class 1 / id `n`.
pub fn encode_scan(
    frame: &FrameInfo,
    scan_components: &[ScanComponent],
    grids: &[DctGrid],
    huffman: &[HuffmanSpec],
) -> Result<Vec<u8>> {
    let table_for = |class: u8, id: usize| {
        huffman
            .iter()
            .find(|s| s.class == class && s.id as usize == id)
            .map(HuffmanEncodeTable::build)
            .ok_or(super::error::JpegError::MissingHuffmanCode(id as u8))
    };
    let mut tables = Vec::with_capacity(scan_components.len());
    for sc in scan_components {
        tables.push((table_for(0, sc.dc_table)?, table_for(1, sc.ac_table)?));
    }

    let mut writer = BitWriter::new();
    let mut dc_pred = vec![0i32; scan_components.len()];

    for mcu_row in 0..frame.mcus_tall as usize {
        for mcu_col in 0..frame.mcus_wide as usize {
            for (sci, sc) in scan_components.iter().enumerate() {
                let comp = &frame.components[sc.comp_idx];
                let (dc_tab, ac_tab) = &tables[sci];

                for v in 0..comp.v_sampling as usize {
                    for h in 0..comp.h_sampling as usize {
                        let block_row = mcu_row * comp.v_sampling as usize + v;
                        let block_col = mcu_col * comp.h_sampling as usize + h;

                        let block = grids[sc.comp_idx].block(block_row, block_col);
                        let mut zz = [0i16; 64];
                        for (ni, &c) in block.iter().enumerate() {
                            zz[NATURAL_TO_ZIGZAG[ni]] = c;
                        }

                        let dc_diff = (zz[0] as i32 - dc_pred[sci]) as i16;
                        dc_pred[sci] = zz[0] as i32;
                        encode_block(&mut writer, &zz, dc_diff, dc_tab, ac_tab)?;
                    }
                }
            }
        }
    }

    Ok(writer.flush())
}

fn encode_block(
    writer: &mut BitWriter,
    zz: &[i16; 64],
    dc_diff: i16,
    dc_tab: &HuffmanEncodeTable,
    ac_tab: &HuffmanEncodeTable,
) -> Result<()> {
    let (dc_bits, dc_size) = encode_value(dc_diff);
    let (code, len) = dc_tab.encode(dc_size)?;
    writer.write_bits(code, len);
    if dc_size > 0 {
        writer.write_bits(dc_bits, dc_size);
    }

    let mut k = 1;
    while k < 64 {
        let mut run = 0usize;
        while k + run < 64 && zz[k + run] == 0 {
            run += 1;
        }
        if k + run >= 64 {
            let (code, len) = ac_tab.encode(0x00)?; // EOB
            writer.write_bits(code, len);
            break;
        }
        while run >= 16 {
            let (code, len) = ac_tab.encode(0xF0)?; // ZRL
            writer.write_bits(code, len);
            run -= 16;
            k += 16;
        }
        k += run;
        let (ac_bits, ac_size) = encode_value(zz[k]);
        let (code, len) = ac_tab.encode(((run as u8) << 4) | ac_size)?;
        writer.write_bits(code, len);
        writer.write_bits(ac_bits, ac_size);
        k += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::tables::standard_huffman_specs;

    #[test]
    fn sos_matches_reference_layout() {
        let frame = FrameInfo::ycbcr_420(8, 8).unwrap();
        assert_eq!(
            write_sos(&frame, &ycbcr_scan_components()),
            vec![0xFF, 0xDA, 0x00, 0x0C, 3, 1, 0x00, 2, 0x11, 3, 0x11, 0, 63, 0]
        );
    }

    #[test]
    fn all_zero_mcu() {
        // 16×16 → one MCU: 4 Y blocks + Cb + Cr, every block DC diff 0 and EOB.
        let frame = FrameInfo::ycbcr_420(16, 16).unwrap();
        let grids = vec![DctGrid::new(2, 2), DctGrid::new(1, 1), DctGrid::new(1, 1)];
        let out = encode_scan(&frame, &ycbcr_scan_components(), &grids, &standard_huffman_specs()).unwrap();
        // Luma block: DC "00" + EOB "1010" = 6 bits, ×4 = 24 bits.
        // Chroma block: DC "00" + EOB "00" = 4 bits, ×2 = 8 bits.
        // 001010 001010 001010 001010 0000 0000
        assert_eq!(out, vec![0b0010_1000, 0b1010_0010, 0b1000_1010, 0x00]);
    }

    #[test]
    fn missing_table_is_reported() {
        let frame = FrameInfo::ycbcr_420(16, 16).unwrap();
        let grids = vec![DctGrid::new(2, 2), DctGrid::new(1, 1), DctGrid::new(1, 1)];
        let specs = &standard_huffman_specs()[..2];
        assert!(encode_scan(&frame, &ycbcr_scan_components(), &grids, specs).is_err());
    }
}
