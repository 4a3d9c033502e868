// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Forward DCT, quantization tables, and coefficient storage.
//!
//! Provides [`DctGrid`] for storing quantized DCT coefficients in block-raster
//! order, [`QuantTable`] for the 64-entry quantization matrices, and
//! [`forward_dct_plane`] to fill a grid from one pixel plane.

use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Quantization table: 64 values in natural (row-major) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantTable {
    /// Quantization values, indexed by row * 8 + col.
    pub values: [u16; 64],
}

impl QuantTable {
    pub fn new(values: [u16; 64]) -> Self {
        Self { values }
    }
}

/// Grid of quantized DCT coefficients for one image component.
///
/// Coefficients are stored in block-raster order. Within each block,
/// the 64 coefficients are in natural (row-major) order.
#[derive(Debug, Clone)]
pub struct DctGrid {
    blocks_wide: usize,
    coeffs: Vec<i16>,
}

impl DctGrid {
    /// Create a new grid initialized to zero.
    pub fn new(blocks_wide: usize, blocks_tall: usize) -> Self {
        Self {
            blocks_wide,
            coeffs: vec![0i16; blocks_wide * blocks_tall * 64],
        }
    }

    /// Get a reference to the 64-coefficient block at (br, bc).
    pub fn block(&self, br: usize, bc: usize) -> &[i16] {
        let start = (br * self.blocks_wide + bc) * 64;
        &self.coeffs[start..start + 64]
    }
}

/// A single-channel image whose dimensions are multiples of 8.
#[derive(Debug, Clone)]
pub struct Plane {
    pub width: usize,
    pub height: usize,
    pub samples: Vec<f64>,
}

impl Plane {
    /// Copy the 8×8 block at block position (br, bc).
    fn block(&self, br: usize, bc: usize) -> [f64; 64] {
        let mut out = [0.0f64; 64];
        for row in 0..8 {
            let start = (br * 8 + row) * self.width + bc * 8;
            out[row * 8..row * 8 + 8].copy_from_slice(&self.samples[start..start + 8]);
        }
        out
    }
}

/// `COSINE[u][x] = cos((2*x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; 8]; 8]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; 8]; 8] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; 8]; 8];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, c) in row.iter_mut().enumerate() {
                *c = ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0).cos();
            }
        }
        table
    })
}

fn norm(u: usize) -> f64 {
    if u == 0 {
        std::f64::consts::FRAC_1_SQRT_2 * 0.5
    } else {
        0.5
    }
}

/// 8×8 forward DCT + quantize.
///
/// Input: samples in 0–255. Output: quantized coefficients in natural order.
pub fn dct_block(pixels: &[f64; 64], qt: &QuantTable) -> [i16; 64] {
    let cos = cosine_table();

    // Rows first, with the level shift folded in.
    let mut temp = [0.0f64; 64];
    for row in 0..8 {
        for u in 0..8 {
            let mut sum = 0.0;
            for x in 0..8 {
                sum += (pixels[row * 8 + x] - 128.0) * cos[u][x];
            }
            temp[row * 8 + u] = norm(u) * sum;
        }
    }

    let mut quantized = [0i16; 64];
    for col in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0;
            for y in 0..8 {
                sum += temp[y * 8 + col] * cos[v][y];
            }
            let coeff = norm(v) * sum;
            let i = v * 8 + col;
            quantized[i] = (coeff / qt.values[i] as f64).round() as i16;
        }
    }
    quantized
}

/// Transform every block of `plane` into a new grid.
///
/// Blocks are independent, so with the `parallel` feature the grid is
/// filled with `par_chunks_mut`, one 64-coefficient chunk per block.
pub fn forward_dct_plane(plane: &Plane, qt: &QuantTable) -> DctGrid {
    let mut grid = DctGrid::new(plane.width / 8, plane.height / 8);
    let bw = grid.blocks_wide;
    let fill = |(idx, chunk): (usize, &mut [i16])| {
        let quantized = dct_block(&plane.block(idx / bw, idx % bw), qt);
        chunk.copy_from_slice(&quantized);
    };

    #[cfg(feature = "parallel")]
    grid.coeffs.par_chunks_mut(64).enumerate().for_each(fill);
    #[cfg(not(feature = "parallel"))]
    grid.coeffs.chunks_mut(64).enumerate().for_each(fill);

    grid
}
