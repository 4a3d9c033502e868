// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! RGB → YCbCr conversion and 4:2:0 plane layout.
//!
//! Produces one [`Plane`] per component, padded out to whole MCUs by
//! replicating the last row and column of the image. Chroma is downsampled
//! by averaging each 2×2 neighbourhood of full-resolution samples.

use super::dct::Plane;
use super::frame::FrameInfo;

/// JFIF (BT.601 full-range) conversion of one RGB pixel.
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = -0.168_736 * r - 0.331_264 * g + 0.5 * b + 128.0;
    let cr = 0.5 * r - 0.418_688 * g - 0.081_312 * b + 128.0;
    (y, cb, cr)
}

/// Split an interleaved RGB buffer into padded Y, Cb and Cr planes laid out
/// for `frame`.
///
/// `rgb` must hold `frame.width * frame.height * 3` bytes.
pub fn ycbcr_420_planes(rgb: &[u8], frame: &FrameInfo) -> [Plane; 3] {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let luma_w = frame.blocks_wide(0) * 8;
    let luma_h = frame.blocks_tall(0) * 8;

    // Full-resolution components over the padded area.
    let mut full = [
        vec![0.0f64; luma_w * luma_h],
        vec![0.0f64; luma_w * luma_h],
        vec![0.0f64; luma_w * luma_h],
    ];
    for py in 0..luma_h {
        let sy = py.min(height - 1);
        for px in 0..luma_w {
            let sx = px.min(width - 1);
            let i = (sy * width + sx) * 3;
            let (y, cb, cr) = rgb_to_ycbcr(rgb[i], rgb[i + 1], rgb[i + 2]);
            let o = py * luma_w + px;
            full[0][o] = y;
            full[1][o] = cb;
            full[2][o] = cr;
        }
    }

    let [y, cb, cr] = full;
    let chroma_w = frame.blocks_wide(1) * 8;
    let chroma_h = frame.blocks_tall(1) * 8;
    [
        Plane { width: luma_w, height: luma_h, samples: y },
        downsample_2x2(&cb, luma_w, chroma_w, chroma_h),
        downsample_2x2(&cr, luma_w, chroma_w, chroma_h),
    ]
}

fn downsample_2x2(src: &[f64], src_w: usize, width: usize, height: usize) -> Plane {
    let mut samples = vec![0.0f64; width * height];
    for cy in 0..height {
        for cx in 0..width {
            let top = 2 * cy * src_w + 2 * cx;
            let bottom = top + src_w;
            samples[cy * width + cx] =
                (src[top] + src[top + 1] + src[bottom] + src[bottom + 1]) * 0.25;
        }
    }
    Plane { width, height, samples }
}
