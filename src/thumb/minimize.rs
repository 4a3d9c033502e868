// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Source image → small baseline JPEG.
//!
//! Decoding and resampling go through the `image` crate; the JPEG itself is
//! written by [`crate::jpeg::encode_baseline`] so its head has the fixed
//! layout the registry was built from.

use image::imageops::FilterType;
use image::ColorType;
use log::debug;

use super::error::ThumbError;
use crate::jpeg::{self, error::JpegError};

/// Proportional size with the longer side clamped to `max_dimension`.
///
/// Images already within the bound keep their size. When width and height
/// are equal the width is treated as the longer side. The shorter side is
/// rounded to nearest and never drops below 1.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let scale = |short: u32, long: u32| {
        let (short, long, max) = (short as u64, long as u64, max_dimension as u64);
        (((short * max + long / 2) / long) as u32).max(1)
    };
    if width >= height && width > max_dimension {
        (max_dimension, scale(height, width))
    } else if height > width && height > max_dimension {
        (scale(width, height), max_dimension)
    } else {
        (width, height)
    }
}

fn is_grayscale(color: ColorType) -> bool {
    matches!(color, ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16)
}

/// Decode `source`, shrink it to fit `max_dimension` and re-encode it as a
/// baseline JPEG at `quality`.
///
/// # Errors
/// - [`ThumbError::DecodeFailed`] if `source` is not a supported image.
/// - [`ThumbError::UnsupportedColorSpace`] for grayscale sources.
/// - [`ThumbError::EncodeFailed`] if `max_dimension` is zero or the
///   baseline writer rejects the result.
pub fn minimize(source: &[u8], max_dimension: u32, quality: u8) -> Result<Vec<u8>, ThumbError> {
    if max_dimension == 0 {
        return Err(ThumbError::EncodeFailed(JpegError::InvalidDimensions { width: 0, height: 0 }));
    }
    let img = image::load_from_memory(source)?;
    if is_grayscale(img.color()) {
        return Err(ThumbError::UnsupportedColorSpace(img.color()));
    }

    let (width, height) = (img.width(), img.height());
    let (new_w, new_h) = target_dimensions(width, height, max_dimension);
    let img = if (new_w, new_h) != (width, height) {
        img.resize_exact(new_w, new_h, FilterType::Lanczos3)
    } else {
        img
    };
    debug!("minimize: {width}x{height} -> {new_w}x{new_h} at quality {quality}");

    let rgb = img.to_rgb8();
    jpeg::encode_baseline(rgb.as_raw(), rgb.width(), rgb.height(), quality)
        .map_err(ThumbError::EncodeFailed)
}
