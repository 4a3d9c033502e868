// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Thumbnail payloads on top of the JPEG layer.
//!
//! A thumbnail is a small baseline JPEG whose head (everything up to the
//! scan data) is fixed per type id except for the SOF0 height/width field.
//! The payload therefore only carries the type id, those four bytes and the
//! scan data; the registry supplies the rest on decode.

pub mod error;
pub mod registry;
pub mod payload;
pub mod minimize;
mod pipeline;

pub use error::ThumbError;
pub use pipeline::{decode, encode, encode_jpeg, ThumbDebug, Thumbnail};

/// Longest side, in pixels, when the caller has no preference.
pub const DEFAULT_MAX_DIMENSION: u32 = 32;

/// Type used when the caller has no preference (quality 7).
pub const DEFAULT_TYPE_ID: u8 = 1;
