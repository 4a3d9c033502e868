// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode and decode pipelines.
//!
//! Encode flow: registry lookup -> minimize (decode, resize, baseline
//! encode) -> split at SOS -> locate SOF0 dimensions -> zero them in a copy
//! of the head -> optional strict comparison -> `type ‖ dims ‖ tail`.
//!
//! Decode flow: parse prefix -> registry lookup -> patch dimensions into a
//! copy of the registry head -> append tail.

use log::{debug, warn};

use super::error::ThumbError;
use super::minimize::minimize;
use super::payload::Payload;
use super::registry::{self, TypeParameters};
use crate::jpeg::frame::locate_dimensions;
use crate::jpeg::split::split_at_scan;

/// Result of [`encode`]: the payload plus what went into it.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    /// Serialized payload, ready to ship.
    pub payload: Vec<u8>,
    pub debug: ThumbDebug,
}

/// Inspection data for one encode.
#[derive(Debug, Clone)]
pub struct ThumbDebug {
    pub parameters: &'static TypeParameters,
    /// The full minimized JPEG, independent of the compared head.
    pub jpeg: Vec<u8>,
    pub height: u16,
    pub width: u16,
    pub payload_len: usize,
    pub max_dimension: u32,
}

/// Build a thumbnail payload from any image the `image` crate decodes.
///
/// With `strict` the canonicalized head must equal the registry head and
/// the dimension field must sit at the registry offset. Without it a
/// payload is produced even when the head differs, and decoding it later
/// yields the registry head rather than the one that was encoded.
///
/// # Errors
/// - [`ThumbError::UnknownType`] before any image work.
/// - Image pipeline errors from [`minimize`].
/// - [`ThumbError::Jpeg`] if the minimized JPEG cannot be walked.
/// - [`ThumbError::HeaderMismatch`] / [`ThumbError::DimensionOffsetMismatch`]
///   in strict mode.
pub fn encode(
    source: &[u8],
    type_id: u8,
    max_dimension: u32,
    strict: bool,
) -> Result<Thumbnail, ThumbError> {
    let params = registry::lookup(type_id)?;
    let jpeg = minimize(source, max_dimension, params.quality)?;
    let payload = assemble(&jpeg, type_id, params, strict)?;
    let bytes = payload.to_bytes();

    debug!(
        "encode: type {type_id}, {}x{}, jpeg {} bytes, payload {} bytes",
        payload.width(),
        payload.height(),
        jpeg.len(),
        bytes.len()
    );

    Ok(Thumbnail {
        debug: ThumbDebug {
            parameters: params,
            height: payload.height(),
            width: payload.width(),
            payload_len: bytes.len(),
            max_dimension,
            jpeg,
        },
        payload: bytes,
    })
}

/// Build a payload from an already minimized baseline JPEG.
pub fn encode_jpeg(jpeg: &[u8], type_id: u8, strict: bool) -> Result<Vec<u8>, ThumbError> {
    let params = registry::lookup(type_id)?;
    Ok(assemble(jpeg, type_id, params, strict)?.to_bytes())
}

fn assemble(
    jpeg: &[u8],
    type_id: u8,
    params: &TypeParameters,
    strict: bool,
) -> Result<Payload, ThumbError> {
    let split = split_at_scan(jpeg)?;
    let dims = locate_dimensions(split.head)?;

    let mut head = split.head.to_vec();
    head[dims.offset..dims.offset + 4].fill(0);

    if strict {
        if head != params.head {
            let offset = head
                .iter()
                .zip(&params.head)
                .position(|(a, b)| a != b)
                .unwrap_or(head.len().min(params.head.len()));
            return Err(ThumbError::HeaderMismatch {
                offset,
                got_len: head.len(),
                expected_len: params.head.len(),
            });
        }
        if dims.offset != params.dimension_offset {
            return Err(ThumbError::DimensionOffsetMismatch {
                got: dims.offset,
                expected: params.dimension_offset,
            });
        }
    } else if head != params.head || dims.offset != params.dimension_offset {
        warn!("type {type_id}: head differs from registry, payload will not decode to this JPEG");
    }

    Ok(Payload { type_id, dimensions: dims.bytes, tail: split.tail.to_vec() })
}

/// Reconstitute the full JPEG from a payload.
///
/// # Errors
/// - [`ThumbError::Truncated`] if the payload is shorter than 5 bytes.
/// - [`ThumbError::UnknownType`] if the type id is not registered.
pub fn decode(payload: &[u8]) -> Result<Vec<u8>, ThumbError> {
    let payload = Payload::from_bytes(payload)?;
    let params = registry::lookup(payload.type_id)?;

    let mut out = Vec::with_capacity(params.head.len() + payload.tail.len());
    out.extend_from_slice(&params.head);
    let at = params.dimension_offset;
    out[at..at + 4].copy_from_slice(&payload.dimensions);
    out.extend_from_slice(&payload.tail);

    debug!(
        "decode: type {}, {}x{}, {} bytes",
        payload.type_id,
        payload.width(),
        payload.height(),
        out.len()
    );
    Ok(out)
}
