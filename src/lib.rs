// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # tiny-thumb
//!
//! Tiny JPEG previews that fit in a few hundred bytes. Every thumbnail of a
//! given type is a baseline JPEG with the same quantization tables, Huffman
//! tables, frame layout and scan header; only the image size and the
//! entropy-coded data differ. Producer and consumer share those fixed heads
//! ahead of time, so the payload is just
//!
//! ```text
//! type id (1) ‖ height (2, BE) ‖ width (2, BE) ‖ scan data
//! ```
//!
//! The `jpeg` module walks marker segments and writes baseline JPEGs; the
//! `thumb` module holds the type registry and the encode/decode pipelines.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tiny_thumb::{encode, decode, DEFAULT_MAX_DIMENSION, DEFAULT_TYPE_ID};
//!
//! let photo = std::fs::read("photo.png").unwrap();
//! let thumb = encode(&photo, DEFAULT_TYPE_ID, DEFAULT_MAX_DIMENSION, true).unwrap();
//! let jpeg = decode(&thumb.payload).unwrap();
//! assert_eq!(jpeg, thumb.debug.jpeg);
//! ```

pub mod jpeg;
pub mod thumb;

pub use jpeg::error::{JpegError, Result as JpegResult};
pub use jpeg::encode_baseline;
pub use jpeg::frame::{locate_dimensions, Dimensions};
pub use jpeg::marker::{find_marker, read_marker, MarkerSegment};
pub use jpeg::split::{split_at_scan, Split};
pub use thumb::{decode, encode, encode_jpeg, ThumbDebug, ThumbError, Thumbnail};
pub use thumb::{DEFAULT_MAX_DIMENSION, DEFAULT_TYPE_ID};
pub use thumb::payload::Payload;
pub use thumb::registry::{lookup, type_ids, TypeParameters};
