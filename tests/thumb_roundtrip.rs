// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! End-to-end thumbnail tests: source image -> payload -> JPEG.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tiny_thumb::{decode, encode, lookup, type_ids, ThumbError};

/// Four quadrants: cyan top-left, white bottom-right, transparent black
/// elsewhere. Encoded as PNG.
fn quadrant_png(height: u32, width: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let left = x < width / 2;
        let top = y < height / 2;
        match (left, top) {
            (true, true) => Rgba([100, 200, 200, 255]),
            (false, false) => Rgba([255, 255, 255, 255]),
            _ => Rgba([0, 0, 0, 0]),
        }
    });
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn noise_png(height: u32, width: u32, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let img = image::RgbImage::from_fn(width, height, |_, _| image::Rgb(rng.gen()));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[test]
fn landscape_scenario() {
    let src = quadrant_png(100, 200);
    let thumb = encode(&src, 1, 30, true).unwrap();

    assert_eq!(thumb.payload[0], 1);
    assert_eq!(&thumb.payload[1..5], &[0x00, 0x0F, 0x00, 0x1E]);
    assert_eq!((thumb.debug.height, thumb.debug.width), (15, 30));
    assert_eq!(thumb.debug.parameters.dimension_offset, 141);
    assert_eq!(thumb.debug.max_dimension, 30);
    assert_eq!(thumb.debug.payload_len, thumb.payload.len());

    let mut head = thumb.debug.jpeg[..589].to_vec();
    head[141..145].fill(0);
    assert_eq!(head, lookup(1).unwrap().head);
}

#[test]
fn square_source_at_quality_30() {
    // 400×400 shrunk to 20×20 at quality 30 is type 6 with 0x14 patched in.
    let src = quadrant_png(400, 400);
    let thumb = encode(&src, 6, 20, true).unwrap();
    let mut expected = lookup(6).unwrap().head.clone();
    expected[141..145].copy_from_slice(&[0, 20, 0, 20]);
    assert_eq!(thumb.debug.jpeg[..589], expected[..]);
}

#[test]
fn every_type_passes_strict_checks() {
    let src = quadrant_png(100, 200);
    for id in type_ids() {
        let thumb = encode(&src, id, 30, true)
            .unwrap_or_else(|e| panic!("type {id}: {e}"));
        assert_eq!(thumb.debug.parameters.quality, lookup(id).unwrap().quality);
    }
}

#[test]
fn decode_reproduces_the_minimized_jpeg() {
    for (seed, (h, w)) in [(100, 200), (64, 48), (7, 300), (33, 33)].into_iter().enumerate() {
        let src = noise_png(h, w, seed as u64);
        for id in type_ids() {
            let thumb = encode(&src, id, 32, true).unwrap();
            let jpeg = decode(&thumb.payload).unwrap();
            assert_eq!(jpeg, thumb.debug.jpeg, "type {id}, {h}x{w}");
            assert_eq!(thumb.payload.len(), jpeg.len() - 589 + 5);
        }
    }
}

#[test]
fn decoded_jpeg_is_a_valid_image() {
    let src = quadrant_png(90, 60);
    let thumb = encode(&src, 3, 32, true).unwrap();
    let img = image::load_from_memory(&decode(&thumb.payload).unwrap()).unwrap();
    assert_eq!((img.width(), img.height()), (21, 32));

    // Bottom-right quadrant stays close to white.
    let px = img.to_rgb8().get_pixel(18, 29).0;
    assert!(px.iter().all(|&c| c > 160), "got {px:?}");
}

#[test]
fn small_sources_keep_their_size() {
    let src = noise_png(10, 12, 99);
    let thumb = encode(&src, 2, 32, true).unwrap();
    assert_eq!((thumb.debug.height, thumb.debug.width), (10, 12));
    assert_eq!(&thumb.payload[1..5], &[0, 10, 0, 12]);
}

#[test]
fn flipped_head_byte_is_caught_only_in_strict_mode() {
    let src = quadrant_png(40, 40);
    let thumb = encode(&src, 4, 32, true).unwrap();

    // Alter one luma quantization entry in an otherwise valid JPEG.
    let mut jpeg = thumb.debug.jpeg.clone();
    jpeg[10] ^= 0x01;
    assert!(matches!(
        tiny_thumb::encode_jpeg(&jpeg, 4, true),
        Err(ThumbError::HeaderMismatch { offset: 10, .. })
    ));

    let payload = tiny_thumb::encode_jpeg(&jpeg, 4, false).unwrap();
    let restored = decode(&payload).unwrap();
    assert_ne!(restored, jpeg);
    assert_eq!(restored, thumb.debug.jpeg);
}

#[test]
fn foreign_encoder_output_is_rejected_in_strict_mode() {
    let rgb = image::RgbImage::from_pixel(16, 16, image::Rgb([40, 80, 120]));
    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 7)
        .encode_image(&rgb)
        .unwrap();
    assert!(matches!(
        tiny_thumb::encode_jpeg(&jpeg, 1, true),
        Err(ThumbError::HeaderMismatch { .. })
    ));
}

#[test]
fn unknown_type_fails_before_image_work() {
    // Not an image at all: the type check must come first.
    assert!(matches!(encode(b"garbage", 0, 32, true), Err(ThumbError::UnknownType(0))));
    assert!(matches!(encode(b"garbage", 7, 32, true), Err(ThumbError::UnknownType(7))));
    assert!(matches!(decode(&[7, 0, 1, 0, 1, 0xFF, 0xD9]), Err(ThumbError::UnknownType(7))));
}

#[test]
fn grayscale_and_garbage_sources() {
    let gray = image::GrayImage::from_pixel(20, 20, image::Luma([128]));
    let mut buf = Cursor::new(Vec::new());
    gray.write_to(&mut buf, ImageFormat::Png).unwrap();
    assert!(matches!(
        encode(buf.get_ref(), 1, 32, true),
        Err(ThumbError::UnsupportedColorSpace(_))
    ));
    assert!(matches!(encode(b"garbage", 1, 32, true), Err(ThumbError::DecodeFailed(_))));
}

#[test]
fn short_payloads() {
    for len in 0..5 {
        let payload = vec![1u8; len];
        assert!(matches!(decode(&payload), Err(ThumbError::Truncated { len: l }) if l == len));
    }
}
