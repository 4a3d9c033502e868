// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: turn an image into a tiny thumbnail payload and back.
use std::fs;

use base64::{engine::general_purpose::STANDARD, Engine};
use tiny_thumb::{DEFAULT_MAX_DIMENSION, DEFAULT_TYPE_ID};

fn usage() -> ! {
    eprintln!("Usage: tiny_thumb <image> [-t type] [-d max_dimension] [-o out.jpg] [--no-checks]");
    eprintln!("       tiny_thumb --decode <payload-file> <out.jpg>");
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    if args[1] == "--decode" {
        if args.len() < 4 {
            usage();
        }
        let raw = fs::read(&args[2]).expect("Could not read payload file");
        // Accept either the base64 text printed by the encoder or raw bytes.
        let payload = std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| STANDARD.decode(s.trim()).ok())
            .unwrap_or(raw);
        match tiny_thumb::decode(&payload) {
            Ok(jpeg) => {
                fs::write(&args[3], &jpeg).expect("Could not write output");
                println!("JPEG written to: {} ({} bytes)", args[3], jpeg.len());
            }
            Err(e) => {
                eprintln!("Decode failed: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut type_id = DEFAULT_TYPE_ID;
    let mut max_dimension = DEFAULT_MAX_DIMENSION;
    let mut out_path = None;
    let mut strict = true;
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-t" => type_id = rest.next().and_then(|v| v.parse().ok()).unwrap_or_else(|| usage()),
            "-d" => max_dimension = rest.next().and_then(|v| v.parse().ok()).unwrap_or_else(|| usage()),
            "-o" => out_path = Some(rest.next().unwrap_or_else(|| usage()).clone()),
            "--no-checks" => strict = false,
            _ => usage(),
        }
    }

    let source = fs::read(&args[1]).expect("Could not read image");
    let thumb = match tiny_thumb::encode(&source, type_id, max_dimension, strict) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Encode failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Payload: {}", STANDARD.encode(&thumb.payload));
    println!("Type: {} (quality {})", type_id, thumb.debug.parameters.quality);
    println!("Size: {}x{} (max {})", thumb.debug.width, thumb.debug.height, thumb.debug.max_dimension);
    println!("Head: {}", STANDARD.encode(&thumb.debug.parameters.head));
    println!("Dimension offset: {}", thumb.debug.parameters.dimension_offset);
    println!("Source: {} bytes, JPEG: {} bytes, payload: {} bytes",
        source.len(), thumb.debug.jpeg.len(), thumb.debug.payload_len);

    if let Some(path) = out_path {
        fs::write(&path, &thumb.debug.jpeg).expect("Could not write output");
        println!("JPEG written to: {}", path);
    }
}
