// Shared test helpers for mock-server and sheet fixtures.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::{Cursor, Write};

use image::{ImageBuffer, ImageFormat, Rgb};
use tempfile::NamedTempFile;

use img_curate::Config;

/// Encodes a solid PNG of the given size.
#[allow(dead_code)] // Used by other test files
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, Rgb([20, 120, 220]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode PNG fixture");
    buf.into_inner()
}

/// Config for talking to a local mock server: no browser, short delays.
#[allow(dead_code)]
pub fn mock_config() -> Config {
    Config {
        render_fallback: false,
        retry_delay_ms: 20,
        page_timeout_seconds: 5,
        image_timeout_seconds: 5,
        pool_size: 4,
        ..Default::default()
    }
}

/// Writes `contents` to a temporary CSV file.
#[allow(dead_code)]
pub fn sheet_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp sheet");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp sheet");
    file
}
