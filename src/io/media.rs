// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Image decoding for uploads, URLs, and embedded assets.
//!
//! Everything is converted to RGBA8 so the display texture and the
//! export compositor share one pixel format.

use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::Path;

/// A decoded raster ready for texture upload and compositing.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub image: RgbaImage,
}

impl LoadedImage {
    fn from_rgba(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            image,
        }
    }
}

/// Decode an image file from disk.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    Ok(LoadedImage::from_rgba(image))
}

/// Decode an image from an in-memory byte buffer (embedded assets,
/// fetched URL bodies).
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<LoadedImage> {
    let image = image::load_from_memory(bytes)
        .context("failed to decode image data")?
        .to_rgba8();
    Ok(LoadedImage::from_rgba(image))
}

/// Fetch and decode an image over HTTP. Blocking; run on a worker
/// thread.
pub fn load_image_from_url(url: &str) -> Result<LoadedImage> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("server rejected {url}"))?;
    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read body of {url}"))?;
    load_image_from_bytes(&bytes)
}
