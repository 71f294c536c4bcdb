// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Inspiration gallery data structures.

/// One image extracted from an RSS feed item.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedImage {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source_name: String,
}

/// A gallery entry crossing the worker channel: feed metadata plus a
/// decoded thumbnail ready to become an egui texture.
pub struct GalleryItem {
    pub meta: FeedImage,
    pub thumb_width: u32,
    pub thumb_height: u32,
    pub thumb_pixels: Vec<u8>,
}
