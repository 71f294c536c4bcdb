// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Export compositing.
//!
//! Builds the downloadable raster: the image area cropped out of the
//! padded display frame and rescaled, with both overlays re-projected
//! into export pixels. Pure with respect to its inputs, so composing
//! twice with unchanged state yields identical pixels.

use crate::models::editor::OverlayState;
use crate::util::geometry::fit_rect;
use crate::util::layout::{logo_layout, watermark_export_rect};
use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Compose the export raster.
///
/// `frame` is the display canvas size the overlay positions were
/// captured against; `scale` is the upscale factor. The output is sized
/// to the image area only - the letterbox padding never reaches the
/// file.
pub fn compose(
    source: &RgbaImage,
    watermark: &RgbaImage,
    fist: &RgbaImage,
    sun: &RgbaImage,
    overlays: &OverlayState,
    frame: (f32, f32),
    scale: f32,
) -> RgbaImage {
    let fit = fit_rect(
        source.width() as f32,
        source.height() as f32,
        frame.0,
        frame.1,
    );
    let out_w = (fit.draw_width * scale).round().max(1.0) as u32;
    let out_h = (fit.draw_height * scale).round().max(1.0) as u32;

    // The source stretches to fill the whole output; no background fill
    let mut out = imageops::resize(source, out_w, out_h, FilterType::Lanczos3);

    // Watermark: translated and scaled, culled when fully outside,
    // skipped while a drag is in flight
    if !overlays.is_dragging_watermark() {
        let wm_size = (watermark.width() as f32, watermark.height() as f32);
        if let Some((x, y, w, h)) = watermark_export_rect(
            overlays.watermark_pos,
            wm_size,
            &fit,
            scale,
            out_w as f32,
            out_h as f32,
        ) {
            let scaled = imageops::resize(
                watermark,
                (w.round() as u32).max(1),
                (h.round() as u32).max(1),
                FilterType::Triangle,
            );
            imageops::overlay(&mut out, &scaled, x.round() as i64, y.round() as i64);
        }
    }

    // Logo group: black backing, then both icons color-inverted so dark
    // glyphs render white-on-black
    let layout = logo_layout(
        &fit,
        out_w as f32,
        out_h as f32,
        overlays.logo_pos,
        overlays.logo_scale,
        scale,
        true,
    );
    fill_rect(
        &mut out,
        layout.bounds.x,
        layout.bounds.y,
        layout.bounds.width,
        layout.bounds.height,
        Rgba([0, 0, 0, 255]),
    );

    let icon_px = (layout.icon_size.round() as u32).max(1);
    for (icon, x) in [
        (fist, layout.x),
        (sun, layout.x + layout.icon_size + layout.spacing),
    ] {
        let mut scaled = imageops::resize(icon, icon_px, icon_px, FilterType::Triangle);
        imageops::invert(&mut scaled);
        imageops::overlay(&mut out, &scaled, x.round() as i64, layout.y.round() as i64);
    }

    out
}

/// Write the composite as a PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn fill_rect(target: &mut RgbaImage, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
    let x0 = x.round().max(0.0) as u32;
    let y0 = y.round().max(0.0) as u32;
    let x1 = ((x + w).round().max(0.0) as u32).min(target.width());
    let y1 = ((y + h).round().max(0.0) as u32).min(target.height());
    for py in y0..y1 {
        for px in x0..x1 {
            target.put_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::editor::DragState;

    fn solid(w: u32, h: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([value, value, value, 255]))
    }

    fn fixtures() -> (RgbaImage, RgbaImage, RgbaImage, RgbaImage) {
        (
            solid(16, 16, 255),  // white source
            solid(4, 4, 0),      // black watermark
            solid(2, 2, 20),     // dark icons
            solid(2, 2, 20),
        )
    }

    #[test]
    fn test_output_sized_to_image_area_times_scale() {
        let (source, wm, fist, sun) = fixtures();
        let overlays = OverlayState::default();
        // Square image in a 400x600 frame fits as 400x400
        let out = compose(&source, &wm, &fist, &sun, &overlays, (400.0, 600.0), 3.0);
        assert_eq!(out.dimensions(), (1200, 1200));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let (source, wm, fist, sun) = fixtures();
        let overlays = OverlayState {
            watermark_pos: (120.0, 220.0),
            logo_pos: Some((200.0, 300.0)),
            logo_scale: 1.4,
            ..OverlayState::default()
        };
        let a = compose(&source, &wm, &fist, &sun, &overlays, (400.0, 600.0), 3.0);
        let b = compose(&source, &wm, &fist, &sun, &overlays, (400.0, 600.0), 3.0);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_watermark_lands_at_reprojected_position() {
        let (source, wm, fist, sun) = fixtures();
        // Fit is {0, 100, 400, 400} for a square image; watermark at
        // (200, 300) must land at (200, 200) in a 1x export
        let overlays = OverlayState {
            watermark_pos: (200.0, 300.0),
            ..OverlayState::default()
        };
        let out = compose(&source, &wm, &fist, &sun, &overlays, (400.0, 600.0), 1.0);
        assert_eq!(out.get_pixel(201, 201), &Rgba([0, 0, 0, 255]));
        // Just outside the 4x4 watermark it is still the white source
        assert_eq!(out.get_pixel(210, 210), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_watermark_skipped_mid_drag() {
        let (source, wm, fist, sun) = fixtures();
        let overlays = OverlayState {
            watermark_pos: (200.0, 300.0),
            drag: DragState::DraggingWatermark {
                offset_x: 0.0,
                offset_y: 0.0,
            },
            ..OverlayState::default()
        };
        let out = compose(&source, &wm, &fist, &sun, &overlays, (400.0, 600.0), 1.0);
        assert_eq!(out.get_pixel(201, 201), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_default_watermark_culled_from_letterboxed_export() {
        let (_, wm, fist, sun) = fixtures();
        // Wide source: fit is {0, 187.5, 400, 225}; the default (50, 50)
        // watermark sits wholly in the letterbox band above the image
        let source = solid(32, 18, 255);
        let overlays = OverlayState::default();
        let out = compose(&source, &wm, &fist, &sun, &overlays, (400.0, 600.0), 1.0);
        assert_eq!(out.dimensions(), (400, 225));
        // Top-left region is untouched source, not watermark ink
        assert_eq!(out.get_pixel(51, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_logo_backing_black_and_icons_inverted() {
        let (source, wm, fist, sun) = fixtures();
        let overlays = OverlayState::default();
        let out = compose(&source, &wm, &fist, &sun, &overlays, (400.0, 600.0), 1.0);

        // Default layout for the 400x400 export: icons start at
        // (332, 366), backing at (327, 361)
        assert_eq!(out.get_pixel(328, 362), &Rgba([0, 0, 0, 255]));
        // Inside the first icon: dark glyph inverted to near-white
        assert!(out.get_pixel(340, 375)[0] > 200);
    }
}
