// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay placement.
//!
//! Shared by the on-screen canvas and the export compositor so a
//! watermark or logo dragged on screen lands in the equivalent relative
//! spot on the cropped, rescaled export.

use crate::util::geometry::FitRect;

/// Fixed display frame, independent of the loaded image's aspect ratio.
pub const CANVAS_WIDTH: f32 = 400.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Watermark default is in absolute canvas coordinates, not relative to
/// the image area, so it can sit in the letterbox until first dragged.
pub const WATERMARK_DEFAULT_POS: (f32, f32) = (50.0, 50.0);

/// Logo metrics at display scale; all grow linearly on export.
pub const LOGO_ICON_SIZE: f32 = 24.0;
pub const LOGO_PADDING: f32 = 10.0;
pub const LOGO_SPACING: f32 = 10.0;
pub const LOGO_BG_PADDING: f32 = 5.0;

pub const LOGO_SCALE_STEP: f32 = 0.1;
pub const LOGO_SCALE_MIN: f32 = 0.3;
pub const LOGO_SCALE_MAX: f32 = 3.0;

/// Upscale factor applied when saving the composite.
pub const EXPORT_SCALE: f32 = 3.0;

/// An axis-aligned hit box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Resolved placement of the two-icon logo group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoLayout {
    /// Top-left of the first icon.
    pub x: f32,
    pub y: f32,
    pub icon_size: f32,
    pub spacing: f32,
    pub bg_padding: f32,
    /// Backing rectangle, also the hit box for drag and scroll.
    pub bounds: Bounds,
}

/// Compute where the logo group is drawn.
///
/// `factor` is 1 for display and the upscale factor for export;
/// `user_scale` is the wheel/keyboard-adjusted logo scale. `target_w`/
/// `target_h` are the dimensions of the surface being drawn to (the
/// padded frame for display, the cropped image area for export).
pub fn logo_layout(
    fit: &FitRect,
    target_w: f32,
    target_h: f32,
    custom_pos: Option<(f32, f32)>,
    user_scale: f32,
    factor: f32,
    for_export: bool,
) -> LogoLayout {
    let icon_size = LOGO_ICON_SIZE * user_scale * factor;
    let padding = LOGO_PADDING * factor;
    let spacing = LOGO_SPACING * factor;
    let bg_padding = LOGO_BG_PADDING * factor;

    let (x, y) = match (for_export, custom_pos) {
        (true, Some((cx, cy))) => {
            // Re-project the stored canvas-space position into the image
            // area's local space, then scale into export pixels.
            ((cx - fit.offset_x) * factor, (cy - fit.offset_y) * factor)
        }
        (true, None) => (
            target_w - padding - icon_size * 2.0 - spacing,
            target_h - padding - icon_size,
        ),
        (false, Some(pos)) => pos,
        (false, None) => (
            fit.offset_x + fit.draw_width - padding - icon_size * 2.0 - spacing,
            fit.offset_y + fit.draw_height - padding - icon_size,
        ),
    };

    LogoLayout {
        x,
        y,
        icon_size,
        spacing,
        bg_padding,
        bounds: Bounds {
            x: x - bg_padding,
            y: y - bg_padding,
            width: icon_size * 2.0 + spacing + bg_padding * 2.0,
            height: icon_size + bg_padding * 2.0,
        },
    }
}

/// Watermark placement on the export surface, or `None` when its scaled
/// bounds fall entirely outside the frame.
pub fn watermark_export_rect(
    pos: (f32, f32),
    size: (f32, f32),
    fit: &FitRect,
    factor: f32,
    target_w: f32,
    target_h: f32,
) -> Option<(f32, f32, f32, f32)> {
    let x = (pos.0 - fit.offset_x) * factor;
    let y = (pos.1 - fit.offset_y) * factor;
    let w = size.0 * factor;
    let h = size.1 * factor;

    let visible = x + w > 0.0 && x < target_w && y + h > 0.0 && y < target_h;
    visible.then_some((x, y, w, h))
}
