// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Letterbox geometry for the display canvas.
//!
//! This module computes where the loaded image actually lands inside the
//! fixed-size canvas frame, and clamps overlay positions to that area.

/// The rectangle within the canvas frame where the image is drawn.
///
/// The image is scaled uniformly to fit entirely inside the frame and
/// centered on whichever axis has leftover space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    pub offset_x: f32,
    pub offset_y: f32,
    pub draw_width: f32,
    pub draw_height: f32,
}

impl FitRect {
    /// Right edge of the image area.
    pub fn right(&self) -> f32 {
        self.offset_x + self.draw_width
    }

    /// Bottom edge of the image area.
    pub fn bottom(&self) -> f32 {
        self.offset_y + self.draw_height
    }
}

/// Compute the aspect-preserving, centered placement of an image inside
/// the canvas frame.
///
/// Dimensions must be nonzero; callers only reach this after a completed
/// image load, which guarantees that.
pub fn fit_rect(image_w: f32, image_h: f32, canvas_w: f32, canvas_h: f32) -> FitRect {
    let image_ratio = image_w / image_h;
    let canvas_ratio = canvas_w / canvas_h;

    if image_ratio > canvas_ratio {
        // Image is relatively wider - fill the width, letterbox top/bottom
        let draw_width = canvas_w;
        let draw_height = canvas_w / image_ratio;
        FitRect {
            offset_x: 0.0,
            offset_y: (canvas_h - draw_height) / 2.0,
            draw_width,
            draw_height,
        }
    } else {
        // Image is relatively taller - fill the height, letterbox left/right
        let draw_height = canvas_h;
        let draw_width = canvas_h * image_ratio;
        FitRect {
            offset_x: (canvas_w - draw_width) / 2.0,
            offset_y: 0.0,
            draw_width,
            draw_height,
        }
    }
}

/// Clamp an overlay's top-left corner so its full `size` bounding box
/// stays inside the image area on both axes.
pub fn clamp_to_fit(pos: (f32, f32), size: (f32, f32), fit: &FitRect) -> (f32, f32) {
    let x = pos.0.min(fit.right() - size.0).max(fit.offset_x);
    let y = pos.1.min(fit.bottom() - size.1).max(fit.offset_y);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_matching_aspect_fills_frame() {
        let fit = fit_rect(800.0, 1200.0, 400.0, 600.0);
        assert_eq!(fit.offset_x, 0.0);
        assert_eq!(fit.offset_y, 0.0);
        assert_eq!(fit.draw_width, 400.0);
        assert_eq!(fit.draw_height, 600.0);
    }

    #[test]
    fn test_wide_image_letterboxed_vertically() {
        let fit = fit_rect(1600.0, 900.0, 400.0, 600.0);
        assert_eq!(fit.offset_x, 0.0);
        assert!((fit.offset_y - 187.5).abs() < EPS);
        assert_eq!(fit.draw_width, 400.0);
        assert!((fit.draw_height - 225.0).abs() < EPS);
    }

    #[test]
    fn test_tall_image_letterboxed_horizontally() {
        let fit = fit_rect(600.0, 2400.0, 400.0, 600.0);
        assert_eq!(fit.offset_y, 0.0);
        assert!((fit.draw_width - 150.0).abs() < EPS);
        assert!((fit.offset_x - 125.0).abs() < EPS);
        assert_eq!(fit.draw_height, 600.0);
    }

    #[test]
    fn test_fit_preserves_aspect_and_stays_inside() {
        let cases = [
            (1920.0, 1080.0),
            (1080.0, 1920.0),
            (333.0, 777.0),
            (5000.0, 5000.0),
            (401.0, 600.0),
        ];
        for (w, h) in cases {
            let fit = fit_rect(w, h, 400.0, 600.0);
            assert!(fit.draw_width <= 400.0 + EPS);
            assert!(fit.draw_height <= 600.0 + EPS);
            let image_ratio = w / h;
            let fit_ratio = fit.draw_width / fit.draw_height;
            assert!(
                (image_ratio - fit_ratio).abs() < 1e-2,
                "aspect drifted for {w}x{h}: {image_ratio} vs {fit_ratio}"
            );
            // At most one axis is padded
            assert!(fit.offset_x.abs() < EPS || fit.offset_y.abs() < EPS);
        }
    }

    #[test]
    fn test_clamp_keeps_overlay_inside_image_area() {
        let fit = fit_rect(1600.0, 900.0, 400.0, 600.0);
        let size = (96.0, 32.0);

        // Far outside in every direction
        for pos in [(-500.0, -500.0), (900.0, 900.0), (-10.0, 900.0), (900.0, -10.0)] {
            let (x, y) = clamp_to_fit(pos, size, &fit);
            assert!(x >= fit.offset_x);
            assert!(y >= fit.offset_y);
            assert!(x + size.0 <= fit.right() + EPS);
            assert!(y + size.1 <= fit.bottom() + EPS);
        }

        // Already inside stays put
        let inside = (50.0, 200.0);
        assert_eq!(clamp_to_fit(inside, size, &fit), inside);
    }
}
