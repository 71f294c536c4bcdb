// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Overlay state and the drag/scale state machine.
//!
//! All transitions are pure mutations driven by pointer, wheel, and key
//! events; the canvas translates egui input into these calls and redraws
//! on the next frame.

use crate::util::geometry::{clamp_to_fit, FitRect};
use crate::util::layout::{
    Bounds, LOGO_SCALE_MAX, LOGO_SCALE_MIN, LOGO_SCALE_STEP, WATERMARK_DEFAULT_POS,
};

/// Transient drag interaction, alive between pointer-down and pointer-up.
///
/// Offsets are the grab point within the overlay, so the overlay doesn't
/// jump under the pointer when the drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    DraggingWatermark { offset_x: f32, offset_y: f32 },
    DraggingLogo { offset_x: f32, offset_y: f32 },
}

/// Positions and scale of the two overlays, plus interaction flags.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    /// Watermark top-left in canvas coordinates. The default is absolute
    /// canvas space and may sit in the letterbox until first dragged.
    pub watermark_pos: (f32, f32),
    /// Logo position; `None` means the computed bottom-right default.
    pub logo_pos: Option<(f32, f32)>,
    /// Shared scale for both logo icons.
    pub logo_scale: f32,
    /// Hit box cached by the last draw; single source of truth for
    /// "is the pointer over the logo".
    pub logo_bounds: Option<Bounds>,
    /// Set on grab, persists after release for keyboard scaling until a
    /// click lands elsewhere.
    pub logo_selected: bool,
    pub drag: DragState,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            watermark_pos: WATERMARK_DEFAULT_POS,
            logo_pos: None,
            logo_scale: 1.0,
            logo_bounds: None,
            logo_selected: false,
            drag: DragState::Idle,
        }
    }
}

impl OverlayState {
    pub fn is_dragging_watermark(&self) -> bool {
        matches!(self.drag, DragState::DraggingWatermark { .. })
    }

    pub fn is_dragging_logo(&self) -> bool {
        matches!(self.drag, DragState::DraggingLogo { .. })
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.drag, DragState::Idle)
    }

    /// True when the pointer is inside the cached logo hit box.
    pub fn is_over_logo(&self, x: f32, y: f32) -> bool {
        self.logo_bounds.is_some_and(|b| b.contains(x, y))
    }

    /// Pointer-down in canvas coordinates. The watermark sits above the
    /// logo, so it wins where they overlap. Returns true if an overlay
    /// was grabbed.
    pub fn pointer_down(&mut self, pos: (f32, f32), watermark_rect: Bounds) -> bool {
        if watermark_rect.contains(pos.0, pos.1) {
            self.drag = DragState::DraggingWatermark {
                offset_x: pos.0 - watermark_rect.x,
                offset_y: pos.1 - watermark_rect.y,
            };
            return true;
        }

        if let Some(bounds) = self.logo_bounds {
            if bounds.contains(pos.0, pos.1) {
                self.drag = DragState::DraggingLogo {
                    offset_x: pos.0 - bounds.x,
                    offset_y: pos.1 - bounds.y,
                };
                self.logo_selected = true;
                // First grab pins the default placement as a custom one
                if self.logo_pos.is_none() {
                    self.logo_pos = Some((bounds.x, bounds.y));
                }
                return true;
            }
        }

        // Click elsewhere drops the keyboard-scaling selection
        self.logo_selected = false;
        false
    }

    /// Pointer-move while dragging; the dragged overlay follows the
    /// pointer minus the grab offset, clamped to the image area.
    /// Returns true if a position changed.
    pub fn pointer_moved(
        &mut self,
        pos: (f32, f32),
        fit: &FitRect,
        watermark_size: (f32, f32),
    ) -> bool {
        match self.drag {
            DragState::DraggingWatermark { offset_x, offset_y } => {
                let raw = (pos.0 - offset_x, pos.1 - offset_y);
                self.watermark_pos = clamp_to_fit(raw, watermark_size, fit);
                true
            }
            DragState::DraggingLogo { offset_x, offset_y } => {
                let Some(bounds) = self.logo_bounds else {
                    return false;
                };
                let raw = (pos.0 - offset_x, pos.1 - offset_y);
                self.logo_pos = Some(clamp_to_fit(raw, (bounds.width, bounds.height), fit));
                true
            }
            DragState::Idle => false,
        }
    }

    /// Pointer-up ends any drag; logo selection persists for keyboard
    /// scaling. Returns true if a drag was in progress.
    pub fn pointer_up(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.drag = DragState::Idle;
        was_dragging
    }

    /// Step the logo scale by whole increments (positive grows), clamped
    /// to the allowed range.
    pub fn step_logo_scale(&mut self, steps: i32) {
        self.logo_scale =
            (self.logo_scale + steps as f32 * LOGO_SCALE_STEP).clamp(LOGO_SCALE_MIN, LOGO_SCALE_MAX);
    }

    pub fn reset_logo_scale(&mut self) {
        self.logo_scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::fit_rect;
    use crate::util::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};

    const EPS: f32 = 1e-4;

    fn watermark_rect() -> Bounds {
        Bounds {
            x: 50.0,
            y: 50.0,
            width: 96.0,
            height: 32.0,
        }
    }

    fn logo_bounds() -> Bounds {
        Bounds {
            x: 300.0,
            y: 500.0,
            width: 68.0,
            height: 34.0,
        }
    }

    #[test]
    fn test_grab_watermark_records_offset() {
        let mut state = OverlayState::default();
        assert!(state.pointer_down((60.0, 58.0), watermark_rect()));
        assert_eq!(
            state.drag,
            DragState::DraggingWatermark {
                offset_x: 10.0,
                offset_y: 8.0
            }
        );
    }

    #[test]
    fn test_drag_watermark_follows_pointer_clamped() {
        let fit = fit_rect(800.0, 1200.0, CANVAS_WIDTH, CANVAS_HEIGHT);
        let size = (96.0, 32.0);
        let mut state = OverlayState::default();
        state.pointer_down((60.0, 58.0), watermark_rect());

        assert!(state.pointer_moved((210.0, 308.0), &fit, size));
        assert_eq!(state.watermark_pos, (200.0, 300.0));

        // Way off-canvas pointer pins the watermark to the image edge
        state.pointer_moved((-500.0, 5000.0), &fit, size);
        let (x, y) = state.watermark_pos;
        assert_eq!(x, fit.offset_x);
        assert!((y - (fit.bottom() - size.1)).abs() < EPS);

        assert!(state.pointer_up());
        assert_eq!(state.drag, DragState::Idle);
    }

    #[test]
    fn test_grab_logo_selects_and_pins_default_position() {
        let mut state = OverlayState {
            logo_bounds: Some(logo_bounds()),
            ..OverlayState::default()
        };
        assert!(state.pointer_down((310.0, 510.0), logo_bounds()));
        assert!(state.is_dragging_logo());
        assert!(state.logo_selected);
        assert_eq!(state.logo_pos, Some((300.0, 500.0)));
    }

    #[test]
    fn test_logo_drag_clamps_to_image_area() {
        let fit = fit_rect(1600.0, 900.0, CANVAS_WIDTH, CANVAS_HEIGHT);
        let bounds = Bounds {
            x: 100.0,
            y: 200.0,
            width: 68.0,
            height: 34.0,
        };
        let mut state = OverlayState {
            logo_bounds: Some(bounds),
            ..OverlayState::default()
        };
        state.pointer_down((110.0, 210.0), watermark_rect_far_away());

        state.pointer_moved((1000.0, -1000.0), &fit, (96.0, 32.0));
        let (x, y) = state.logo_pos.expect("drag must store a position");
        assert!((x - (fit.right() - bounds.width)).abs() < EPS);
        assert_eq!(y, fit.offset_y);
    }

    fn watermark_rect_far_away() -> Bounds {
        Bounds {
            x: -1000.0,
            y: -1000.0,
            width: 1.0,
            height: 1.0,
        }
    }

    #[test]
    fn test_click_elsewhere_clears_selection_but_not_position() {
        let mut state = OverlayState {
            logo_bounds: Some(logo_bounds()),
            ..OverlayState::default()
        };
        state.pointer_down((310.0, 510.0), watermark_rect_far_away());
        state.pointer_up();
        assert!(state.logo_selected);

        assert!(!state.pointer_down((10.0, 10.0), watermark_rect_far_away()));
        assert!(!state.logo_selected);
        assert!(state.logo_pos.is_some());
    }

    #[test]
    fn test_scale_steps_and_clamps() {
        let mut state = OverlayState::default();

        for _ in 0..10 {
            state.step_logo_scale(1);
        }
        assert!((state.logo_scale - 2.0).abs() < EPS);

        for _ in 0..20 {
            state.step_logo_scale(1);
        }
        assert_eq!(state.logo_scale, LOGO_SCALE_MAX);

        state.reset_logo_scale();
        assert_eq!(state.logo_scale, 1.0);

        for _ in 0..10 {
            state.step_logo_scale(-1);
        }
        assert_eq!(state.logo_scale, LOGO_SCALE_MIN);
    }

    #[test]
    fn test_moves_ignored_when_idle() {
        let fit = fit_rect(800.0, 1200.0, CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut state = OverlayState::default();
        assert!(!state.pointer_moved((200.0, 200.0), &fit, (96.0, 32.0)));
        assert_eq!(state.watermark_pos, WATERMARK_DEFAULT_POS);
    }
}
