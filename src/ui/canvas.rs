// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Display canvas: letterboxed image, overlays, and drag handling.
//!
//! The canvas is a fixed 400x600 surface regardless of the loaded
//! image's aspect ratio. Overlay drawing shares the layout math with the
//! export compositor so what you drag is what you download.

use crate::models::editor::OverlayState;
use crate::util::geometry::fit_rect;
use crate::util::layout::{logo_layout, Bounds, CANVAS_HEIGHT, CANVAS_WIDTH};

const DASH_LENGTH: f32 = 5.0;
const GAP_LENGTH: f32 = 5.0;

/// Draw the canvas and translate pointer/wheel input into overlay state
/// transitions.
#[allow(clippy::too_many_arguments)]
pub fn show(
    ui: &mut egui::Ui,
    image_texture: Option<&egui::TextureHandle>,
    image_size: Option<(u32, u32)>,
    watermark_texture: &egui::TextureHandle,
    fist_texture: &egui::TextureHandle,
    sun_texture: &egui::TextureHandle,
    overlays: &mut OverlayState,
) {
    ui.vertical_centered(|ui| {
        let (canvas_rect, _response) = ui.allocate_exact_size(
            egui::vec2(CANVAS_WIDTH, CANVAS_HEIGHT),
            egui::Sense::click_and_drag(),
        );
        let painter = ui.painter_at(canvas_rect);

        // Background fills the whole padded frame
        painter.rect_filled(canvas_rect, 0.0, egui::Color32::BLACK);

        let (Some(texture), Some((img_w, img_h))) = (image_texture, image_size) else {
            painter.text(
                canvas_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Load an image to begin",
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(180),
            );
            return;
        };

        let fit = fit_rect(img_w as f32, img_h as f32, CANVAS_WIDTH, CANVAS_HEIGHT);
        let image_rect = egui::Rect::from_min_size(
            canvas_rect.min + egui::vec2(fit.offset_x, fit.offset_y),
            egui::vec2(fit.draw_width, fit.draw_height),
        );
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        painter.image(texture.id(), image_rect, uv, egui::Color32::WHITE);

        // Watermark at its raw canvas position, native size
        let wm_size = watermark_texture.size_vec2();
        let watermark_rect = egui::Rect::from_min_size(
            canvas_rect.min + egui::vec2(overlays.watermark_pos.0, overlays.watermark_pos.1),
            wm_size,
        );
        painter.image(watermark_texture.id(), watermark_rect, uv, egui::Color32::WHITE);
        if overlays.is_dragging_watermark() {
            dashed_rect(&painter, watermark_rect);
        }

        // Logo group; the cached bounds are the hit box for all logo
        // interactions until the next draw
        let layout = logo_layout(
            &fit,
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            overlays.logo_pos,
            overlays.logo_scale,
            1.0,
            false,
        );
        overlays.logo_bounds = Some(layout.bounds);

        let backing = egui::Rect::from_min_size(
            canvas_rect.min + egui::vec2(layout.bounds.x, layout.bounds.y),
            egui::vec2(layout.bounds.width, layout.bounds.height),
        );
        painter.rect_filled(backing, 0.0, egui::Color32::BLACK);

        // Icon textures are pre-inverted at load, the display analogue
        // of the export compositor's invert pass
        for (icon, x) in [
            (fist_texture, layout.x),
            (sun_texture, layout.x + layout.icon_size + layout.spacing),
        ] {
            let icon_rect = egui::Rect::from_min_size(
                canvas_rect.min + egui::vec2(x, layout.y),
                egui::vec2(layout.icon_size, layout.icon_size),
            );
            painter.image(icon.id(), icon_rect, uv, egui::Color32::WHITE);
        }
        if overlays.is_dragging_logo() {
            dashed_rect(&painter, backing);
        }

        handle_input(
            ui,
            canvas_rect,
            watermark_rect,
            &fit,
            (wm_size.x, wm_size.y),
            overlays,
        );
    });
}

fn handle_input(
    ui: &egui::Ui,
    canvas_rect: egui::Rect,
    watermark_rect: egui::Rect,
    fit: &crate::util::geometry::FitRect,
    watermark_size: (f32, f32),
    overlays: &mut OverlayState,
) {
    let (pointer, pressed, released, scroll_y) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.raw_scroll_delta.y,
        )
    });

    let local = pointer.map(|p| (p.x - canvas_rect.min.x, p.y - canvas_rect.min.y));
    let watermark_bounds = Bounds {
        x: watermark_rect.min.x - canvas_rect.min.x,
        y: watermark_rect.min.y - canvas_rect.min.y,
        width: watermark_rect.width(),
        height: watermark_rect.height(),
    };

    if let Some(local) = local {
        if pressed && pointer.is_some_and(|p| canvas_rect.contains(p)) {
            overlays.pointer_down(local, watermark_bounds);
        }

        // Moves are tracked even when the pointer leaves the canvas;
        // clamping keeps the overlay inside the image area
        if overlays.is_dragging() {
            overlays.pointer_moved(local, fit, watermark_size);
        }

        // Wheel over the logo adjusts its scale
        if scroll_y != 0.0 && overlays.is_over_logo(local.0, local.1) {
            overlays.step_logo_scale(if scroll_y > 0.0 { 1 } else { -1 });
        }

        let hovering = watermark_bounds.contains(local.0, local.1)
            || overlays.is_over_logo(local.0, local.1);
        if overlays.is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if hovering && pointer.is_some_and(|p| canvas_rect.contains(p)) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }

    if released {
        overlays.pointer_up();
    }
}

/// White dashed selection border, the drag feedback for both overlays.
fn dashed_rect(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(2.0, egui::Color32::WHITE);
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(egui::Shape::dashed_line(
        &corners,
        stroke,
        DASH_LENGTH,
        GAP_LENGTH,
    ));
}
