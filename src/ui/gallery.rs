// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Inspiration gallery side panel.
//!
//! Thumbnails fetched from the RSS feeds; clicking one loads the full
//! image through the same URL path as the toolbar field.

use crate::models::gallery::FeedImage;

/// A gallery entry ready for display.
pub struct GalleryEntry {
    pub meta: FeedImage,
    pub texture: egui::TextureHandle,
}

/// Result of gallery interaction.
pub enum GalleryAction {
    None,
    LoadImage(String),
}

/// Display the gallery panel contents.
pub fn show(
    ui: &mut egui::Ui,
    entries: &[GalleryEntry],
    fetching: bool,
    error: Option<&str>,
) -> GalleryAction {
    let mut action = GalleryAction::None;

    ui.heading("Inspiration");
    ui.separator();

    if fetching {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Fetching latest images…");
        });
        return action;
    }

    if let Some(message) = error {
        ui.label(
            egui::RichText::new(message)
                .color(ui.visuals().warn_fg_color)
                .italics(),
        );
        return action;
    }

    if entries.is_empty() {
        ui.label(
            egui::RichText::new("Press Inspiration to fetch images from the news feeds.")
                .weak(),
        );
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for entry in entries {
            let size = entry.texture.size_vec2();
            let thumb = ui.add(
                egui::Image::new((entry.texture.id(), size))
                    .sense(egui::Sense::click()),
            );
            if thumb.clicked() {
                action = GalleryAction::LoadImage(entry.meta.image_url.clone());
            }
            thumb.on_hover_text(&entry.meta.description);

            ui.label(
                egui::RichText::new(&entry.meta.source_name)
                    .small()
                    .strong(),
            );
            ui.label(egui::RichText::new(&entry.meta.title).small());
            ui.add_space(8.0);
        }
    });

    action
}
