// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar: image loading controls and export.

/// Result of toolbar interaction, executed by the app.
pub enum ToolbarAction {
    None,
    OpenFile,
    LoadUrl(String),
    FetchGallery,
    Export,
}

/// Display the toolbar row.
pub fn show(
    ui: &mut egui::Ui,
    url_field: &mut String,
    image_loaded: bool,
    loading: bool,
    fetching_gallery: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui
            .add_enabled(!loading, egui::Button::new("Open Image…"))
            .clicked()
        {
            action = ToolbarAction::OpenFile;
        }

        ui.separator();

        ui.label("URL:");
        let field = ui.add(
            egui::TextEdit::singleline(url_field)
                .hint_text("https://…")
                .desired_width(260.0),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let load_label = if loading { "Loading…" } else { "Load Image" };
        if ui
            .add_enabled(!loading, egui::Button::new(load_label))
            .clicked()
            || submitted
        {
            action = ToolbarAction::LoadUrl(url_field.trim().to_string());
        }

        ui.separator();

        let gallery_label = if fetching_gallery { "Loading…" } else { "Inspiration" };
        if ui
            .add_enabled(!fetching_gallery, egui::Button::new(gallery_label))
            .clicked()
        {
            action = ToolbarAction::FetchGallery;
        }

        ui.separator();

        if ui
            .add_enabled(image_loaded, egui::Button::new("Save PNG"))
            .clicked()
        {
            action = ToolbarAction::Export;
        }
    });

    action
}
