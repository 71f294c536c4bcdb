// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! Owns the loaded image, the overlay state, and the background loaders,
//! and coordinates the toolbar, gallery, and canvas components.

use crate::io::{export, feed, media};
use crate::models::editor::OverlayState;
use crate::models::gallery::GalleryItem;
use crate::ui::gallery::{self, GalleryAction, GalleryEntry};
use crate::ui::canvas;
use crate::ui::toolbar::{self, ToolbarAction};
use crate::util::layout::{CANVAS_HEIGHT, CANVAS_WIDTH, EXPORT_SCALE};
use anyhow::{Context, Result};
use image::imageops;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

const WATERMARK_PNG: &[u8] = include_bytes!("../assets/watermark.png");
const FIST_PNG: &[u8] = include_bytes!("../assets/fist.png");
const SUN_PNG: &[u8] = include_bytes!("../assets/sun.png");

/// Default filename offered by the save dialog.
const EXPORT_FILENAME: &str = "watermarked-image.png";

/// Result of background image loading, tagged with the load generation
/// so completions of replaced loads are discarded.
type LoadResult = (u64, Result<media::LoadedImage, String>);

/// Main application state.
pub struct ImprintApp {
    /// Overlay positions, scale, and drag state
    overlays: OverlayState,

    /// Currently loaded source image, kept for export compositing
    source: Option<RgbaImage>,
    /// Display texture of the source image
    image_texture: Option<egui::TextureHandle>,
    /// Source image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Embedded overlay rasters (icons kept dark; export inverts them)
    watermark: RgbaImage,
    fist: RgbaImage,
    sun: RgbaImage,
    /// Display textures; icons pre-inverted so they render white
    watermark_texture: egui::TextureHandle,
    fist_texture: egui::TextureHandle,
    sun_texture: egui::TextureHandle,

    /// URL field contents
    url_field: String,
    /// Error/status line under the canvas
    status: Option<String>,

    /// Monotonic load token; stale completions are dropped
    load_generation: u64,
    /// Receiver for background image loading
    image_loader: Option<Receiver<LoadResult>>,
    loading_message: Option<String>,

    /// Receiver for the background gallery fetch
    gallery_loader: Option<Receiver<Result<Vec<GalleryItem>, String>>>,
    gallery_entries: Vec<GalleryEntry>,
    gallery_error: Option<String>,
    /// Panel stays hidden until the first fetch is requested
    gallery_opened: bool,
}

impl ImprintApp {
    /// Create the application, decoding the embedded overlay assets.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let watermark = media::load_image_from_bytes(WATERMARK_PNG)
            .context("embedded watermark asset")?
            .image;
        let fist = media::load_image_from_bytes(FIST_PNG)
            .context("embedded fist icon")?
            .image;
        let sun = media::load_image_from_bytes(SUN_PNG)
            .context("embedded sun icon")?
            .image;

        let watermark_texture = load_texture(&cc.egui_ctx, "watermark", &watermark);
        let mut fist_display = fist.clone();
        imageops::invert(&mut fist_display);
        let fist_texture = load_texture(&cc.egui_ctx, "logo_fist", &fist_display);
        let mut sun_display = sun.clone();
        imageops::invert(&mut sun_display);
        let sun_texture = load_texture(&cc.egui_ctx, "logo_sun", &sun_display);

        Ok(Self {
            overlays: OverlayState::default(),
            source: None,
            image_texture: None,
            image_size: None,
            watermark,
            fist,
            sun,
            watermark_texture,
            fist_texture,
            sun_texture,
            url_field: String::new(),
            status: None,
            load_generation: 0,
            image_loader: None,
            loading_message: None,
            gallery_loader: None,
            gallery_entries: Vec::new(),
            gallery_error: None,
            gallery_opened: false,
        })
    }

    /// Start a background image load; any in-flight load becomes stale.
    fn spawn_image_load<F>(&mut self, message: &str, job: F)
    where
        F: FnOnce() -> Result<media::LoadedImage, String> + Send + 'static,
    {
        self.load_generation += 1;
        let generation = self.load_generation;

        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(message.to_string());
        self.status = None;

        std::thread::spawn(move || {
            let _ = sender.send((generation, job()));
        });
    }

    /// Load an image file from disk (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        self.spawn_image_load("Loading image…", move || {
            media::load_image(&path).map_err(|e| format!("Failed to load image: {e:#}"))
        });
    }

    /// Fetch and load an image by URL (asynchronously).
    pub fn load_image_url(&mut self, url: String) {
        self.spawn_image_load("Loading image…", move || {
            media::load_image_from_url(&url)
                .map_err(|e| format!("Failed to load image. Please check the URL and try again. ({e:#})"))
        });
    }

    /// Fetch the inspiration gallery (asynchronously).
    fn fetch_gallery(&mut self) {
        let (sender, receiver) = channel();
        self.gallery_loader = Some(receiver);
        self.gallery_error = None;
        self.gallery_opened = true;

        std::thread::spawn(move || {
            let result = (|| -> Result<Vec<GalleryItem>, String> {
                let images = feed::fetch_feed_images();
                let mut items = Vec::new();
                for meta in images {
                    // Item-level failures hide the item, nothing more
                    match media::load_image_from_url(&meta.image_url) {
                        Ok(loaded) => {
                            let thumb_w = 200u32.min(loaded.width.max(1));
                            let thumb_h = ((thumb_w as u64 * loaded.height as u64)
                                / loaded.width.max(1) as u64)
                                .max(1) as u32;
                            let thumb = imageops::thumbnail(&loaded.image, thumb_w, thumb_h);
                            items.push(GalleryItem {
                                meta,
                                thumb_width: thumb.width(),
                                thumb_height: thumb.height(),
                                thumb_pixels: thumb.into_raw(),
                            });
                        }
                        Err(e) => log::warn!("skipping gallery image: {e:#}"),
                    }
                }
                Ok(items)
            })();
            let _ = sender.send(result);
        });
    }

    /// Compose and save the export PNG at the fixed upscale factor.
    fn export_image(&mut self) {
        let Some(source) = self.source.as_ref() else {
            self.status = Some("Please load an image first".to_string());
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(EXPORT_FILENAME)
            .save_file()
        else {
            return;
        };

        let composite = export::compose(
            source,
            &self.watermark,
            &self.fist,
            &self.sun,
            &self.overlays,
            (CANVAS_WIDTH, CANVAS_HEIGHT),
            EXPORT_SCALE,
        );
        match export::save_png(&composite, &path) {
            Ok(()) => {
                log::info!("exported composite to {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                self.status = Some(format!("Download failed: {e:#}"));
            }
        }
    }

    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = self.image_loader.as_ref() else {
            return;
        };
        let Ok((generation, result)) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        // A newer load replaced this one while it was in flight
        if generation != self.load_generation {
            log::debug!("dropping stale load completion (token {generation})");
            return;
        }

        match result {
            Ok(loaded) => {
                self.image_texture = Some(load_texture(ctx, "loaded_image", &loaded.image));
                self.image_size = Some((loaded.width, loaded.height));
                log::info!("loaded image ({}x{})", loaded.width, loaded.height);
                self.source = Some(loaded.image);
            }
            Err(e) => {
                log::error!("{e}");
                self.status = Some(e);
            }
        }
    }

    fn poll_gallery_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = self.gallery_loader.as_ref() else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.gallery_loader = None;

        match result {
            Ok(items) if items.is_empty() => {
                self.gallery_entries.clear();
                self.gallery_error =
                    Some("No images found in the feeds. Please try again later.".to_string());
            }
            Ok(items) => {
                self.gallery_entries = items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(
                            [item.thumb_width as usize, item.thumb_height as usize],
                            &item.thumb_pixels,
                        );
                        GalleryEntry {
                            meta: item.meta,
                            texture: ctx.load_texture(
                                format!("gallery_thumb_{i}"),
                                color_image,
                                egui::TextureOptions::LINEAR,
                            ),
                        }
                    })
                    .collect();
                log::info!("gallery ready with {} entries", self.gallery_entries.len());
            }
            Err(e) => {
                log::error!("gallery fetch failed: {e}");
                self.gallery_entries.clear();
                self.gallery_error = Some("Failed to load news images.".to_string());
            }
        }
    }

    fn handle_scale_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || !self.overlays.logo_selected {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                self.overlays.step_logo_scale(1);
            }
            if i.key_pressed(egui::Key::Minus) {
                self.overlays.step_logo_scale(-1);
            }
            if i.key_pressed(egui::Key::Num0) {
                self.overlays.reset_logo_scale();
            }
        });
    }
}

impl eframe::App for ImprintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.poll_gallery_loader(ctx);

        // Keep polling while background work is in flight
        if self.loading_message.is_some() || self.gallery_loader.is_some() {
            ctx.request_repaint();
        }

        self.handle_scale_keys(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image…").clicked() {
                        if let Some(path) = image_file_dialog() {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    let loaded = self.source.is_some();
                    if ui.add_enabled(loaded, egui::Button::new("Save PNG…")).clicked() {
                        self.export_image();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    &mut self.url_field,
                    self.source.is_some(),
                    self.loading_message.is_some(),
                    self.gallery_loader.is_some(),
                )
            })
            .inner;

        match toolbar_action {
            ToolbarAction::OpenFile => {
                if let Some(path) = image_file_dialog() {
                    self.load_image_file(path);
                }
            }
            ToolbarAction::LoadUrl(url) => {
                if url.is_empty() {
                    self.status = Some("Please enter an image URL".to_string());
                } else {
                    self.load_image_url(url);
                }
            }
            ToolbarAction::FetchGallery => self.fetch_gallery(),
            ToolbarAction::Export => self.export_image(),
            ToolbarAction::None => {}
        }

        // Gallery panel (right side), shown once requested
        if self.gallery_opened {
            let gallery_action = egui::SidePanel::right("gallery")
                .default_width(240.0)
                .show(ctx, |ui| {
                    gallery::show(
                        ui,
                        &self.gallery_entries,
                        self.gallery_loader.is_some(),
                        self.gallery_error.as_deref(),
                    )
                })
                .inner;
            if let GalleryAction::LoadImage(url) = gallery_action {
                self.load_image_url(url);
            }
        }

        // Main canvas (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref message) = self.loading_message {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(10.0);
                        ui.label(
                            egui::RichText::new(message)
                                .size(16.0)
                                .color(egui::Color32::from_gray(200)),
                        );
                    });
                });
                return;
            }

            canvas::show(
                ui,
                self.image_texture.as_ref(),
                self.image_size,
                &self.watermark_texture,
                &self.fist_texture,
                &self.sun_texture,
                &mut self.overlays,
            );

            ui.separator();
            ui.horizontal(|ui| {
                if let Some(ref status) = self.status {
                    ui.label(egui::RichText::new(status).color(ui.visuals().warn_fg_color));
                } else if self.source.is_some() {
                    ui.label("Ready");
                } else {
                    ui.label("No image loaded");
                }
                ui.separator();
                ui.label(format!("Logo scale: {:.1}×", self.overlays.logo_scale));
                if self.overlays.logo_selected {
                    ui.label(
                        egui::RichText::new("logo selected: +/- to scale, 0 to reset").weak(),
                    );
                }
            });
        });
    }
}

fn image_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"])
        .pick_file()
}

fn load_texture(ctx: &egui::Context, name: &str, image: &RgbaImage) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}
