// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Imprint - image watermarking tool
//!
//! A cross-platform desktop application for stamping images with a
//! draggable watermark and logo, and exporting the composite at high
//! resolution.

mod app;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::ImprintApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([980.0, 760.0])
            .with_min_inner_size([640.0, 720.0])
            .with_title("Imprint - Image Watermarking"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Imprint",
        options,
        Box::new(|cc| Ok(Box::new(ImprintApp::new(cc)?))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
