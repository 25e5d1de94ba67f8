// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the quote builder UI.

use eframe::egui;
use egui_phosphor::Variant;
use tracing::info;

use crate::config::QuoteConfig;
use crate::ui::QuoteApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: QuoteConfig) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 500.0]),
        ..Default::default()
    };

    info!("Starting quote builder");
    eframe::run_native(
        "QuotePack",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(QuoteApp::new(config)))
        }),
    )
}
