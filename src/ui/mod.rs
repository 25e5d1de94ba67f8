// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for composing a price quote.
//! Handles layout, customer fields, and wiring to PDF generation.

pub mod components;

use eframe::egui;

use crate::config::QuoteConfig;
use crate::models::quote;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::catalog::{self, CatalogMsg};
use crate::utils::ensure_extension;

/// Stateful egui application for building and exporting price quotes.
pub struct QuoteApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl QuoteApp {
    /// Start the worker pool and build the initial model.
    pub fn new(config: QuoteConfig) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(1, 2))
            .unwrap_or(1);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::new(config),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for QuoteApp {
    // Required by eframe 0.34; all rendering happens in `update`, which eframe still calls.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drains worker results, applies pending messages to the model, and renders one frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command worker.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process in arrival order so form edits land before a submit.
        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(self.model.config.title.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    ui.separator();
                    self.render_generate_button(ui);
                    ui.separator();
                    self.render_clear_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.columns(2, |columns| {
                    self.render_customer_group(&mut columns[0]);
                    columns[0].add_space(12.0);
                    self.render_product_form(&mut columns[0]);

                    self.render_product_list(&mut columns[1]);
                });
                ui.add_space(12.0);

                self.render_generation_warnings(ui);
                ui.add_space(8.0);
            });
        });
    }
}

impl QuoteApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Render the "Generate PDF" button and handle the save-file dialog interaction.
    ///
    /// The button is enabled only when a customer company is entered and the
    /// catalog is not empty. The dialog is pre-filled with
    /// `<stem>_<YYYYMMDD>_<HHMM>.pdf`; the chosen path is forced to `.pdf`.
    fn render_generate_button(&mut self, ui: &mut egui::Ui) {
        let warnings = mvu::generation_warnings(&self.model);
        let button = egui::Button::new(format!(
            "{} PDF Teklifi Oluştur",
            egui_phosphor::regular::FILE_PDF
        ));

        if ui
            .add_enabled(warnings.is_empty(), button)
            .on_disabled_hover_text(
                warnings
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
            .clicked()
        {
            let now = chrono::Local::now().naive_local();
            let default_name = quote::file_name(&self.model.config.file_stem, now);
            let dialog = rfd::FileDialog::new()
                .set_title("PDF teklifini kaydet")
                .add_filter("PDF", &["pdf"])
                .set_file_name(&default_name);

            if let Some(path) = dialog.save_file() {
                let output = ensure_extension(path, "pdf");
                self.inbox.push(Msg::GenerateRequested { output, now });
            } else {
                self.inbox.push(Msg::GenerateCancelled);
            }
        }
    }

    fn render_clear_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Tüm Ürünleri Temizle",
            egui_phosphor::regular::TRASH
        ));
        if ui.add(button).clicked() {
            self.inbox.push(Msg::Catalog(CatalogMsg::Clear));
        }
    }

    /// Customer company and contact person inputs.
    fn render_customer_group(&mut self, ui: &mut egui::Ui) {
        ui.strong(format!(
            "{} Müşteri Bilgileri",
            egui_phosphor::regular::USERS
        ));
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::Grid::new("customer_grid")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 10.0))
                .min_col_width(110.0)
                .show(ui, |ui| {
                    ui.label("Müşteri Firma Adı");
                    let mut company = self.model.customer_company.clone();
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut company)
                                .hint_text("Örnek: Saloon Burger"),
                        )
                        .changed()
                    {
                        self.inbox.push(Msg::CustomerCompanyChanged(company));
                    }
                    ui.end_row();

                    ui.label("İlgili Kişi");
                    let mut contact = self.model.contact_person.clone();
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut contact)
                                .hint_text("Örnek: Mehmet Yılmaz"),
                        )
                        .changed()
                    {
                        self.inbox.push(Msg::ContactPersonChanged(contact));
                    }
                    ui.end_row();
                });
        });
    }

    fn render_product_form(&mut self, ui: &mut egui::Ui) {
        ui.strong(format!(
            "{} Ürün Ekle/Düzenle",
            egui_phosphor::regular::SHOPPING_CART
        ));
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            let msgs = catalog::view_form(ui, &self.model.catalog);
            self.inbox.extend(msgs.into_iter().map(Msg::Catalog));
        });
    }

    fn render_product_list(&mut self, ui: &mut egui::Ui) {
        ui.strong(format!(
            "{} Eklenen Ürünler",
            egui_phosphor::regular::PACKAGE
        ));
        egui::ScrollArea::horizontal()
            .id_salt("product_list")
            .show(ui, |ui| {
                let msgs = catalog::view_list(ui, &self.model.catalog);
                self.inbox.extend(msgs.into_iter().map(Msg::Catalog));
            });
    }

    /// Inline reasons why the quote cannot be generated yet.
    fn render_generation_warnings(&self, ui: &mut egui::Ui) {
        for warning in mvu::generation_warnings(&self.model) {
            ui.label(
                egui::RichText::new(format!("{} {warning}", egui_phosphor::regular::WARNING))
                    .color(egui::Color32::from_rgb(232, 89, 12)),
            );
        }
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Hata")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("Tamam").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message and the open action for the last PDF.
    fn render_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(text) = &self.model.status {
                let display = if self.model.pending_commands > 0 {
                    format!("{}  ({} çalışıyor…)", text, self.model.pending_commands)
                } else {
                    text.to_string()
                };
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
            }
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0));
            }
            if self.model.last_output.is_some() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = egui::Button::new(format!(
                        "{} PDF'i Aç",
                        egui_phosphor::regular::ARROW_SQUARE_OUT
                    ));
                    if ui.add(button).clicked() {
                        self.inbox.push(Msg::OpenOutput);
                    }
                });
            }
        });
    }
}
