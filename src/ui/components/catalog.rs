// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Product catalog editor: entry form, edit cursor, and product table.

use eframe::egui;
use egui_extras::{Column, TableBuilder};
use tracing::debug;

use crate::models::product::{Product, ProductInput};
use crate::utils::number::format_plain;
use crate::utils::{format_fixed, parse_decimal};

/// Text buffers behind the product form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub unit_price: String,
    pub vat_rate: String,
    pub package_kg: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            unit_price: "0".into(),
            vat_rate: "20".into(),
            package_kg: "0".into(),
        }
    }
}

impl ProductDraft {
    /// Pre-fill the form from a stored product.
    pub fn from_product(product: &Product) -> Self {
        let input = product.input();
        Self {
            name: input.name,
            unit_price: format_plain(input.unit_price),
            vat_rate: format_plain(input.vat_rate),
            package_kg: format_plain(input.package_kg),
        }
    }

    /// Parse the numeric buffers. Range checks are left to [`Product::new`].
    pub fn parse(&self) -> Result<ProductInput, String> {
        let number = |label: &str, text: &str| {
            parse_decimal(text).map_err(|bad| format!("{label} geçerli bir sayı değil: '{bad}'"))
        };
        Ok(ProductInput {
            name: self.name.clone(),
            unit_price: number("Kilogram fiyatı", &self.unit_price)?,
            vat_rate: number("KDV oranı", &self.vat_rate)?,
            package_kg: number("Ambalaj ağırlığı", &self.package_kg)?,
        })
    }
}

/// Session catalog plus the edit cursor and form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogModel {
    products: Vec<Product>,
    editing_index: Option<usize>,
    draft: ProductDraft,
}

impl CatalogModel {
    /// Products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Index of the product being edited, if any.
    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    fn reset_form(&mut self) {
        self.editing_index = None;
        self.draft = ProductDraft::default();
    }
}

/// Messages produced by the catalog form and table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogMsg {
    DraftNameChanged(String),
    DraftUnitPriceChanged(String),
    DraftVatRateChanged(String),
    DraftPackageKgChanged(String),
    /// Add or update, depending on the edit cursor.
    Submit,
    Add(ProductInput),
    Update { index: usize, input: ProductInput },
    Delete(usize),
    Clear,
    BeginEdit(usize),
    CancelEdit,
}

/// Feedback surfaced to the status bar/modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEvent {
    pub message: String,
    pub is_error: bool,
}

impl CatalogEvent {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

/// Apply a message to the catalog. Rejected operations leave it untouched.
pub fn update(model: &mut CatalogModel, msg: CatalogMsg) -> Option<CatalogEvent> {
    match msg {
        CatalogMsg::DraftNameChanged(text) => {
            model.draft.name = text;
            None
        }
        CatalogMsg::DraftUnitPriceChanged(text) => {
            model.draft.unit_price = text;
            None
        }
        CatalogMsg::DraftVatRateChanged(text) => {
            model.draft.vat_rate = text;
            None
        }
        CatalogMsg::DraftPackageKgChanged(text) => {
            model.draft.package_kg = text;
            None
        }
        CatalogMsg::Submit => match model.draft.parse() {
            Ok(input) => match model.editing_index {
                Some(index) => update_product(model, index, input),
                None => add_product(model, input),
            },
            Err(err) => Some(CatalogEvent::error(err)),
        },
        CatalogMsg::Add(input) => add_product(model, input),
        CatalogMsg::Update { index, input } => update_product(model, index, input),
        CatalogMsg::Delete(index) => delete_product(model, index),
        CatalogMsg::Clear => {
            if model.products.is_empty() {
                return Some(CatalogEvent::info("Zaten hiç ürün yok!"));
            }
            debug!("Clearing {} product(s)", model.products.len());
            model.products.clear();
            model.reset_form();
            Some(CatalogEvent::info("Tüm ürünler silindi!"))
        }
        CatalogMsg::BeginEdit(index) => {
            if let Some(product) = model.products.get(index) {
                model.draft = ProductDraft::from_product(product);
                model.editing_index = Some(index);
            }
            None
        }
        CatalogMsg::CancelEdit => {
            model.reset_form();
            None
        }
    }
}

fn add_product(model: &mut CatalogModel, input: ProductInput) -> Option<CatalogEvent> {
    match Product::new(input) {
        Ok(product) => {
            debug!("Adding product '{}'", product.name());
            let message = format!("'{}' eklendi!", product.name());
            model.products.push(product);
            model.draft = ProductDraft::default();
            Some(CatalogEvent::info(message))
        }
        Err(err) => Some(CatalogEvent::error(err.to_string())),
    }
}

fn update_product(
    model: &mut CatalogModel,
    index: usize,
    input: ProductInput,
) -> Option<CatalogEvent> {
    if index >= model.products.len() {
        return Some(CatalogEvent::error(format!(
            "Güncellenecek ürün bulunamadı (sıra {}).",
            index + 1
        )));
    }
    match Product::new(input) {
        Ok(product) => {
            debug!("Updating product {} to '{}'", index, product.name());
            let message = format!("'{}' güncellendi!", product.name());
            model.products[index] = product;
            model.reset_form();
            Some(CatalogEvent::info(message))
        }
        Err(err) => Some(CatalogEvent::error(err.to_string())),
    }
}

fn delete_product(model: &mut CatalogModel, index: usize) -> Option<CatalogEvent> {
    if index >= model.products.len() {
        return None;
    }
    let removed = model.products.remove(index);
    debug!("Deleted product {} ('{}')", index, removed.name());

    match model.editing_index {
        Some(editing) if editing == index => model.reset_form(),
        Some(editing) if editing > index => model.editing_index = Some(editing - 1),
        _ => {}
    }
    Some(CatalogEvent::info(format!("'{}' silindi!", removed.name())))
}

/// Render the add/edit form.
pub fn view_form(ui: &mut egui::Ui, model: &CatalogModel) -> Vec<CatalogMsg> {
    let mut msgs = Vec::new();
    let draft = &model.draft;

    ui.label("Ürün Adı");
    let mut name = draft.name.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut name).hint_text("Örnek: Karabiber"))
        .changed()
    {
        msgs.push(CatalogMsg::DraftNameChanged(name));
    }
    ui.add_space(4.0);

    egui::Grid::new("product_numbers")
        .num_columns(2)
        .spacing(egui::vec2(8.0, 6.0))
        .show(ui, |ui| {
            ui.label("Kilogram Fiyatı (KDV Hariç)");
            ui.label("KDV (%)");
            ui.end_row();

            if let Some(text) = number_field(ui, &draft.unit_price) {
                msgs.push(CatalogMsg::DraftUnitPriceChanged(text));
            }
            if let Some(text) = number_field(ui, &draft.vat_rate) {
                msgs.push(CatalogMsg::DraftVatRateChanged(text));
            }
            ui.end_row();
        });
    ui.add_space(4.0);

    ui.label("Ambalaj (kg) - opsiyonel")
        .on_hover_text("Sadece kilogram bazlı satılan ürünler için 0 bırakın. Örn: 5, 10, 20");
    if let Some(text) = number_field(ui, &draft.package_kg) {
        msgs.push(CatalogMsg::DraftPackageKgChanged(text));
    }
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let label = if model.editing_index.is_some() {
            format!("{} Ürünü Güncelle", egui_phosphor::regular::PENCIL_SIMPLE)
        } else {
            format!("{} Ürün Ekle", egui_phosphor::regular::PLUS)
        };
        if ui.button(label).clicked() {
            msgs.push(CatalogMsg::Submit);
        }
        if model.editing_index.is_some()
            && ui
                .button(format!("{} İptal", egui_phosphor::regular::X))
                .clicked()
        {
            msgs.push(CatalogMsg::CancelEdit);
        }
    });

    msgs
}

/// Single-line numeric input with an inline hint when the text is not a number.
fn number_field(ui: &mut egui::Ui, value: &str) -> Option<String> {
    let mut text = value.to_string();
    let changed = ui
        .vertical(|ui| {
            let changed = ui
                .add(egui::TextEdit::singleline(&mut text).desired_width(120.0))
                .changed();
            if parse_decimal(&text).is_err() {
                ui.label(
                    egui::RichText::new("Geçersiz sayı")
                        .small()
                        .color(egui::Color32::from_rgb(200, 40, 40)),
                );
            }
            changed
        })
        .inner;
    changed.then_some(text)
}

/// Render the product table with per-row edit/delete actions.
pub fn view_list(ui: &mut egui::Ui, model: &CatalogModel) -> Vec<CatalogMsg> {
    let mut msgs = Vec::new();

    if model.products.is_empty() {
        ui.label(
            egui::RichText::new(
                "Henüz ürün eklenmemiş. Ürün bilgilerini doldurup 'Ürün Ekle' butonuna tıklayın.",
            )
            .color(egui::Color32::from_gray(150)),
        );
        return msgs;
    }

    const HEADERS: [&str; 8] = [
        "No",
        "Ürün Adı",
        "KG Fiyatı KDV Hariç (TL)",
        "KDV %",
        "KG Fiyatı KDV Dahil (TL)",
        "Ambalaj (kg)",
        "Ambalaj KDV Hariç (TL)",
        "Ambalaj KDV Dahil (TL)",
    ];

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto())
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto(), HEADERS.len() - 2)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
            header.col(|_| {});
        })
        .body(|mut body| {
            for (index, product) in model.products.iter().enumerate() {
                let cells = table_cells(product);
                body.row(24.0, |mut row| {
                    row.set_selected(model.editing_index == Some(index));
                    row.col(|ui| {
                        ui.label((index + 1).to_string());
                    });
                    for cell in &cells {
                        row.col(|ui| {
                            ui.label(cell.as_str());
                        });
                    }
                    row.col(|ui| {
                        if ui
                            .small_button(egui_phosphor::regular::PENCIL_SIMPLE)
                            .on_hover_text("Düzenle")
                            .clicked()
                        {
                            msgs.push(CatalogMsg::BeginEdit(index));
                        }
                        if ui
                            .small_button(egui_phosphor::regular::TRASH)
                            .on_hover_text("Sil")
                            .clicked()
                        {
                            msgs.push(CatalogMsg::Delete(index));
                        }
                    });
                });
            }
        });

    ui.add_space(4.0);
    ui.strong(format!("Toplam: {} ürün", model.products.len()));

    msgs
}

/// On-screen cells; package columns stay blank for kilogram-only products.
fn table_cells(product: &Product) -> [String; 7] {
    let (package, excl, incl) = if product.has_package() {
        (
            format_plain(product.package_kg()),
            format_fixed(product.package_price_excl_vat(), 2),
            format_fixed(product.package_price_incl_vat(), 2),
        )
    } else {
        Default::default()
    };
    [
        product.name().to_string(),
        format_fixed(product.unit_price(), 2),
        format_fixed(product.vat_rate(), 0),
        format_fixed(product.vat_price(), 2),
        package,
        excl,
        incl,
    ]
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::product::ProductError;

    fn input(name: &str, price: &str, vat: &str, package: &str) -> ProductInput {
        ProductInput {
            name: name.into(),
            unit_price: price.parse().unwrap(),
            vat_rate: vat.parse().unwrap(),
            package_kg: package.parse().unwrap(),
        }
    }

    fn catalog_with(names: &[&str]) -> CatalogModel {
        let mut model = CatalogModel::default();
        for name in names {
            update(&mut model, CatalogMsg::Add(input(name, "10", "20", "0")));
        }
        model
    }

    fn names(model: &CatalogModel) -> Vec<&str> {
        model.products().iter().map(Product::name).collect()
    }

    #[test]
    fn add_computes_package_prices() {
        let mut model = CatalogModel::default();

        let event = update(
            &mut model,
            CatalogMsg::Add(input("Karabiber", "100.00", "20", "10")),
        )
        .unwrap();

        assert!(!event.is_error);
        let product = &model.products()[0];
        assert_eq!(product.vat_price(), Decimal::new(12000, 2));
        assert_eq!(product.package_price_excl_vat(), Decimal::from(1000));
        assert_eq!(product.package_price_incl_vat(), Decimal::from(1200));
    }

    #[test]
    fn add_without_package_leaves_package_prices_zero() {
        let mut model = CatalogModel::default();

        update(
            &mut model,
            CatalogMsg::Add(input("Pul Biber", "50.0", "10", "0")),
        );

        let product = &model.products()[0];
        assert_eq!(product.vat_price(), Decimal::from(55));
        assert_eq!(product.package_price_excl_vat(), Decimal::ZERO);
        assert_eq!(product.package_price_incl_vat(), Decimal::ZERO);
    }

    #[test]
    fn add_rejects_blank_name_without_mutation() {
        let mut model = catalog_with(&["Kekik"]);
        let before = model.clone();

        let event = update(&mut model, CatalogMsg::Add(input("   ", "1", "20", "0"))).unwrap();

        assert!(event.is_error);
        assert_eq!(event.message, "Ürün adı boş olamaz!");
        assert_eq!(model, before);
    }

    #[test]
    fn add_then_delete_restores_catalog() {
        let mut model = catalog_with(&["Kekik", "Sumak"]);
        let before = model.products().to_vec();

        update(&mut model, CatalogMsg::Add(input("Nane", "5", "1", "0")));
        let event = update(&mut model, CatalogMsg::Delete(2)).unwrap();

        assert_eq!(event.message, "'Nane' silindi!");
        assert_eq!(model.products(), before.as_slice());
    }

    #[test]
    fn delete_before_cursor_shifts_it_down() {
        let mut model = catalog_with(&["A", "B", "C"]);
        update(&mut model, CatalogMsg::BeginEdit(2));

        update(&mut model, CatalogMsg::Delete(0));

        assert_eq!(model.editing_index(), Some(1));
        assert_eq!(names(&model), vec!["B", "C"]);
        assert_eq!(model.draft().name, "C");
    }

    #[test]
    fn delete_at_cursor_clears_it() {
        let mut model = catalog_with(&["A", "B", "C"]);
        update(&mut model, CatalogMsg::BeginEdit(1));

        update(&mut model, CatalogMsg::Delete(1));

        assert_eq!(model.editing_index(), None);
        assert_eq!(model.draft(), &ProductDraft::default());
    }

    #[test]
    fn delete_after_cursor_keeps_it() {
        let mut model = catalog_with(&["A", "B", "C"]);
        update(&mut model, CatalogMsg::BeginEdit(0));

        update(&mut model, CatalogMsg::Delete(2));

        assert_eq!(model.editing_index(), Some(0));
        assert_eq!(names(&model), vec!["A", "B"]);
    }

    #[test]
    fn delete_out_of_range_is_ignored() {
        let mut model = catalog_with(&["A"]);
        let before = model.clone();

        assert!(update(&mut model, CatalogMsg::Delete(5)).is_none());
        assert_eq!(model, before);
    }

    #[test]
    fn clear_empty_catalog_only_informs() {
        let mut model = CatalogModel::default();

        let event = update(&mut model, CatalogMsg::Clear).unwrap();

        assert!(!event.is_error);
        assert_eq!(event.message, "Zaten hiç ürün yok!");
        assert!(model.products().is_empty());
    }

    #[test]
    fn clear_removes_everything_and_cursor() {
        let mut model = catalog_with(&["A", "B"]);
        update(&mut model, CatalogMsg::BeginEdit(1));

        let event = update(&mut model, CatalogMsg::Clear).unwrap();

        assert_eq!(event.message, "Tüm ürünler silindi!");
        assert!(model.products().is_empty());
        assert_eq!(model.editing_index(), None);
    }

    #[test]
    fn update_at_cursor_recomputes_and_clears_cursor() {
        let mut model = catalog_with(&["Kekik", "Sumak"]);
        update(&mut model, CatalogMsg::BeginEdit(1));

        let event = update(
            &mut model,
            CatalogMsg::Update {
                index: 1,
                input: input("Sumak", "80", "10", "5"),
            },
        )
        .unwrap();

        assert_eq!(event.message, "'Sumak' güncellendi!");
        assert_eq!(model.editing_index(), None);
        let product = &model.products()[1];
        assert_eq!(product.vat_price(), Decimal::from(88));
        assert_eq!(product.package_price_incl_vat(), Decimal::from(440));
        assert_eq!(model.products()[0].name(), "Kekik");
    }

    #[test]
    fn update_out_of_range_is_rejected() {
        let mut model = catalog_with(&["Kekik"]);
        let before = model.clone();

        let event = update(
            &mut model,
            CatalogMsg::Update {
                index: 3,
                input: input("X", "1", "1", "0"),
            },
        )
        .unwrap();

        assert!(event.is_error);
        assert_eq!(model, before);
    }

    #[test]
    fn update_with_blank_name_keeps_cursor() {
        let mut model = catalog_with(&["Kekik"]);
        update(&mut model, CatalogMsg::BeginEdit(0));

        let event = update(
            &mut model,
            CatalogMsg::Update {
                index: 0,
                input: input("", "1", "1", "0"),
            },
        )
        .unwrap();

        assert!(event.is_error);
        assert_eq!(model.editing_index(), Some(0));
        assert_eq!(model.products()[0].name(), "Kekik");
    }

    #[test]
    fn begin_edit_loads_draft_and_cancel_resets() {
        let mut model = CatalogModel::default();
        update(
            &mut model,
            CatalogMsg::Add(input("Karabiber", "100.50", "20", "10")),
        );

        update(&mut model, CatalogMsg::BeginEdit(0));
        assert_eq!(model.editing_index(), Some(0));
        assert_eq!(model.draft().name, "Karabiber");
        assert_eq!(model.draft().unit_price, "100.5");
        assert_eq!(model.draft().vat_rate, "20");
        assert_eq!(model.draft().package_kg, "10");

        update(&mut model, CatalogMsg::CancelEdit);
        assert_eq!(model.editing_index(), None);
        assert_eq!(model.draft(), &ProductDraft::default());
        assert_eq!(model.products().len(), 1);
    }

    #[test]
    fn begin_edit_out_of_range_is_ignored() {
        let mut model = catalog_with(&["A"]);
        update(&mut model, CatalogMsg::BeginEdit(4));
        assert_eq!(model.editing_index(), None);
    }

    #[test]
    fn submit_adds_from_draft_with_comma_decimals() {
        let mut model = CatalogModel::default();
        update(&mut model, CatalogMsg::DraftNameChanged("Zerdeçal".into()));
        update(&mut model, CatalogMsg::DraftUnitPriceChanged("12,50".into()));
        update(&mut model, CatalogMsg::DraftVatRateChanged("10".into()));

        let event = update(&mut model, CatalogMsg::Submit).unwrap();

        assert!(!event.is_error);
        assert_eq!(model.products()[0].unit_price(), Decimal::new(1250, 2));
        assert_eq!(model.products()[0].vat_price(), Decimal::new(1375, 2));
        assert_eq!(model.draft(), &ProductDraft::default());
    }

    #[test]
    fn submit_in_edit_mode_updates_cursor_target() {
        let mut model = catalog_with(&["A", "B"]);
        update(&mut model, CatalogMsg::BeginEdit(0));
        update(&mut model, CatalogMsg::DraftNameChanged("A2".into()));

        update(&mut model, CatalogMsg::Submit);

        assert_eq!(names(&model), vec!["A2", "B"]);
        assert_eq!(model.editing_index(), None);
    }

    #[test]
    fn submit_with_bad_number_reports_error() {
        let mut model = CatalogModel::default();
        update(&mut model, CatalogMsg::DraftNameChanged("Kimyon".into()));
        update(&mut model, CatalogMsg::DraftVatRateChanged("yirmi".into()));

        let event = update(&mut model, CatalogMsg::Submit).unwrap();

        assert!(event.is_error);
        assert!(event.message.contains("'yirmi'"));
        assert!(model.products().is_empty());
        assert_eq!(model.draft().name, "Kimyon");
    }

    #[test]
    fn submit_rejects_vat_above_hundred() {
        let mut model = CatalogModel::default();
        update(&mut model, CatalogMsg::DraftNameChanged("Kimyon".into()));
        update(&mut model, CatalogMsg::DraftVatRateChanged("120".into()));

        let event = update(&mut model, CatalogMsg::Submit).unwrap();

        assert!(event.is_error);
        assert!(model.products().is_empty());
    }

    #[test]
    fn submit_with_huge_numbers_is_rejected() {
        let mut model = catalog_with(&["Kimyon"]);
        update(&mut model, CatalogMsg::DraftNameChanged("Karabiber".into()));
        update(&mut model, CatalogMsg::DraftUnitPriceChanged("10000000000000000000".into()));
        update(&mut model, CatalogMsg::DraftPackageKgChanged("10000000000000".into()));
        let before = model.clone();

        let event = update(&mut model, CatalogMsg::Submit).unwrap();

        assert!(event.is_error);
        assert_eq!(event.message, ProductError::TooLarge.to_string());
        assert_eq!(model, before);
    }

    #[test]
    fn table_cells_show_fractional_package_weight() {
        let product = Product::new(input("Kimyon", "80", "20", "2.5")).unwrap();

        let cells = table_cells(&product);

        assert_eq!(cells[4], "2.5");
        assert_eq!(cells[5], "200.00");
        assert_eq!(cells[6], "240.00");
    }

    #[test]
    fn table_cells_blank_package_columns_for_kilogram_pricing() {
        let product = Product::new(input("Pul Biber", "50", "10", "0")).unwrap();

        let cells = table_cells(&product);

        assert_eq!(cells[1], "50.00");
        assert_eq!(cells[3], "55.00");
        assert!(cells[4..].iter().all(String::is_empty));
    }
}
