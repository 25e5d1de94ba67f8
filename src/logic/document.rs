// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Renderer-agnostic assembly of the quote document.
//!
//! [`build`] turns a [`Quote`] snapshot into a [`QuoteDocument`]: every piece
//! of text already formatted, in the order it appears on the page. Layout,
//! fonts, and pagination belong to the renderer.

use image::RgbaImage;

use crate::config::QuoteConfig;
use crate::logic::watermark;
use crate::models::product::Product;
use crate::models::quote::Quote;
use crate::utils::format_fixed;
use crate::utils::number::format_plain;

/// Number of columns in the price table.
pub const COLUMN_COUNT: usize = 6;

/// Fixed column labels; `\n` marks a line break inside the header cell.
pub const COLUMN_LABELS: [&str; COLUMN_COUNT] = [
    "Ürün Adı",
    "KG Fiyatı\n(KDV Hariç)",
    "KDV %",
    "KG Fiyatı\n(KDV Dahil)",
    "Ambalaj",
    "Ambalaj Fiyatı\n(KDV Dahil)",
];

/// Cell text for products sold by the kilogram only.
pub const NO_PACKAGE: &str = "-";

/// A bold label followed by a regular value on one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabeledLine {
    pub label: String,
    pub value: String,
}

/// Heading plus body lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub lines: Vec<String>,
}

/// Header row and product rows, all cells pre-formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceTable {
    pub heading: String,
    pub header: [String; COLUMN_COUNT],
    pub rows: Vec<[String; COLUMN_COUNT]>,
}

/// Structured quote ready to be rendered.
#[derive(Clone, Debug)]
pub struct QuoteDocument {
    /// Centred brand lines at the top of the first page.
    pub brand_lines: Vec<String>,
    pub title: String,
    /// Date and quote number.
    pub metadata: Vec<LabeledLine>,
    pub customer: Section,
    pub table: PriceTable,
    pub notes: Section,
    /// Faded logo painted behind every page, if a logo was found.
    pub watermark: Option<RgbaImage>,
}

/// Assemble the document for `quote`.
///
/// The watermark is looked up in `config.assets_dir`; when no usable logo
/// exists the document simply has none.
pub fn build(quote: &Quote, config: &QuoteConfig) -> QuoteDocument {
    QuoteDocument {
        brand_lines: config.brand_lines.clone(),
        title: config.title.clone(),
        metadata: vec![
            LabeledLine {
                label: "Tarih:".into(),
                value: quote.date_label(),
            },
            LabeledLine {
                label: "Teklif No:".into(),
                value: quote.number(&config.quote_prefix),
            },
        ],
        customer: customer_section(quote),
        table: PriceTable {
            heading: "FİYAT LİSTESİ (KG ve Ambalaj Bazında)".into(),
            header: COLUMN_LABELS.map(String::from),
            rows: quote.products().iter().map(product_row).collect(),
        },
        notes: Section {
            heading: "NOTLAR:".into(),
            lines: config.notes.iter().map(|note| format!("• {note}")).collect(),
        },
        watermark: watermark::load(&config.assets_dir, &config.logo_candidates),
    }
}

fn customer_section(quote: &Quote) -> Section {
    let mut lines = vec![quote.company().to_string()];
    if let Some(contact) = quote.contact() {
        lines.push(format!("Att: {contact}"));
    }
    Section {
        heading: "SAYIN".into(),
        lines,
    }
}

/// Format one product as a table row.
pub fn product_row(product: &Product) -> [String; COLUMN_COUNT] {
    let (package, package_price) = if product.has_package() {
        (
            format!("{} kg", format_plain(product.package_kg())),
            format!("{} TL", format_fixed(product.package_price_incl_vat(), 2)),
        )
    } else {
        (NO_PACKAGE.to_string(), NO_PACKAGE.to_string())
    };

    [
        product.name().to_string(),
        format!("{} TL/kg", format_fixed(product.unit_price(), 2)),
        format!("%{}", format_fixed(product.vat_rate(), 0)),
        format!("{} TL/kg", format_fixed(product.vat_price(), 2)),
        package,
        package_price,
    ]
}
