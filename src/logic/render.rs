// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! PDF rendering of a [`QuoteDocument`] with `printpdf`.
//!
//! The whole document is rendered in memory first and only then written to
//! the output path, so a failed render never leaves a half-written file
//! behind. Pages are A4 portrait with 2 cm top and bottom margins; the price
//! table spills onto further pages as needed and repeats its header row on
//! each of them.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use image::{DynamicImage, RgbImage};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{FontConfig, QuoteConfig};
use crate::logic::document::{COLUMN_COUNT, LabeledLine, PriceTable, QuoteDocument, Section};
use crate::logic::watermark;
use crate::utils::path::resolve;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_TOP_MM: f32 = 20.0;
const MARGIN_BOTTOM_MM: f32 = 20.0;

const PT_TO_MM: f32 = 25.4 / 72.0;
/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.52;

const COLUMN_WIDTHS_MM: [f32; COLUMN_COUNT] = [50.0, 30.0, 20.0, 30.0, 25.0, 30.0];
const CELL_PADDING_MM: f32 = 8.0 * PT_TO_MM;
const TABLE_FONT_SIZE: f32 = 9.0;
const TABLE_LEADING: f32 = 11.0;
const GRID_THICKNESS: f32 = 1.0;

/// Watermark DPI chosen so one image pixel spans one point.
const WATERMARK_DPI: f32 = 72.0;

type Rgb3 = (f32, f32, f32);
const ACCENT: Rgb3 = (0.86, 0.24, 0.26);
const ROW_TINT: Rgb3 = (1.0, 0.95, 0.95);
const HEADER_TEXT: Rgb3 = (0.96, 0.96, 0.96);
const WHITE: Rgb3 = (1.0, 1.0, 1.0);
const BLACK: Rgb3 = (0.0, 0.0, 0.0);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
    #[error("Failed to create output directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What happened while rendering, for status reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    pub pages: usize,
    /// Set when the configured fonts could not be embedded.
    pub font_warning: Option<String>,
    pub watermark: bool,
}

/// Render `document` and write it to `output`, creating parent directories.
///
/// # Errors
///
/// Returns an error when rendering fails or the file cannot be written; a
/// partially written file is removed.
pub fn write_quote_pdf(
    output: &Path,
    document: &QuoteDocument,
    config: &QuoteConfig,
) -> Result<RenderReport, RenderError> {
    info!(
        "Rendering quote with {} row(s) to {:?}",
        document.table.rows.len(),
        output
    );
    let (bytes, report) = render(document, config)?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    if let Err(source) = fs::write(output, &bytes) {
        let _ = fs::remove_file(output);
        return Err(RenderError::Write {
            path: output.to_path_buf(),
            source,
        });
    }

    info!(
        "Wrote {} page(s) to {:?} (watermark: {})",
        report.pages, output, report.watermark
    );
    Ok(report)
}

/// Render `document` into PDF bytes.
pub fn render(
    document: &QuoteDocument,
    config: &QuoteConfig,
) -> Result<(Vec<u8>, RenderReport), RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let (fonts, font_warning) = load_fonts(&doc, &config.fonts, &config.assets_dir)?;
    let watermark = document.watermark.as_ref().map(watermark::flatten_on_white);

    let pages = {
        let layer = doc.get_page(page).get_layer(layer);
        let mut writer = PageWriter::new(&doc, layer, &fonts, watermark.as_ref());
        writer.write_document(document);
        writer.pages
    };

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer).map_err(pdf_error)?;
    let bytes = buffer.into_inner().map_err(pdf_error)?;

    Ok((
        bytes,
        RenderReport {
            pages,
            font_warning,
            watermark: watermark.is_some(),
        },
    ))
}

fn pdf_error(err: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(err.to_string())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Embed the configured TrueType fonts, falling back to built-in Helvetica.
fn load_fonts(
    doc: &PdfDocumentReference,
    fonts: &FontConfig,
    assets_dir: &Path,
) -> Result<(Fonts, Option<String>), RenderError> {
    match load_external_fonts(doc, fonts, assets_dir) {
        Ok(loaded) => Ok((loaded, None)),
        Err(err) => {
            warn!("Falling back to built-in fonts: {err:#}");
            let builtin = Fonts {
                regular: doc
                    .add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(pdf_error)?,
                bold: doc
                    .add_builtin_font(BuiltinFont::HelveticaBold)
                    .map_err(pdf_error)?,
            };
            let warning = format!("Türkçe font yüklenemedi: {err:#}. Standart font kullanılacak.");
            Ok((builtin, Some(warning)))
        }
    }
}

fn load_external_fonts(
    doc: &PdfDocumentReference,
    fonts: &FontConfig,
    assets_dir: &Path,
) -> anyhow::Result<Fonts> {
    Ok(Fonts {
        regular: load_font_file(doc, &resolve(assets_dir, &fonts.regular))?,
        bold: load_font_file(doc, &resolve(assets_dir, &fonts.bold))?,
    })
}

fn load_font_file(doc: &PdfDocumentReference, path: &Path) -> anyhow::Result<IndirectFontRef> {
    let file = File::open(path).with_context(|| format!("Failed to open font {:?}", path))?;
    let font = doc
        .add_external_font(file)
        .map_err(|e| anyhow!("Failed to load font {:?}: {e}", path))?;
    debug!("Embedded font {:?}", path);
    Ok(font)
}

/// Approximate rendered width of `text`, in millimetres.
fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_WIDTH * PT_TO_MM
}

/// Greedy word wrap to `max_width` millimetres. Always returns at least one line.
fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && text_width_mm(&candidate, size) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn row_height(lines: usize) -> f32 {
    lines as f32 * TABLE_LEADING * PT_TO_MM + 2.0 * CELL_PADDING_MM
}

fn color((r, g, b): Rgb3) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Top-down cursor over the pages of one document.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    watermark: Option<&'a RgbImage>,
    /// Distance of the cursor from the bottom edge, in millimetres.
    y: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        layer: PdfLayerReference,
        fonts: &'a Fonts,
        watermark: Option<&'a RgbImage>,
    ) -> Self {
        let writer = Self {
            doc,
            layer,
            fonts,
            watermark,
            y: PAGE_HEIGHT_MM - MARGIN_TOP_MM,
            pages: 1,
        };
        writer.paint_watermark();
        writer
    }

    fn start_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_TOP_MM;
        self.paint_watermark();
    }

    /// Painted first so all content sits on top of it.
    fn paint_watermark(&self) {
        let Some(rgb) = self.watermark else {
            return;
        };
        let size_mm = rgb.width() as f32 * 72.0 / WATERMARK_DPI * PT_TO_MM;
        let height_mm = rgb.height() as f32 * 72.0 / WATERMARK_DPI * PT_TO_MM;
        let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(rgb.clone()));
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm((PAGE_WIDTH_MM - size_mm) / 2.0)),
                translate_y: Some(Mm((PAGE_HEIGHT_MM - height_mm) / 2.0)),
                dpi: Some(WATERMARK_DPI),
                ..Default::default()
            },
        );
    }

    fn ensure_space(&mut self, needed_mm: f32) {
        if self.y - needed_mm < MARGIN_BOTTOM_MM {
            self.start_page();
        }
    }

    fn space(&mut self, points: f32) {
        self.y -= points * PT_TO_MM;
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold { &self.fonts.bold } else { &self.fonts.regular }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, baseline: f32, bold: bool) {
        self.layer
            .use_text(text, size, Mm(x), Mm(baseline), self.font(bold));
    }

    /// Write one line of text starting at `x` and advance by `leading` points.
    fn line(&mut self, text: &str, size: f32, leading: f32, x: f32, bold: bool) {
        self.ensure_space(leading * PT_TO_MM);
        self.text_at(text, size, x, self.y - size * PT_TO_MM, bold);
        self.space(leading);
    }

    fn centered_line(&mut self, text: &str, size: f32, leading: f32, bold: bool) {
        let x = ((PAGE_WIDTH_MM - text_width_mm(text, size)) / 2.0).max(0.0);
        self.line(text, size, leading, x, bold);
    }

    fn write_document(&mut self, document: &QuoteDocument) {
        self.layer.set_fill_color(color(ACCENT));
        for brand in &document.brand_lines {
            self.centered_line(brand, 16.0, 20.0, true);
        }
        self.space(25.0);
        self.centered_line(&document.title, 18.0, 22.0, true);
        self.space(35.0);

        self.layer.set_fill_color(color(BLACK));
        for meta in &document.metadata {
            self.labeled_line(meta);
        }
        self.space(20.0);

        self.section(&document.customer, 12.0);
        self.space(20.0);

        self.table(&document.table);
        self.space(25.0);

        self.section(&document.notes, 10.0);
    }

    fn labeled_line(&mut self, line: &LabeledLine) {
        let left = table_left();
        self.ensure_space(16.0 * PT_TO_MM);
        let baseline = self.y - 10.0 * PT_TO_MM;
        self.text_at(&line.label, 10.0, left, baseline, true);
        let value_x = left + text_width_mm(&line.label, 10.0) + 2.0;
        self.text_at(&line.value, 10.0, value_x, baseline, false);
        self.space(16.0);
    }

    fn section(&mut self, section: &Section, heading_size: f32) {
        let left = table_left();
        self.ensure_space((heading_size + 8.0 + 12.0) * PT_TO_MM);
        self.layer.set_fill_color(color(ACCENT));
        self.line(&section.heading, heading_size, heading_size + 8.0, left, true);
        self.layer.set_fill_color(color(BLACK));
        let max_width = PAGE_WIDTH_MM - 2.0 * left;
        for text in &section.lines {
            for wrapped in wrap(text, 10.0, max_width) {
                self.line(&wrapped, 10.0, 13.0, left, false);
            }
        }
    }

    fn table(&mut self, table: &PriceTable) {
        let header: Vec<Vec<String>> = table
            .header
            .iter()
            .map(|label| label.split('\n').map(String::from).collect())
            .collect();
        let header_height = row_height(header.iter().map(Vec::len).max().unwrap_or(1));

        self.ensure_space((22.0 * PT_TO_MM) + header_height + row_height(1));
        self.layer.set_fill_color(color(ACCENT));
        self.line(&table.heading, 12.0, 22.0, table_left(), true);

        self.layer.set_outline_color(color(BLACK));
        self.layer.set_outline_thickness(GRID_THICKNESS);
        self.row(&header, ACCENT, HEADER_TEXT, true);

        for (index, cells) in table.rows.iter().enumerate() {
            let cells: Vec<Vec<String>> = cells
                .iter()
                .zip(COLUMN_WIDTHS_MM)
                .map(|(cell, width)| wrap(cell, TABLE_FONT_SIZE, width - 2.0 * CELL_PADDING_MM))
                .collect();
            let height = row_height(cells.iter().map(Vec::len).max().unwrap_or(1));
            if self.y - height < MARGIN_BOTTOM_MM {
                self.start_page();
                self.layer.set_outline_color(color(BLACK));
                self.layer.set_outline_thickness(GRID_THICKNESS);
                self.row(&header, ACCENT, HEADER_TEXT, true);
            }
            let fill = if index % 2 == 0 { ROW_TINT } else { WHITE };
            self.row(&cells, fill, BLACK, false);
        }
        self.layer.set_fill_color(color(BLACK));
    }

    /// Draw one table row: filled and outlined cells with centred text.
    fn row(&mut self, cells: &[Vec<String>], fill: Rgb3, text: Rgb3, bold: bool) {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        let height = row_height(lines);
        let top = self.y;
        let bottom = top - height;
        let mut x = table_left();

        for (cell, width) in cells.iter().zip(COLUMN_WIDTHS_MM) {
            self.layer.set_fill_color(color(fill));
            self.layer.add_rect(
                Rect::new(Mm(x), Mm(bottom), Mm(x + width), Mm(top)).with_mode(PaintMode::Fill),
            );
            self.layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(x), Mm(bottom)), false),
                    (Point::new(Mm(x + width), Mm(bottom)), false),
                    (Point::new(Mm(x + width), Mm(top)), false),
                    (Point::new(Mm(x), Mm(top)), false),
                ],
                is_closed: true,
            });

            self.layer.set_fill_color(color(text));
            let block = cell.len() as f32 * TABLE_LEADING * PT_TO_MM;
            let mut baseline = top - (height - block) / 2.0 - TABLE_FONT_SIZE * PT_TO_MM;
            for line in cell {
                let text_x = x + ((width - text_width_mm(line, TABLE_FONT_SIZE)) / 2.0).max(1.0);
                self.text_at(line, TABLE_FONT_SIZE, text_x, baseline, bold);
                baseline -= TABLE_LEADING * PT_TO_MM;
            }
            x += width;
        }
        self.y = bottom;
    }
}

fn table_left() -> f32 {
    (PAGE_WIDTH_MM - COLUMN_WIDTHS_MM.iter().sum::<f32>()) / 2.0
}
