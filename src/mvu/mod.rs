// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::config::QuoteConfig;
use crate::logic::document;
use crate::logic::render::write_quote_pdf;
use crate::models::quote::{self, Quote, QuoteWarning};
use crate::ui::components::catalog::{self, CatalogModel, CatalogMsg};

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Customer company the quote is addressed to.
    pub customer_company: String,
    /// Optional contact person at the customer.
    pub contact_person: String,
    /// Product catalog, edit cursor, and form.
    pub catalog: CatalogModel,
    /// Branding, numbering, and asset settings.
    pub config: QuoteConfig,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Most recently generated PDF, offered for opening.
    pub last_output: Option<PathBuf>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(config: QuoteConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }
}

/// Application messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    CustomerCompanyChanged(String),
    ContactPersonChanged(String),
    Catalog(CatalogMsg),
    GenerateRequested { output: PathBuf, now: NaiveDateTime },
    GenerateCancelled,
    GenerateCompleted(Result<GeneratedQuote, String>),
    OpenOutput,
    OpenCompleted(Result<(), String>),
    DismissError,
}

/// Commands represent side-effects executed between frames.
#[derive(Debug)]
pub enum Command {
    GenerateQuote(GeneratePayload),
    OpenFile(PathBuf),
}

/// Owned snapshot of everything a generation needs.
#[derive(Debug)]
pub struct GeneratePayload {
    /// Final PDF path on disk (with `.pdf` extension enforced).
    pub output: PathBuf,
    pub quote: Quote,
    pub config: QuoteConfig,
}

/// Outcome of a successful generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedQuote {
    pub path: PathBuf,
    pub pages: usize,
    /// Font fallback notice, shown next to the success message.
    pub font_warning: Option<String>,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::CustomerCompanyChanged(text) => model.customer_company = text,
        Msg::ContactPersonChanged(text) => model.contact_person = text,
        Msg::DismissError => model.error = None,
        Msg::Catalog(m) => {
            if let Some(event) = catalog::update(&mut model.catalog, m) {
                surface_event(model, event.message, event.is_error);
            }
        }
        Msg::GenerateRequested { output, now } => match prepare_generation(model, output, now) {
            Ok(payload) => {
                info!(
                    "Queueing quote {} for {:?}",
                    payload.quote.number(&payload.config.quote_prefix),
                    payload.output
                );
                cmds.push(Command::GenerateQuote(payload));
            }
            Err(warnings) => {
                let message = warnings
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                surface_event(model, message, false);
            }
        },
        Msg::GenerateCancelled => {
            surface_event(model, "PDF oluşturma iptal edildi.".to_string(), false)
        }
        Msg::GenerateCompleted(result) => match result {
            Ok(generated) => {
                info!(
                    "Generated {} page(s) at {:?}",
                    generated.pages, generated.path
                );
                let mut message =
                    format!("PDF başarıyla oluşturuldu: {}", generated.path.display());
                if let Some(warning) = &generated.font_warning {
                    message.push('\n');
                    message.push_str(warning);
                }
                model.last_output = Some(generated.path);
                surface_event(model, message, false);
            }
            Err(err) => surface_event(model, format!("PDF oluşturma hatası: {err}"), true),
        },
        Msg::OpenOutput => {
            if let Some(path) = model.last_output.clone() {
                cmds.push(Command::OpenFile(path));
            }
        }
        Msg::OpenCompleted(result) => {
            if let Err(err) = result {
                surface_event(model, format!("PDF açılamadı: {err}"), true);
            }
        }
    }
}

/// Execute a command and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::GenerateQuote(payload) => {
            let document = document::build(&payload.quote, &payload.config);
            let res = write_quote_pdf(&payload.output, &document, &payload.config)
                .map(|report| GeneratedQuote {
                    path: payload.output.clone(),
                    pages: report.pages,
                    font_warning: report.font_warning,
                })
                .map_err(|err| {
                    warn!("Quote generation failed: {err}");
                    err.to_string()
                });
            Msg::GenerateCompleted(res)
        }
        Command::OpenFile(path) => {
            Msg::OpenCompleted(open::that(&path).map_err(|err| format!("{}: {err}", path.display())))
        }
    }
}

/// Unmet preconditions for generating a quote from the current model.
pub fn generation_warnings(model: &AppModel) -> Vec<QuoteWarning> {
    quote::missing_preconditions(&model.customer_company, model.catalog.products())
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

/// Snapshot the session into a payload for the generation worker.
fn prepare_generation(
    model: &AppModel,
    output: PathBuf,
    now: NaiveDateTime,
) -> Result<GeneratePayload, Vec<QuoteWarning>> {
    let quote = Quote::new(
        &model.customer_company,
        &model.contact_person,
        now,
        model.catalog.products().to_vec(),
    )?;
    Ok(GeneratePayload {
        output,
        quote,
        config: model.config.clone(),
    })
}
