// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Decimal parsing and fixed-point formatting for form fields and documents.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parse a user-typed decimal.
///
/// Accepts `,` as the decimal separator (`12,50`), surrounding whitespace,
/// and treats an empty field as zero.
///
/// # Errors
///
/// Returns the offending text when it is not a number.
pub fn parse_decimal(text: &str) -> Result<Decimal, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let normalized = trimmed.replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| trimmed.to_string())
}

/// Round half away from zero and pad to exactly `places` decimals.
pub fn format_fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// Plain form-field rendering without trailing zeros (`20`, `12.5`).
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}
