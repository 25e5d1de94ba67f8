// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and document logic.

pub mod number;
pub mod path;

/// Fixed-point formatting for document cells.
pub use number::format_fixed;
/// Parse a user-typed decimal (comma or dot separator).
pub use number::parse_decimal;
/// Force a file extension onto a chosen output path.
pub use path::ensure_extension;
