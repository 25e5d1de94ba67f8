// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Quote document assembly, watermark preparation, and PDF rendering.

pub mod document;
pub mod render;
pub mod watermark;
