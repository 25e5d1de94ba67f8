// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Faded logo watermark painted behind every page of a quote.
//!
//! The watermark is optional: a missing logo or an undecodable image simply
//! yields no watermark.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbImage, RgbaImage};
use tracing::debug;

/// Longest edge of the logo after downscaling, in pixels.
const MAX_LOGO_SIZE: u32 = 350;
/// Square canvas the logo is centred on, in pixels.
const CANVAS_SIZE: u32 = 400;
/// Fraction of the original alpha kept in the watermark.
const OPACITY: f32 = 0.25;

/// Return the first candidate file that exists in `dir`.
pub fn find_logo(dir: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Decode a logo, shrink it to fit, centre it on a transparent canvas, and fade it.
///
/// # Errors
///
/// Returns an error when the file cannot be read or decoded.
pub fn prepare(path: &Path) -> Result<RgbaImage> {
    let logo = image::open(path).with_context(|| format!("Failed to decode logo {:?}", path))?;
    let logo = if logo.width() > MAX_LOGO_SIZE || logo.height() > MAX_LOGO_SIZE {
        logo.resize(MAX_LOGO_SIZE, MAX_LOGO_SIZE, FilterType::Lanczos3)
    } else {
        logo
    };
    let logo = logo.to_rgba8();

    let mut canvas = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgba([0, 0, 0, 0]));
    let x = (CANVAS_SIZE - logo.width()) / 2;
    let y = (CANVAS_SIZE - logo.height()) / 2;
    imageops::replace(&mut canvas, &logo, i64::from(x), i64::from(y));

    for pixel in canvas.pixels_mut() {
        pixel[3] = (f32::from(pixel[3]) * OPACITY) as u8;
    }
    Ok(canvas)
}

/// Look up and prepare the watermark; any failure means "no watermark".
pub fn load(dir: &Path, candidates: &[String]) -> Option<RgbaImage> {
    let Some(path) = find_logo(dir, candidates) else {
        debug!("No logo found in {:?}; skipping watermark", dir);
        return None;
    };
    match prepare(&path) {
        Ok(image) => Some(image),
        Err(err) => {
            debug!("Skipping watermark: {err:#}");
            None
        }
    }
}

/// Composite a translucent image over a white page.
///
/// PDF pages are white, so flattening keeps the look while letting the
/// renderer embed a plain RGB image.
pub fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        let blend = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}
