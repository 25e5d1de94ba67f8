// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Output path helpers.

use std::path::{Path, PathBuf};

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_extension_preserves_matching_extension_case_insensitive() {
        let path = ensure_extension(PathBuf::from("teklif.PDF"), "pdf");
        assert_eq!(path, PathBuf::from("teklif.PDF"));
    }

    #[test]
    fn ensure_extension_adds_or_replaces() {
        assert_eq!(
            ensure_extension(PathBuf::from("quote_20260307_1430"), "pdf"),
            PathBuf::from("quote_20260307_1430.pdf")
        );
        assert_eq!(
            ensure_extension(PathBuf::from("quote.txt"), "pdf"),
            PathBuf::from("quote.pdf")
        );
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let base = Path::new("/srv/assets");
        assert_eq!(
            resolve(base, Path::new("DejaVuSans.ttf")),
            PathBuf::from("/srv/assets/DejaVuSans.ttf")
        );
        assert_eq!(
            resolve(base, Path::new("/fonts/DejaVuSans.ttf")),
            PathBuf::from("/fonts/DejaVuSans.ttf")
        );
    }
}
