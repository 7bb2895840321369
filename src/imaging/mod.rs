//! Imaging — the opaque pixel collaborator behind a trait.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Scale → variant** | Lanczos3 `resize_to_fill`, format from extension |
//! | **MIME lookup** | extension table ([`mime_type`]) |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait, shared types, recording mock
//! - **Rust backend**: [`RustBackend`] on the `image` crate

pub mod backend;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageAsset, ImageBackend, ScaleParams};
pub use rust_backend::RustBackend;

use std::path::{Path, PathBuf};

/// Extensions with compiled-in decoders, and their MIME types.
///
/// AVIF is deliberately absent: the engine only ever identifies and scales
/// source photos, and the `image` crate's AVIF support is encode-only
/// without a native helper library.
const MIME_CANDIDATES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("webp", "image/webp"),
];

/// MIME type for an image file, detected from its extension.
///
/// Returns `None` for unknown or missing extensions — callers in the
/// never-fail zones map that to an empty field, not an error.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    MIME_CANDIDATES
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// True if the extension belongs to a known image format.
pub fn is_image_file(path: &Path) -> bool {
    mime_type(path).is_some()
}

/// Path of the scaled variant for `source` fitted to `width`×`height`:
/// `cover.jpg` → `cover-1200x630.jpg`, next to the source.
pub(crate) fn variant_path(source: &Path, width: u32, height: u32) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = if ext.is_empty() {
        format!("{stem}-{width}x{height}")
    } else {
        format!("{stem}-{width}x{height}.{ext}")
    };
    source.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_known_extensions() {
        assert_eq!(mime_type(Path::new("a.jpg")), Some("image/jpeg"));
        assert_eq!(mime_type(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(mime_type(Path::new("a.webp")), Some("image/webp"));
        assert_eq!(mime_type(Path::new("a.tiff")), Some("image/tiff"));
    }

    #[test]
    fn mime_type_is_case_insensitive() {
        assert_eq!(mime_type(Path::new("A.JPG")), Some("image/jpeg"));
        assert_eq!(mime_type(Path::new("b.PnG")), Some("image/png"));
    }

    #[test]
    fn mime_type_unknown_or_missing_extension() {
        assert_eq!(mime_type(Path::new("a.txt")), None);
        assert_eq!(mime_type(Path::new("noext")), None);
        assert_eq!(mime_type(Path::new("a.avif")), None);
    }

    #[test]
    fn variant_path_keeps_extension_and_location() {
        assert_eq!(
            variant_path(Path::new("/img/cover.jpg"), 1200, 630),
            PathBuf::from("/img/cover-1200x630.jpg")
        );
    }

    #[test]
    fn variant_path_without_extension() {
        assert_eq!(
            variant_path(Path::new("/img/cover"), 100, 50),
            PathBuf::from("/img/cover-100x50")
        );
    }
}
