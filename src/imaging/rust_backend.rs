//! Pure Rust imaging backend — no external binaries.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify (JPEG, PNG, TIFF, WebP) | `image::image_dimensions` |
//! | Decode | `image::ImageReader` |
//! | Scale | `image::DynamicImage::resize_to_fill` with `Lanczos3` |
//! | Encode variant | `image::DynamicImage::save` (format from extension) |
//!
//! Scaled variants are written next to the source file with a
//! `-{width}x{height}` suffix. An existing variant is reused instead of
//! re-encoded, so repeated renders of the same subject cost one encode
//! total.

use super::backend::{BackendError, Dimensions, ImageAsset, ImageBackend, ScaleParams};
use super::variant_path;
use image::ImageReader;
use image::imageops::FilterType;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to identify {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn scale(&self, params: &ScaleParams) -> Result<ImageAsset, BackendError> {
        let variant = variant_path(&params.source, params.width, params.height);
        if variant.is_file() {
            let dims = self.identify(&variant)?;
            return Ok(ImageAsset {
                path: variant,
                width: dims.width,
                height: dims.height,
            });
        }

        let img = ImageReader::open(&params.source)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    params.source.display(),
                    e
                ))
            })?;

        // Undersized source with upscaling off: hand back the original
        if !params.upscaling && (img.width() < params.width || img.height() < params.height) {
            return Ok(ImageAsset {
                path: params.source.clone(),
                width: img.width(),
                height: img.height(),
            });
        }

        let scaled = img.resize_to_fill(params.width, params.height, FilterType::Lanczos3);
        scaled.save(&variant).map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to encode {}: {}",
                variant.display(),
                e
            ))
        })?;

        Ok(ImageAsset {
            path: variant,
            width: scaled.width(),
            height: scaled.height(),
        })
    }
}
