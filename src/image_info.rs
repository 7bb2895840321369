//! Image descriptor resolution.
//!
//! Two different things arrive at the engine as "the og:image value": a
//! loaded [`ImageAsset`] (scaled on demand) or a path string relative to
//! the site root (used as-is, never auto-scaled). [`ImageResolver`]
//! normalizes both into one [`ImageDescriptor`] — path, public URL, pixel
//! dimensions, MIME type.
//!
//! Resolution is a never-fail zone: missing files, unknown input shapes,
//! and backend failures degrade to an empty descriptor (or the unscaled
//! asset) with a warning, so a broken image can not take down a page
//! render.

use crate::config::{SiteConfig, normalize_separators};
use crate::imaging::{self, BackendError, ImageAsset, ImageBackend, ScaleParams};
use crate::values::RawValue;
use serde::Serialize;
use std::path::Path;
use std::rc::Rc;
use walkdir::WalkDir;

/// Normalized record for any image-like input.
///
/// An empty descriptor (all fields empty/zero) means "no usable image";
/// accessors never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageDescriptor {
    pub path: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub mime: String,
}

impl ImageDescriptor {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Resolves raw image values into descriptors using the site config and
/// the imaging backend.
pub struct ImageResolver {
    config: SiteConfig,
    backend: Rc<dyn ImageBackend>,
}

impl ImageResolver {
    pub fn new(config: SiteConfig, backend: Rc<dyn ImageBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn ImageBackend {
        self.backend.as_ref()
    }

    /// Normalize an image-like raw value into a descriptor.
    ///
    /// - Loaded assets are scaled into the configured og:image box first
    ///   (unless `scale` is off). A scale failure falls back to the
    ///   unscaled asset.
    /// - Path strings resolve against the site root and are identified
    ///   directly — files referenced by path are never auto-scaled.
    /// - Anything else yields the empty descriptor.
    pub fn image_info(&self, value: &RawValue, scale: bool) -> ImageDescriptor {
        match value {
            RawValue::Image(asset) => {
                let asset = if scale { self.scaled_or_original(asset) } else { asset.clone() };
                let path = normalize_separators(&asset.path.to_string_lossy());
                ImageDescriptor {
                    url: self.config.public_url(&asset.path),
                    mime: imaging::mime_type(&asset.path).unwrap_or_default().to_string(),
                    width: asset.width,
                    height: asset.height,
                    path,
                }
            }
            RawValue::Text(relative) => {
                let filename = self.config.resolve_relative(relative);
                if !filename.is_file() {
                    return ImageDescriptor::default();
                }
                match self.backend.identify(&filename) {
                    Ok(dims) => ImageDescriptor {
                        path: normalize_separators(&filename.to_string_lossy()),
                        url: self.config.public_url(&filename),
                        width: dims.width,
                        height: dims.height,
                        mime: imaging::mime_type(&filename).unwrap_or_default().to_string(),
                    },
                    Err(err) => {
                        tracing::warn!("failed to identify image {}: {}", filename.display(), err);
                        ImageDescriptor::default()
                    }
                }
            }
            _ => ImageDescriptor::default(),
        }
    }

    /// Public URL for an image-like raw value. A collection resolves to
    /// its first element; anything unusable resolves to `""`.
    pub fn image_url(&self, value: &RawValue) -> String {
        let value = match value {
            RawValue::Images(list) => match list.first() {
                Some(asset) => RawValue::Image(asset.clone()),
                None => RawValue::Empty,
            },
            other => other.clone(),
        };
        self.image_info(&value, true).url
    }

    /// First image file in the configured fallback directory, identified
    /// through the backend. `Ok(None)` when no directory is configured,
    /// the directory is missing, or it holds no images.
    pub fn fallback_image(&self) -> Result<Option<ImageAsset>, BackendError> {
        let Some(relative) = &self.config.fallback_images else {
            return Ok(None);
        };
        let dir = self.config.resolve_relative(relative);
        if !dir.is_dir() {
            return Ok(None);
        }

        let first = WalkDir::new(&dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_file() && imaging::is_image_file(entry.path()));

        match first {
            Some(entry) => ImageAsset::load(self.backend.as_ref(), entry.path()).map(Some),
            None => Ok(None),
        }
    }

    fn scaled_or_original(&self, asset: &ImageAsset) -> ImageAsset {
        let params = ScaleParams {
            source: asset.path.clone(),
            width: self.config.og_image.width,
            height: self.config.og_image.height,
            upscaling: self.config.og_image.upscaling,
        };
        match self.backend.scale(&params) {
            Ok(scaled) => scaled,
            Err(err) => {
                tracing::warn!("failed to scale {}: {}", asset.path.display(), err);
                asset.clone()
            }
        }
    }
}
