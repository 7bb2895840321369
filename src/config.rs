//! Site configuration module.
//!
//! Handles loading and validating `metahead.toml`. Config files are sparse —
//! override just the values you want; unknown keys are rejected to catch
//! typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Required
//! root_path = "/var/www/site"        # Application root on the filesystem
//! base_url = "https://example.com/"  # Public URL the root maps to
//!
//! # Optional
//! fallback_images = "assets/og"      # Dir (relative to root) searched for
//!                                    # the default og:image, first file wins
//!
//! [og_image]                         # Target box for og:image scaling
//! width = 1200                       # (defaults shown)
//! height = 630
//! upscaling = true
//! ```
//!
//! ## Path ↔ URL mapping
//!
//! [`SiteConfig::public_url`] maps an absolute filesystem path under
//! `root_path` to its public URL by prefix substitution, normalizing
//! separators to `/` first. Paths outside the root pass through unchanged.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `metahead.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Application root on the filesystem. Relative image paths resolve
    /// against it; [`Self::public_url`] strips it.
    pub root_path: PathBuf,
    /// Public URL prefix the root path maps to.
    pub base_url: String,
    /// Directory (relative to the root) searched for the default
    /// `og:image` fallback. `None` disables the fallback entirely.
    pub fallback_images: Option<String>,
    /// Target box for og:image scaling.
    pub og_image: OgImageConfig,
}

/// OpenGraph image box. 1200×630 is the canonical og:image size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OgImageConfig {
    pub width: u32,
    pub height: u32,
    pub upscaling: bool,
}

impl Default for OgImageConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 630,
            upscaling: true,
        }
    }
}

impl SiteConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("root_path must be set".to_string()));
        }
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation("base_url must be set".to_string()));
        }
        if self.og_image.width == 0 || self.og_image.height == 0 {
            return Err(ConfigError::Validation(
                "og_image dimensions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Map an absolute filesystem path under the root to its public URL.
    ///
    /// Separators are normalized to `/` before the prefix substitution.
    /// Paths outside the root are returned unchanged (normalized).
    pub fn public_url(&self, path: &Path) -> String {
        let path = normalize_separators(&path.to_string_lossy());
        let mut root = normalize_separators(&self.root_path.to_string_lossy());
        if !root.ends_with('/') {
            root.push('/');
        }
        match path.strip_prefix(root.as_str()) {
            Some(rest) => {
                let mut url = self.base_url.trim_end_matches('/').to_string();
                url.push('/');
                url.push_str(rest);
                url
            }
            None => path,
        }
    }

    /// Resolve a path string relative to the root. A leading separator is
    /// stripped first, so `/assets/og/a.jpg` and `assets/og/a.jpg` mean
    /// the same file.
    pub fn resolve_relative(&self, relative: &str) -> PathBuf {
        let normalized = normalize_separators(relative);
        self.root_path.join(normalized.trim_start_matches('/'))
    }
}

/// Normalize path separators to `/`.
pub(crate) fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
