//! Imaging backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the metadata
//! engine needs from pixel-land: identify (read dimensions) and scale
//! (produce a fitted variant). The engine never touches pixels itself —
//! everything behind this trait is an opaque collaborator, which keeps the
//! resolver logic testable with a recording mock.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, no
//! external binaries.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A loaded image asset: a file on disk plus its pixel dimensions.
///
/// This is the normalized form of "an already-loaded image" — the engine
/// carries assets by value and asks the backend for variants rather than
/// holding decoded pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ImageAsset {
    /// Load an asset by identifying the file at `path`.
    pub fn load(backend: &dyn ImageBackend, path: &Path) -> Result<Self, BackendError> {
        let dims = backend.identify(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            width: dims.width,
            height: dims.height,
        })
    }
}

/// Parameters for a scale operation: fit `source` into a `width`×`height`
/// box, covering it fully (center-crop semantics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleParams {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Whether a source smaller than the box may be enlarged. When off,
    /// an undersized source is returned as-is.
    pub upscaling: bool,
}

/// Trait for imaging backends.
///
/// No `Sync` bound: the engine is single-threaded and request-scoped, and
/// backends are shared through `Rc`.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Produce a scaled variant of the source image.
    fn scale(&self, params: &ScaleParams) -> Result<ImageAsset, BackendError>;
}
