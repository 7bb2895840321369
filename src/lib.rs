//! # Metahead
//!
//! A templated SEO/OpenGraph meta tag rendering engine for static sites.
//! Register markup templates and value providers per tag, then render the
//! whole head block in one call — lazy values are computed once, cached,
//! and substituted into `{key}` / `{key:N}` placeholders.
//!
//! # Architecture: Two-Level Indirection
//!
//! Templates and values are independent layers joined at render time:
//!
//! ```text
//! tag ──► markup template ──► {key} placeholders
//!                                  │
//! tag ──► value providers ──► raw value ──► string value ──► substitution
//!                 (lazy, cached)      (converted, cached)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Overridability**: a host can swap a tag's markup without touching
//!   its value, or vice versa — later registration always wins, defaults
//!   included.
//! - **Laziness**: values may cost real work (image scaling, file reads).
//!   Providers run only when a placeholder actually needs them, and at
//!   most once per engine instance.
//! - **Seedability**: the string layer caches independently of the raw
//!   layer, so precomputed strings can bypass resolution entirely.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The [`Seo`](engine::Seo) engine — registry, caches, lazy resolution, rendering |
//! | [`values`] | Raw values, providers (literal / computed), the per-tag value store |
//! | [`template`] | Placeholder micro-syntax lexer (`{key}`, `{key:N}`) |
//! | [`truncate`] | Word-safe, markup-aware truncation for length modifiers |
//! | [`image_info`] | Image descriptor resolution — asset or path string → {path, url, width, height, mime} |
//! | [`imaging`] | Pixel collaborator behind a trait: identify + scale, pure-Rust backend |
//! | [`config`] | `metahead.toml` loading, validation, path ↔ URL mapping |
//! | [`subject`] | The opaque "current subject" trait + map/JSON implementation |
//!
//! # Design Decisions
//!
//! ## Compute-Once Caching
//!
//! A computed provider runs at most once per (tag, key) per engine
//! instance — deliberately, even when its output would differ on a second
//! call. One engine instance serves one rendering pass for one subject;
//! caches die with the instance. There is no TTL and no invalidation,
//! which keeps repeated `render()` calls byte-identical and makes the
//! cost model trivial to reason about.
//!
//! ## Runtime String Templates Over a Template Engine
//!
//! Tag markup is a plain runtime string with a two-form placeholder
//! syntax, not a compile-time template. Hosts override templates per tag
//! at runtime (a CMS settings screen, a per-section config), so the
//! templates cannot be baked into the binary, and the micro-syntax is
//! small enough that a hand-rolled lexer beats a templating dependency.
//!
//! ## Never-Fail Rendering Zones
//!
//! A missing fallback image, an unknown placeholder key, or a malformed
//! placeholder must not take down a page render. Those paths degrade to
//! empty values (or verbatim pass-through) with a `tracing` warning where
//! something actually went wrong. Custom provider failures, by contrast,
//! propagate — global suppression would hide real configuration bugs.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] backend uses the `image` crate (Lanczos3 resampling)
//! — no ImageMagick, no system dependencies. Scaled og:image variants are
//! written next to their source and reused across renders.

pub mod config;
pub mod engine;
pub mod image_info;
pub mod imaging;
pub mod subject;
pub mod template;
pub mod truncate;
pub mod values;

mod defaults;
