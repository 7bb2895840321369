//! The metadata rendering engine.
//!
//! One [`Seo`] instance serves one rendering pass for one subject. It owns
//! three things:
//!
//! - a **template registry**: tag → markup string with `{key}` /
//!   `{key:N}` placeholders, rendered in registration order
//! - a **value store**: tag → value-key → provider (literal or lazily
//!   computed), merged per key so partial updates never discard siblings
//! - **two independent caches**: raw values (provider output, one
//!   invocation per (tag, key) per instance) and string values (after
//!   tag-specific conversion). The layers are separate so a caller can
//!   seed the string layer directly and skip raw resolution entirely.
//!
//! ## Resolution path
//!
//! `render` → `render_tag` → placeholder scan → [`Seo::string_value_for`]
//! → [`Seo::raw_for`] → value store / provider. Image-valued tags convert
//! to URLs through a registered **converter** — the per-tag extension
//! seam. `og:image` gets one at construction; hosts may register their own
//! without touching the caching contract.
//!
//! ## Caching contract
//!
//! A computed provider runs at most once per (tag, key) per instance —
//! even when its output would differ on a second call. This is a
//! compute-once contract, not a TTL cache: providers may do real work
//! (image scaling, file reads) and the engine promises to pay that cost
//! once. A provider error is *not* cached, so a later access may retry; a
//! provider that successfully returns nothing is cached as empty.
//!
//! Resolution takes `&self` (caches live behind `RefCell`), which is what
//! lets `Display` render and lets computed providers re-enter the engine
//! to read other tags — the default `og:image:width` provider re-resolves
//! `og:image`, for instance. The engine is single-threaded and
//! request-scoped; handles are `Rc`, and the type is deliberately `!Send`.

use crate::config::SiteConfig;
use crate::defaults;
use crate::image_info::ImageResolver;
use crate::imaging::{BackendError, ImageBackend};
use crate::subject::Subject;
use crate::template::{self, Segment};
use crate::truncate::truncate;
use crate::values::{Provider, RawValue, VALUE_KEY, ValueStore};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Identifying comment line prefixed to the full rendered output.
pub const RENDER_COMMENT: &str = "<!-- metahead -->";

#[derive(Error, Debug)]
pub enum SeoError {
    #[error("provider for tag `{tag}` key `{key}` failed: {source}")]
    Provider {
        tag: String,
        key: String,
        #[source]
        source: Box<SeoError>,
    },
    #[error("image backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-tag string conversion hook: raw value → final string. Registered
/// converters replace the default coercion for their tag.
pub type Converter = Rc<dyn Fn(&RawValue, &ImageResolver) -> String>;

/// Tag → markup templates, in registration order. The first `set` fixes a
/// tag's position; overwrites keep it.
#[derive(Default)]
struct TagRegistry {
    order: Vec<String>,
    markup: HashMap<String, String>,
}

impl TagRegistry {
    fn set(&mut self, tag: &str, markup: String) {
        if !self.markup.contains_key(tag) {
            self.order.push(tag.to_string());
        }
        self.markup.insert(tag.to_string(), markup);
    }

    fn markup(&self, tag: &str) -> &str {
        self.markup.get(tag).map(String::as_str).unwrap_or("")
    }
}

/// The engine. See the [module docs](self) for the architecture.
pub struct Seo {
    registry: TagRegistry,
    values: ValueStore,
    raw_cache: RefCell<HashMap<(String, String), RawValue>>,
    str_cache: RefCell<HashMap<(String, String), String>>,
    converters: HashMap<String, Converter>,
    images: ImageResolver,
    subject: Rc<dyn Subject>,
}

impl Seo {
    /// Build an engine for one subject and install the default tag set.
    /// Everything the installer seeds can be overridden afterwards
    /// through the public setters — later registration always wins.
    pub fn new(
        config: SiteConfig,
        backend: Rc<dyn ImageBackend>,
        subject: Rc<dyn Subject>,
    ) -> Self {
        let mut seo = Self {
            registry: TagRegistry::default(),
            values: ValueStore::default(),
            raw_cache: RefCell::new(HashMap::new()),
            str_cache: RefCell::new(HashMap::new()),
            converters: HashMap::new(),
            images: ImageResolver::new(config, backend),
            subject,
        };
        defaults::install(&mut seo);
        seo
    }

    /// The subject computed providers are evaluated against.
    pub fn subject(&self) -> &dyn Subject {
        self.subject.as_ref()
    }

    /// The image descriptor resolver (config + backend).
    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    // ============================================================================
    // Templates
    // ============================================================================

    /// Markup template for a tag, or `""` if unset.
    pub fn markup(&self, tag: &str) -> &str {
        self.registry.markup(tag)
    }

    /// Set (overwrite) a tag's markup template.
    pub fn set_markup(&mut self, tag: &str, markup: impl Into<String>) -> &mut Self {
        self.registry.set(tag, markup.into());
        self
    }

    /// All registered tags, in render order.
    pub fn tags(&self) -> &[String] {
        &self.registry.order
    }

    // ============================================================================
    // Values and conversion
    // ============================================================================

    /// Merge-set value entries for a tag. Named keys are overwritten,
    /// unnamed existing keys are kept.
    pub fn set_values<K, I>(&mut self, tag: &str, entries: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Provider)>,
    {
        self.values.merge(tag, entries);
        self
    }

    /// Set the provider for a tag's default `{value}` key.
    pub fn set_value(&mut self, tag: &str, provider: Provider) -> &mut Self {
        self.set_values(tag, [(VALUE_KEY, provider)])
    }

    /// Set one provider for the default key of several tags.
    pub fn set_value_each(&mut self, tags: &[&str], provider: Provider) -> &mut Self {
        for tag in tags {
            self.set_value(tag, provider.clone());
        }
        self
    }

    /// Shortcut: set one literal for both `title` and `og:title`.
    pub fn set_title(&mut self, value: impl Into<RawValue>) -> &mut Self {
        let value = value.into();
        self.set_value("title", Provider::Literal(value.clone()));
        self.set_value("og:title", Provider::Literal(value))
    }

    /// Current merged value entries for a tag. Empty map if none.
    pub fn values(&self, tag: &str) -> HashMap<String, Provider> {
        self.values.values(tag)
    }

    /// Replace the string conversion for a tag.
    pub fn set_converter<F>(&mut self, tag: &str, convert: F) -> &mut Self
    where
        F: Fn(&RawValue, &ImageResolver) -> String + 'static,
    {
        self.converters.insert(tag.to_string(), Rc::new(convert));
        self
    }

    /// Seed the string cache for (tag, key) directly, bypassing raw
    /// resolution for that slot entirely.
    pub fn set_string_value(
        &mut self,
        tag: &str,
        key: &str,
        value: impl Into<String>,
    ) -> &mut Self {
        self.str_cache
            .borrow_mut()
            .insert((tag.to_string(), key.to_string()), value.into());
        self
    }

    // ============================================================================
    // Lazy resolution
    // ============================================================================

    /// Raw value for a tag's default `{value}` key.
    pub fn raw(&self, tag: &str) -> Result<RawValue, SeoError> {
        self.raw_for(tag, VALUE_KEY)
    }

    /// Raw value for (tag, key). Computed providers run on first access
    /// only; the memoized result is returned afterwards. Provider errors
    /// propagate with (tag, key) context and are never cached.
    pub fn raw_for(&self, tag: &str, key: &str) -> Result<RawValue, SeoError> {
        let cache_key = (tag.to_string(), key.to_string());
        if let Some(cached) = self.raw_cache.borrow().get(&cache_key) {
            return Ok(cached.clone());
        }

        // Clone the provider handle out of the store so a computed
        // provider may re-enter the engine (og:image:width re-resolves
        // og:image through here)
        let provider = self.values.get(tag, key).cloned();
        let raw = match provider {
            None => RawValue::Empty,
            Some(Provider::Literal(value)) => value,
            Some(Provider::Computed(compute)) => {
                tracing::debug!("computing value for tag `{}` key `{}`", tag, key);
                compute(self).map_err(|source| SeoError::Provider {
                    tag: tag.to_string(),
                    key: key.to_string(),
                    source: Box::new(source),
                })?
            }
        };

        self.raw_cache.borrow_mut().insert(cache_key, raw.clone());
        Ok(raw)
    }

    /// String value for a tag's default `{value}` key.
    pub fn string_value(&self, tag: &str) -> Result<String, SeoError> {
        self.string_value_for(tag, VALUE_KEY)
    }

    /// String value for (tag, key): the raw value after the tag's
    /// conversion, memoized independently of the raw layer.
    pub fn string_value_for(&self, tag: &str, key: &str) -> Result<String, SeoError> {
        let cache_key = (tag.to_string(), key.to_string());
        if let Some(cached) = self.str_cache.borrow().get(&cache_key) {
            return Ok(cached.clone());
        }

        let raw = self.raw_for(tag, key)?;
        let string = match self.converters.get(tag) {
            Some(convert) => convert(&raw, &self.images),
            None => raw.display_string(),
        };

        self.str_cache.borrow_mut().insert(cache_key, string.clone());
        Ok(string)
    }

    // ============================================================================
    // Rendering
    // ============================================================================

    /// Render one tag: substitute every placeholder in its template.
    /// Unknown tags and keys resolve to empty strings; malformed
    /// placeholder syntax passes through verbatim.
    pub fn render_tag(&self, tag: &str) -> Result<String, SeoError> {
        let template = self.registry.markup(tag);
        let mut out = String::with_capacity(template.len());
        for segment in template::scan(template) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(placeholder) => {
                    let mut value = self.string_value_for(tag, placeholder.key)?;
                    if let Some(max) = placeholder.max_len {
                        value = truncate(&value, max);
                    }
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }

    /// Render all registered tags in registration order, prefixed by the
    /// identifying comment line. The top-level entry point.
    pub fn render(&self) -> Result<String, SeoError> {
        let mut out = String::from(RENDER_COMMENT);
        out.push_str("\n  ");
        for tag in &self.registry.order {
            out.push_str(&self.render_tag(tag)?);
            out.push_str("\n  ");
        }
        Ok(out)
    }
}

/// Best-effort render: errors from unguarded providers degrade to empty
/// output here. Callers that must observe them use [`Seo::render`].
impl fmt::Display for Seo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(out) => f.write_str(&out),
            Err(_) => Ok(()),
        }
    }
}
