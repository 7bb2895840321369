//! Value store: per-tag maps of value-key → provider.
//!
//! Providers come in two shapes, modeled as an explicit tagged variant
//! instead of runtime callable-detection:
//!
//! - [`Provider::Literal`] — a plain value known up front
//! - [`Provider::Computed`] — a closure evaluated lazily against the engine
//!   (and through it, the active subject) on first access
//!
//! Raw values are likewise a closed set of variants ([`RawValue`]) rather
//! than a permissive dynamic object: text, numbers, image assets, image
//! collections, or nothing. Absent keys resolve to [`RawValue::Empty`],
//! never an error.
//!
//! The store merges per tag: setting a subset of keys never discards
//! previously set keys for that tag. Within a key, last write wins.

use crate::engine::{Seo, SeoError};
use crate::imaging::ImageAsset;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Default value-key used by the `{value}` placeholder and the
/// single-value setter shorthand.
pub const VALUE_KEY: &str = "value";

/// A raw (pre-string-conversion) value held or produced by a provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawValue {
    /// Plain text.
    Text(String),
    /// Integer value (image dimensions, counts).
    Number(i64),
    /// A loaded image asset.
    Image(ImageAsset),
    /// A collection of image assets; consumers take the first.
    Images(Vec<ImageAsset>),
    /// No value. Absent keys and empty lookups resolve to this.
    #[default]
    Empty,
}

impl RawValue {
    /// Default string coercion, used when a tag has no registered
    /// converter. Image values have no textual form without a converter
    /// and coerce to the empty string.
    pub fn display_string(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Image(_) | RawValue::Images(_) | RawValue::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n)
    }
}

impl From<u32> for RawValue {
    fn from(n: u32) -> Self {
        RawValue::Number(i64::from(n))
    }
}

impl From<ImageAsset> for RawValue {
    fn from(asset: ImageAsset) -> Self {
        RawValue::Image(asset)
    }
}

impl From<Option<String>> for RawValue {
    fn from(opt: Option<String>) -> Self {
        opt.map(RawValue::Text).unwrap_or_default()
    }
}

/// Computed provider signature: evaluated once per (tag, key) with the
/// engine, which gives access to the active subject and to other tags'
/// raw values.
pub type ComputeFn = dyn Fn(&Seo) -> Result<RawValue, SeoError>;

/// A value provider registered under a (tag, value-key) pair.
#[derive(Clone)]
pub enum Provider {
    /// A literal value, returned as-is.
    Literal(RawValue),
    /// A lazily computed value. Invoked at most once per (tag, key) per
    /// engine instance; the result is memoized by the raw value cache.
    Computed(Rc<ComputeFn>),
}

impl Provider {
    /// Literal provider from anything convertible to a raw value.
    pub fn value(v: impl Into<RawValue>) -> Self {
        Provider::Literal(v.into())
    }

    /// Computed provider from a closure.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Seo) -> Result<RawValue, SeoError> + 'static,
    {
        Provider::Computed(Rc::new(f))
    }
}

// Closures have no useful Debug form; show the variant only.
impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Provider::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Per-tag value entries: tag → value-key → provider.
#[derive(Default)]
pub struct ValueStore {
    entries: HashMap<String, HashMap<String, Provider>>,
}

impl ValueStore {
    /// Merge-set entries for a tag. Existing keys not named in `entries`
    /// are kept; named keys are overwritten.
    pub fn merge<K, I>(&mut self, tag: &str, entries: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Provider)>,
    {
        let map = self.entries.entry(tag.to_string()).or_default();
        for (key, provider) in entries {
            map.insert(key.into(), provider);
        }
    }

    /// Provider registered under (tag, key), if any.
    pub fn get(&self, tag: &str, key: &str) -> Option<&Provider> {
        self.entries.get(tag).and_then(|map| map.get(key))
    }

    /// Current merged entries for a tag. Empty map if none were set.
    pub fn values(&self, tag: &str) -> HashMap<String, Provider> {
        self.entries.get(tag).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn literal_text(provider: &Provider) -> &str {
        match provider {
            Provider::Literal(RawValue::Text(s)) => s,
            other => panic!("expected literal text, got {:?}", other),
        }
    }

    // =========================================================================
    // ValueStore merge semantics
    // =========================================================================

    #[test]
    fn merge_is_additive_across_keys() {
        let mut store = ValueStore::default();
        store.merge("t", [("a", Provider::value("1"))]);
        store.merge("t", [("b", Provider::value("2"))]);

        let values = store.values("t");
        assert_eq!(values.len(), 2);
        assert_eq!(literal_text(&values["a"]), "1");
        assert_eq!(literal_text(&values["b"]), "2");
    }

    #[test]
    fn merge_last_write_wins_per_key() {
        let mut store = ValueStore::default();
        store.merge("t", [("value", Provider::value("old"))]);
        store.merge("t", [("value", Provider::value("new"))]);

        assert_eq!(literal_text(store.get("t", "value").unwrap()), "new");
    }

    #[test]
    fn values_for_unset_tag_is_empty() {
        let store = ValueStore::default();
        assert!(store.values("nope").is_empty());
        assert!(store.get("nope", "value").is_none());
    }

    #[test]
    fn tags_are_independent() {
        let mut store = ValueStore::default();
        store.merge("a", [("value", Provider::value("x"))]);
        assert!(store.values("b").is_empty());
    }

    // =========================================================================
    // RawValue coercion
    // =========================================================================

    #[test]
    fn display_string_text_passthrough() {
        assert_eq!(RawValue::Text("hi".into()).display_string(), "hi");
    }

    #[test]
    fn display_string_numbers() {
        assert_eq!(RawValue::Number(630).display_string(), "630");
        assert_eq!(RawValue::Number(0).display_string(), "0");
    }

    #[test]
    fn display_string_empty_and_images() {
        assert_eq!(RawValue::Empty.display_string(), "");
        let asset = ImageAsset {
            path: PathBuf::from("/img/a.jpg"),
            width: 10,
            height: 10,
        };
        // Without a converter, image values have no textual form
        assert_eq!(RawValue::Image(asset.clone()).display_string(), "");
        assert_eq!(RawValue::Images(vec![asset]).display_string(), "");
    }

    #[test]
    fn from_option_none_is_empty() {
        assert_eq!(RawValue::from(None::<String>), RawValue::Empty);
        assert_eq!(
            RawValue::from(Some("t".to_string())),
            RawValue::Text("t".into())
        );
    }
}
