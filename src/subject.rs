//! The subject: the entity currently being rendered.
//!
//! Computed providers are evaluated in the context of a subject (a page,
//! a product, a post). The engine defines nothing about its shape beyond
//! field access by name — hosts implement [`Subject`] for whatever their
//! page type is.
//!
//! [`MapSubject`] is the string-map implementation used by the CLI (loaded
//! from a JSON object) and by tests.

use std::collections::HashMap;

/// Field access by name. That is the whole contract.
pub trait Subject {
    fn field(&self, name: &str) -> Option<String>;
}

/// Map-backed subject.
///
/// JSON scalar fields (strings, numbers, booleans) become string fields;
/// nested structures are ignored.
#[derive(Debug, Clone, Default)]
pub struct MapSubject {
    fields: HashMap<String, String>,
}

impl MapSubject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Parse a JSON object into a subject.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_json_value(&value))
    }

    pub fn from_json_value(value: &serde_json::Value) -> Self {
        let mut fields = HashMap::new();
        if let Some(object) = value.as_object() {
            for (name, field) in object {
                let text = match field {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                fields.insert(name.clone(), text);
            }
        }
        Self { fields }
    }
}

impl Subject for MapSubject {
    fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }
}
