//! Run-scoped execution context and URL placeholder substitution
//!
//! Context keys are dotted (`createPerson.id`); only the last segment is
//! used as the placeholder name, so `createPerson.id` fills `{id}`.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Matches `{name}` tokens left in a URL
static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").unwrap());

/// Values harvested from earlier step responses, keyed by context key
///
/// Keys keep the position of their first insertion; overwriting a key
/// replaces the value in place.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    values: IndexMap<String, String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value; later writes to the same key win
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Whether a required name is satisfied by the parameters or the context
    ///
    /// A context key counts when it matches exactly or when its placeholder
    /// name does, so `createPerson.id` satisfies `id`.
    pub fn satisfies(&self, name: &str, parameters: &HashMap<String, String>) -> bool {
        parameters.contains_key(name)
            || self.contains(name)
            || self.values.keys().any(|key| placeholder_name(key) == name)
    }

    /// Fill `{name}` tokens in a URL template
    ///
    /// Context values are applied first in insertion order, so when two keys
    /// share a placeholder name the one harvested earliest fills the token.
    /// Caller parameters then fill whatever tokens remain.
    pub fn substitute(&self, template: &str, parameters: &HashMap<String, String>) -> String {
        let mut url = template.to_string();

        for (key, value) in &self.values {
            let token = format!("{{{}}}", placeholder_name(key));
            url = url.replace(&token, value);
        }

        for (key, value) in parameters {
            let token = format!("{{{}}}", key);
            url = url.replace(&token, value);
        }

        url
    }
}

/// Last `.`-separated segment of a context key
pub fn placeholder_name(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// Placeholder names still present in a URL, in order of appearance
pub fn unresolved_placeholders(url: &str) -> Vec<String> {
    PLACEHOLDER_PATTERN
        .captures_iter(url)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// String form of a harvested response field; `None` for null
pub fn value_to_context_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
