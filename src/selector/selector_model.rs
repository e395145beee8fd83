use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Selector data model
// ============================================================================

/// One label naming a logical form field, paired with the CSS selector
/// addressing that field in the target page.
///
/// Neither field is unique within a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPair {
    pub label: String,
    pub value: String,
}

impl SelectorPair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// True when both fields are empty (the state of a cleared draft).
    pub fn is_blank(&self) -> bool {
        self.label.is_empty() && self.value.is_empty()
    }
}

/// A named, saved automation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    pub url: String,
    pub selectors: Vec<SelectorPair>,
}

impl Form {
    pub fn new(name: impl Into<String>, url: impl Into<String>, selectors: Vec<SelectorPair>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            selectors,
        }
    }
}

/// The `css_selectors` object returned by the generation backend.
///
/// Key order is the order the backend sent them in.
pub type SelectorMap = Map<String, Value>;

/// Response body of `GET /api/selectors`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectorsResponse {
    pub css_selectors: SelectorMap,
}

// ============================================================================
// Conversions
// ============================================================================

/// Render a selector value as the string stored in a pair.
///
/// `null` becomes the empty string; other non-string scalars keep their
/// JSON text.
pub fn selector_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Convert the backend's selector object into an ordered pair list.
pub fn pairs_from_map(map: &SelectorMap) -> Vec<SelectorPair> {
    map.iter()
        .map(|(label, value)| SelectorPair::new(label.clone(), selector_value_text(value)))
        .collect()
}

/// Autocomplete candidates for the label column: every key, in order.
pub fn label_suggestions(map: &SelectorMap) -> Vec<String> {
    map.keys().cloned().collect()
}

/// Autocomplete candidates for the value column: every non-empty value.
pub fn value_suggestions(map: &SelectorMap) -> Vec<String> {
    map.values()
        .filter(|v| is_truthy(v))
        .map(selector_value_text)
        .collect()
}

// Falsy selector values (null, "", false, 0) never become suggestions.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Array(_) | Value::Object(_) => true,
    }
}
