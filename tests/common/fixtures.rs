#![allow(dead_code)]

use form_automation::selector::selector_model::{Form, SelectorMap, SelectorPair};
use form_automation::source::selector_source::MockSelectorSource;
use serde_json::Value;

pub const CONTACT_URL: &str = "https://example.com/contact";

/// Build a selector map from a JSON object literal, keeping key order.
pub fn selector_map(json: &str) -> SelectorMap {
    match serde_json::from_str::<Value>(json).unwrap() {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

pub fn pair(label: &str, value: &str) -> SelectorPair {
    SelectorPair::new(label, value)
}

pub fn contact_source() -> MockSelectorSource {
    MockSelectorSource::new().with_response(CONTACT_URL, selector_map(r##"{"h1": ".title", "p": ""}"##))
}

pub fn sample_form(name: &str) -> Form {
    Form::new(
        name,
        CONTACT_URL,
        vec![pair("user_name", "#name"), pair("user_email", "#email")],
    )
}
