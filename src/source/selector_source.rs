use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use reqwest::Url;

use crate::selector::selector_model::{SelectorMap, SelectorsResponse};
use crate::source::error::GenerateError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const SELECTORS_PATH: &str = "/api/selectors";

// ============================================================================
// SelectorSource trait: the external generation service
// ============================================================================

/// Produces generated CSS selectors for a page URL.
pub trait SelectorSource {
    fn fetch(&self, url: &str) -> Result<SelectorMap, GenerateError>;
}

/// Decode a `GET /api/selectors` body.
pub fn parse_selectors_body(body: &str) -> Result<SelectorMap, GenerateError> {
    let parsed: SelectorsResponse =
        serde_json::from_str(body).map_err(|source| GenerateError::Decode {
            context: "css_selectors".to_string(),
            source,
        })?;
    Ok(parsed.css_selectors)
}

// ============================================================================
// HTTP backend
// ============================================================================

pub struct HttpSelectorSource {
    pub base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSelectorSource {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, GenerateError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| GenerateError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// `{base_url}/api/selectors?url=<target>`, with the target encoded.
    pub fn request_url(&self, target: &str) -> Result<Url, GenerateError> {
        let endpoint = format!("{}{}", self.base_url, SELECTORS_PATH);
        let mut url = Url::parse(&endpoint).map_err(|e| {
            GenerateError::Unavailable(format!("invalid API URL '{}': {}", endpoint, e))
        })?;
        url.query_pairs_mut().append_pair("url", target);
        Ok(url)
    }
}

impl SelectorSource for HttpSelectorSource {
    fn fetch(&self, target: &str) -> Result<SelectorMap, GenerateError> {
        let url = self.request_url(target)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| GenerateError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| GenerateError::Transport {
            url: url.to_string(),
            source,
        })?;

        parse_selectors_body(&body)
    }
}

// ============================================================================
// Mock backend (for testing without the generation service)
// ============================================================================

/// Canned responses keyed by target URL.
///
/// Records every requested URL so callers can assert on the traffic.
#[derive(Default)]
pub struct MockSelectorSource {
    responses: HashMap<String, SelectorMap>,
    fallback: Option<SelectorMap>,
    failure: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl MockSelectorSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `url` with `map`.
    pub fn with_response(mut self, url: &str, map: SelectorMap) -> Self {
        self.responses.insert(url.to_string(), map);
        self
    }

    /// Respond to `url` with the decoded JSON body.
    pub fn with_body(self, url: &str, body: &str) -> Result<Self, GenerateError> {
        let map = parse_selectors_body(body)?;
        Ok(self.with_response(url, map))
    }

    /// Response for any URL without a specific entry.
    pub fn with_fallback(mut self, map: SelectorMap) -> Self {
        self.fallback = Some(map);
        self
    }

    /// Fail every request with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// A small form used by the CLI `--source mock` option.
    pub fn demo() -> Self {
        let mut map = SelectorMap::new();
        map.insert("user_name".into(), "input[name='name']".into());
        map.insert("user_email".into(), "input[type='email']".into());
        map.insert("user_phone_number".into(), "input[type='tel']".into());
        map.insert("nextButton".into(), serde_json::Value::Null);
        Self::new().with_fallback(map)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SelectorSource for MockSelectorSource {
    fn fetch(&self, url: &str) -> Result<SelectorMap, GenerateError> {
        self.calls.borrow_mut().push(url.to_string());

        if let Some(message) = &self.failure {
            return Err(GenerateError::Unavailable(message.clone()));
        }

        self.responses
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| GenerateError::Status {
                url: url.to_string(),
                code: 404,
            })
    }
}
