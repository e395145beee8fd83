use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::editor::editor_model::EditorPhase;

/// One editor transition, written as a JSONL line.
#[derive(Debug, Serialize)]
pub struct EditorEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub phase: String,
    pub action: String,

    pub selector_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EditorEvent {
    pub fn now(step: u64, phase: EditorPhase, action: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            step,
            phase: format!("{:?}", phase),
            action: action.to_string(),
            selector_count: 0,
            url: None,
            message: None,
        }
    }

    pub fn with_selector_count(mut self, count: usize) -> Self {
        self.selector_count = count;
        self
    }

    pub fn with_url(mut self, url: impl ToString) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }
}
