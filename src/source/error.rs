use std::fmt;

/// Failure of a Generate request.
///
/// Every variant is a fetch failure from the editor's point of view: the
/// editor resets its selector state and shows the `Display` text.
#[derive(Debug)]
pub enum GenerateError {
    /// Request never produced a response (connection refused, DNS, ...)
    Transport { url: String, source: reqwest::Error },

    /// Backend answered with a non-2xx status
    Status { url: String, code: u16 },

    /// Response body was not `{ "css_selectors": { ... } }`
    Decode { context: String, source: serde_json::Error },

    /// Canned failure from a non-HTTP source
    Unavailable(String),
}

impl GenerateError {
    /// Message shown to the user in the editor notification.
    pub fn user_message(&self) -> String {
        format!("Error fetching data: {}", self)
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Transport { url, source } => {
                write!(f, "request to {} failed: {}", url, source)
            }
            GenerateError::Status { url, code } => {
                write!(f, "Failed to fetch data ({} returned HTTP {})", url, code)
            }
            GenerateError::Decode { context, source } => {
                write!(f, "malformed selector response ({}): {}", context, source)
            }
            GenerateError::Unavailable(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Transport { source, .. } => Some(source),
            GenerateError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}
