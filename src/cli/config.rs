use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::editor::editor_model::GeneratePolicy;
use crate::source::selector_source::DEFAULT_API_URL;
use crate::viewer::console::DEFAULT_TRUNCATE_AT;

pub const DEFAULT_CONFIG_PATH: &str = "form-automation.yaml";
pub const API_URL_ENV: &str = "FORM_AUTOMATION_API_URL";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-automation",
    version,
    about = "Generate, edit and collect CSS selectors for form automation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the selector generation service
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Append editor events to this JSONL file
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: form-automation.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request generated selectors for a URL and print them
    Generate {
        /// Page to generate selectors for
        #[arg(long)]
        url: String,

        /// Selector source: http or mock
        #[arg(long, default_value = "http")]
        source: String,
    },

    /// Interactive editing session: generate, edit and save forms
    Session {
        /// Selector source: http or mock
        #[arg(long, default_value = "http")]
        source: String,

        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<String>,

        /// Output format for the saved forms at exit: console, json, yaml
        #[arg(long)]
        format: Option<String>,

        /// Overlapping generate requests: last-response or latest-request
        #[arg(long, default_value = "last-response")]
        policy: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-automation.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,

    /// Absent means requests wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_truncate_at")]
    pub truncate_at: usize,

    #[serde(default = "default_console")]
    pub format: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            truncate_at: DEFAULT_TRUNCATE_AT,
            format: "console".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

fn default_truncate_at() -> usize { DEFAULT_TRUNCATE_AT }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed config '{}': {}", config_path, e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Setting resolution: CLI > config > env > defaults
// ============================================================================

pub fn resolve_api_url(cli: Option<&str>, config: &AppConfig) -> String {
    let env = std::env::var(API_URL_ENV).ok();
    pick_api_url(cli, config.api.base_url.as_deref(), env.as_deref())
}

pub fn pick_api_url(cli: Option<&str>, config: Option<&str>, env: Option<&str>) -> String {
    [cli, config, env]
        .into_iter()
        .flatten()
        .find(|u| !u.trim().is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

pub fn resolve_trace_path(cli: Option<&str>, config: &AppConfig) -> Option<String> {
    cli.map(str::to_string).or_else(|| config.trace.path.clone())
}

/// Parse a `--policy` value. Unknown names fall back to the default.
pub fn parse_policy(name: &str) -> GeneratePolicy {
    match name {
        "latest-request" => GeneratePolicy::LatestRequestOnly,
        "last-response" => GeneratePolicy::LastResponseWins,
        other => {
            log::warn!("unknown generate policy '{}', using last-response", other);
            GeneratePolicy::default()
        }
    }
}

/// Log filter implied by `-v` count when RUST_LOG is unset.
pub fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
