use std::time::Duration;

use clap::Parser;
use form_automation::cli::commands::build_source;
use form_automation::cli::config::{
    AppConfig, Cli, Commands, default_log_filter, load_config, parse_policy, pick_api_url,
    resolve_trace_path,
};
use form_automation::editor::editor_model::GeneratePolicy;
use form_automation::source::selector_source::{DEFAULT_API_URL, SelectorSource};

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_generate_minimal() {
    let cli = Cli::parse_from(["form-automation", "generate", "--url", "https://example.com"]);
    match cli.command {
        Commands::Generate { url, source } => {
            assert_eq!(url, "https://example.com");
            assert_eq!(source, "http");
        }
        _ => panic!("Expected Generate command"),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.api_url.is_none());
}

#[test]
fn cli_parse_generate_mock_source() {
    let cli = Cli::parse_from([
        "form-automation",
        "generate",
        "--url",
        "https://example.com",
        "--source",
        "mock",
    ]);
    match cli.command {
        Commands::Generate { source, .. } => assert_eq!(source, "mock"),
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_parse_session_defaults() {
    let cli = Cli::parse_from(["form-automation", "session"]);
    match cli.command {
        Commands::Session {
            source,
            script,
            format,
            policy,
        } => {
            assert_eq!(source, "http");
            assert!(script.is_none());
            assert!(format.is_none());
            assert_eq!(policy, "last-response");
        }
        _ => panic!("Expected Session command"),
    }
}

#[test]
fn cli_parse_session_all_args() {
    let cli = Cli::parse_from([
        "form-automation",
        "session",
        "--source",
        "mock",
        "--script",
        "edits.txt",
        "--format",
        "yaml",
        "--policy",
        "latest-request",
    ]);
    match cli.command {
        Commands::Session {
            source,
            script,
            format,
            policy,
        } => {
            assert_eq!(source, "mock");
            assert_eq!(script.as_deref(), Some("edits.txt"));
            assert_eq!(format.as_deref(), Some("yaml"));
            assert_eq!(policy, "latest-request");
        }
        _ => panic!("Expected Session command"),
    }
}

#[test]
fn cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "form-automation",
        "session",
        "-vv",
        "--api-url",
        "http://scraper:9000",
        "--trace",
        "trace.jsonl",
        "--config",
        "custom.yaml",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.api_url.as_deref(), Some("http://scraper:9000"));
    assert_eq!(cli.trace.as_deref(), Some("trace.jsonl"));
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
}

#[test]
fn cli_generate_requires_url() {
    assert!(Cli::try_parse_from(["form-automation", "generate"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_defaults() {
    let config = AppConfig::default();
    assert!(config.api.base_url.is_none());
    assert!(config.api.timeout().is_none());
    assert_eq!(config.viewer.truncate_at, 48);
    assert_eq!(config.viewer.format, "console");
    assert!(config.trace.path.is_none());
}

#[test]
fn config_missing_file_gives_defaults() {
    let config = load_config(Some("/nonexistent/form-automation.yaml"));
    assert!(config.api.base_url.is_none());
    assert_eq!(config.viewer.truncate_at, 48);
}

#[test]
fn config_partial_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form-automation.yaml");
    std::fs::write(
        &path,
        "api:\n  base_url: http://scraper:9000\n  timeout_secs: 30\nviewer:\n  format: json\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.api.base_url.as_deref(), Some("http://scraper:9000"));
    assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.viewer.format, "json");
    assert_eq!(config.viewer.truncate_at, 48);
}

#[test]
fn config_malformed_yaml_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "api: [this is: not valid").unwrap();

    let config = load_config(path.to_str());
    assert!(config.api.base_url.is_none());
}

// ============================================================================
// Setting resolution
// ============================================================================

#[test]
fn api_url_cli_wins() {
    assert_eq!(
        pick_api_url(Some("http://cli"), Some("http://config"), Some("http://env")),
        "http://cli"
    );
}

#[test]
fn api_url_config_before_env() {
    assert_eq!(pick_api_url(None, Some("http://config"), Some("http://env")), "http://config");
    assert_eq!(pick_api_url(None, None, Some("http://env")), "http://env");
}

#[test]
fn api_url_default_and_blank_values() {
    assert_eq!(pick_api_url(None, None, None), DEFAULT_API_URL);
    assert_eq!(pick_api_url(Some("  "), None, Some("http://env")), "http://env");
}

#[test]
fn trace_path_cli_over_config() {
    let mut config = AppConfig::default();
    config.trace.path = Some("config.jsonl".into());
    assert_eq!(resolve_trace_path(Some("cli.jsonl"), &config).as_deref(), Some("cli.jsonl"));
    assert_eq!(resolve_trace_path(None, &config).as_deref(), Some("config.jsonl"));
    assert!(resolve_trace_path(None, &AppConfig::default()).is_none());
}

#[test]
fn policy_names() {
    assert_eq!(parse_policy("latest-request"), GeneratePolicy::LatestRequestOnly);
    assert_eq!(parse_policy("last-response"), GeneratePolicy::LastResponseWins);
    assert_eq!(parse_policy("bogus"), GeneratePolicy::LastResponseWins);
}

#[test]
fn log_filter_by_verbosity() {
    assert_eq!(default_log_filter(0), "warn");
    assert_eq!(default_log_filter(1), "info");
    assert_eq!(default_log_filter(3), "debug");
}

#[test]
fn build_source_by_name() {
    let mock = build_source("mock", DEFAULT_API_URL, None).unwrap();
    assert!(mock.fetch("https://any.test").is_ok());
    assert!(build_source("http", DEFAULT_API_URL, None).is_ok());
}
