use clap::Parser;
use form_automation::cli::commands::{SessionOptions, cmd_generate, cmd_session};
use form_automation::cli::config::{
    Cli, Commands, default_log_filter, load_config, parse_policy, resolve_api_url,
    resolve_trace_path,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(cli.verbose)),
    )
    .init();

    let config = load_config(cli.config.as_deref());

    // CLI > config > env > defaults
    let api_url = resolve_api_url(cli.api_url.as_deref(), &config);
    let trace_path = resolve_trace_path(cli.trace.as_deref(), &config);
    let timeout = config.api.timeout();

    log::info!("selector service: {}", api_url);

    match cli.command {
        Commands::Generate { url, source } => {
            let ok = cmd_generate(&url, &source, &api_url, timeout, config.viewer.truncate_at)?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Session {
            source,
            script,
            format,
            policy,
        } => {
            let format = format.unwrap_or_else(|| config.viewer.format.clone());
            cmd_session(&SessionOptions {
                source_name: &source,
                api_url: &api_url,
                timeout,
                script: script.as_deref(),
                format: &format,
                truncate_at: config.viewer.truncate_at,
                policy: parse_policy(&policy),
                trace_path: trace_path.as_deref(),
            })?;
        }
    }

    Ok(())
}
