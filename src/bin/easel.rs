//! Easel CLI Binary
//!
//! Command-line interface for the easel zone artwork generator.

use clap::Parser;
use easel::cli::{Cli, RunContext};
use easel::config::ConfigLoader;
use easel::logging::{init_logging, LoggingConfig};
use std::path::Path;
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Easel CLI starting");

    let mut context = match RunContext::new(cli.config.as_deref()) {
        Ok(ctx) => {
            info!("CLI context initialized");
            ctx
        }
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = context.apply_overrides(cli.assets_root.clone(), cli.concurrency) {
        error!("Invalid override: {}", e);
        eprintln!("{}", e);
        process::exit(1);
    }

    // Execute command
    match context.execute(&cli.command).await {
        Ok(output) => {
            info!("Command completed");
            println!("{}", output.text);
            if !output.success {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(Path::new("."))
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.level = "off".to_string();
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_logging_config_default() {
        let cli = Cli::try_parse_from(["easel", "list"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "info", "default level should be info");
        assert_eq!(config.output, "stderr", "default output should be stderr");
    }

    #[test]
    fn test_build_logging_config_quiet() {
        let cli = Cli::try_parse_from(["easel", "--quiet", "list"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "off", "quiet should silence logging");
    }

    #[test]
    fn test_build_logging_config_verbose() {
        let cli = Cli::try_parse_from(["easel", "--verbose", "list"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "debug", "verbose should set level to debug");
    }

    #[test]
    fn test_build_logging_config_explicit_level_wins_over_verbose() {
        let cli =
            Cli::try_parse_from(["easel", "--verbose", "--log-level", "warn", "list"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(
            config.level, "warn",
            "explicit --log-level should win over verbose"
        );
    }
}
