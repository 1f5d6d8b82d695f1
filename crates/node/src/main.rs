//! Swimseed command-line tool.
//!
//! Inspects a membership bootstrap configuration without joining a cluster.
//!
//! # Usage
//!
//! ```bash
//! # Validate a config file and print it with defaults applied
//! swimseed --config /etc/swimseed/config.toml check
//!
//! # Resolve the seed peers a node would join through
//! SWIMSEED__MEMBERSHIP__BOOTSTRAP_MODE=hosts \
//! SWIMSEED__MEMBERSHIP__BOOTSTRAP_HOSTS=10.0.0.1:3000,10.0.0.2:3000 \
//! SWIMSEED__MEMBERSHIP__NAME=my-service \
//! swimseed seeds
//!
//! # Print the configuration schema
//! swimseed config schema
//! ```

use std::{io::IsTerminal, path::Path};

use clap::Parser;
use swimseed_node::{
    cli::{self, CliError},
    config::{Cli, CliCommand, Config, LogFormat},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), CliError> {
    let args = Cli::parse();
    let path = args.config.as_deref();

    let output = match &args.command {
        CliCommand::Config { action } => cli::render_config_action(action)?,
        CliCommand::Check => cli::render_check(&load_config(path, args.log_format)?)?,
        CliCommand::Seeds => cli::render_seeds(&load_config(path, args.log_format)?)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}

/// Loads and validates the config, then installs logging from it.
fn load_config(path: Option<&Path>, log_format: Option<LogFormat>) -> Result<Config, CliError> {
    let config = Config::load_validated(path)?;
    init_logging(log_format.unwrap_or(config.log_format));
    Ok(config)
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = match format {
        LogFormat::Json => true,
        LogFormat::Text => false,
        LogFormat::Auto => !std::io::stderr().is_terminal(),
    };

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
