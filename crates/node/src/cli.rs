//! Command handlers for the `swimseed` binary.
//!
//! Each handler returns the text to print on stdout. Loading the config and
//! installing the log subscriber stay in `main`.

use snafu::{ResultExt, Snafu};
use swimseed_types::config::ConfigError;
use tracing::info;

use crate::{
    config::{self, Config, ConfigAction, LoadError},
    discovery::{DiscoveryError, select_provider},
};

/// Errors surfaced by the command-line tool.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    /// The configuration could not be loaded or is invalid.
    #[snafu(context(false), display("{source}"))]
    Load {
        /// Underlying load error.
        source: LoadError,
    },

    /// No discovery provider matches the configuration.
    #[snafu(display("config error: {source}"))]
    Provider {
        /// Underlying validation error.
        source: ConfigError,
    },

    /// The seed list could not be resolved.
    #[snafu(display("discovery error: {source}"))]
    Resolve {
        /// Underlying discovery error.
        source: DiscoveryError,
    },

    /// Output could not be rendered.
    #[snafu(display("render error: {message}"))]
    Render {
        /// Error description.
        message: String,
    },
}

/// Renders the output of `swimseed config <action>`.
///
/// # Errors
///
/// Returns [`CliError::Render`] if the schema or example cannot be serialized.
pub fn render_config_action(action: &ConfigAction) -> Result<String, CliError> {
    match action {
        ConfigAction::Schema => config::generate_config_schema()
            .map_err(|e| CliError::Render { message: e.to_string() }),
        ConfigAction::Example => config::generate_config_example()
            .map_err(|e| CliError::Render { message: e.to_string() }),
    }
}

/// Renders a validated config as TOML, with defaults applied.
///
/// # Errors
///
/// Returns [`CliError::Render`] if the config cannot be serialized.
pub fn render_check(config: &Config) -> Result<String, CliError> {
    info!(
        cluster = %config.membership.name,
        mode = %config.membership.bootstrap_mode,
        "Configuration is valid"
    );
    toml::to_string_pretty(config).map_err(|e| CliError::Render { message: e.to_string() })
}

/// Resolves the seed peers once and renders them as a JSON array.
///
/// # Errors
///
/// - [`CliError::Provider`] if no provider matches the mode
/// - [`CliError::Resolve`] if the seed list cannot be read
/// - [`CliError::Render`] if the list cannot be serialized
pub fn render_seeds(config: &Config) -> Result<String, CliError> {
    let provider = select_provider(&config.membership).context(ProviderSnafu)?;
    let seeds = provider.resolve().context(ResolveSnafu)?;
    info!(provider = %provider.kind(), seed_count = seeds.len(), "Resolved seed peers");
    serde_json::to_string_pretty(&seeds).map_err(|e| CliError::Render { message: e.to_string() })
}
