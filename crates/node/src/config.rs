//! Node configuration and command-line interface.
//!
//! Configuration is read from a TOML, YAML or JSON file and overridden by
//! environment variables with the `SWIMSEED` prefix and `__` as the nesting
//! separator (e.g. `SWIMSEED__MEMBERSHIP__BOOTSTRAP_MODE=file`). Host lists
//! given through the environment are comma-separated.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use swimseed_types::config::{BootstrapConfig, BootstrapMode, ConfigError};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SWIMSEED";

/// Log output format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON when stderr is not a terminal, text otherwise.
    #[default]
    Auto,
    /// Human-readable text.
    Text,
    /// JSON lines for log aggregation.
    Json,
}

/// Node configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Membership bootstrap settings.
    pub membership: BootstrapConfig,
}

/// Keys that may hold the bootstrap mode once the loader has folded key case.
const MODE_KEYS: [&str; 2] = ["membership.bootstrap_mode", "membership.bootstrapmode"];

impl Config {
    /// Load configuration from a file and the process environment.
    ///
    /// Without an explicit path, `./swimseed.*` and `/etc/swimseed/config.*`
    /// are tried and may both be absent. The result is not validated; see
    /// [`Config::validated`].
    ///
    /// # Errors
    ///
    /// - [`LoadError::Load`] if a source cannot be read
    /// - [`LoadError::Invalid`] if the bootstrap mode is not `hosts` or `file`
    /// - [`LoadError::Parse`] if the merged values do not fit [`Config`]
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        Self::load_from(path, None)
    }

    /// Like [`Config::load`], but overrides come from `vars` instead of the
    /// process environment. Keys are full variable names such as
    /// `SWIMSEED__MEMBERSHIP__NAME`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with_env<I, K, V>(path: Option<&Path>, vars: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> =
            vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::load_from(path, Some(vars))
    }

    fn load_from(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, LoadError> {
        let builder = config::Config::builder();

        let builder = if let Some(path) = path {
            builder.add_source(config::File::from(path))
        } else {
            builder
                .add_source(config::File::with_name("swimseed").required(false))
                .add_source(config::File::with_name("/etc/swimseed/config").required(false))
        };

        let builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("membership.bootstrap_hosts")
                .source(env),
        );

        let config = builder.build().map_err(|e| LoadError::Load { message: e.to_string() })?;
        check_mode(&config)?;

        config.try_deserialize().map_err(|e| LoadError::Parse { message: e.to_string() })
    }

    /// Validates the membership section, normalizing its join deadline.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Invalid`] with the validation failure.
    pub fn validated(mut self) -> Result<Self, LoadError> {
        self.membership.validate().context(InvalidSnafu)?;
        Ok(self)
    }

    /// [`Config::load`] followed by [`Config::validated`].
    ///
    /// # Errors
    ///
    /// Any error of either step.
    pub fn load_validated(path: Option<&Path>) -> Result<Self, LoadError> {
        Self::load(path)?.validated()
    }

    /// An example configuration using static hosts.
    #[must_use]
    pub fn example() -> Self {
        Self {
            log_format: LogFormat::Auto,
            membership: BootstrapConfig {
                name: "my-service".to_string(),
                bootstrap_mode: BootstrapMode::Hosts,
                bootstrap_file: None,
                bootstrap_hosts: vec!["10.0.0.1:3000".to_string(), "10.0.0.2:3000".to_string()],
                max_join_duration: swimseed_types::DEFAULT_MAX_JOIN_DURATION,
            },
        }
    }
}

/// Parses the raw mode string so an unknown mode is reported as
/// [`ConfigError::InvalidBootstrapMode`] rather than a serde message.
fn check_mode(config: &config::Config) -> Result<(), LoadError> {
    for key in MODE_KEYS {
        if let Ok(raw) = config.get_string(key) {
            raw.parse::<BootstrapMode>().context(InvalidSnafu)?;
        }
    }
    Ok(())
}

/// Renders the JSON schema of [`Config`].
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn generate_config_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}

/// Renders [`Config::example`] as TOML.
///
/// # Errors
///
/// Returns an error if the example cannot be serialized.
pub fn generate_config_example() -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&Config::example())
}

/// Configuration loading error.
#[derive(Debug, Snafu)]
pub enum LoadError {
    /// Failed to read a configuration source.
    #[snafu(display("failed to load config: {message}"))]
    Load {
        /// Error description.
        message: String,
    },
    /// The configuration does not have the expected shape.
    #[snafu(display("failed to parse config: {message}"))]
    Parse {
        /// Error description.
        message: String,
    },
    /// The membership section is not a usable bootstrap configuration.
    /// Carries the [`ConfigError`] unchanged.
    #[snafu(display("invalid membership config: {source}"))]
    Invalid {
        /// Validation failure.
        source: ConfigError,
    },
}

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "swimseed", version, about = "Gossip membership bootstrap tool")]
pub struct Cli {
    /// Path to a TOML, YAML or JSON configuration file.
    #[arg(long, short, env = "SWIMSEED_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log output format. Overrides `log_format` from the config file.
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Command to run.
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate the configuration and print it with defaults applied.
    Check,
    /// Resolve and print the seed peers as a JSON array.
    Seeds,
    /// Configuration helpers.
    Config {
        /// Action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the JSON schema of the configuration file.
    Schema,
    /// Print an example configuration file.
    Example,
}
