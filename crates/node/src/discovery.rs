//! Seed peer discovery.
//!
//! Discovery produces the initial list of peer addresses a node hands to the
//! membership engine when it joins. Two strategies exist:
//!
//! - [`StaticHosts`]: the addresses listed in `bootstrap_hosts`
//! - [`JsonFile`]: a JSON array of addresses read from `bootstrap_file`
//!
//! Providers are built per bootstrap attempt by [`select_provider`]. The JSON
//! file is read on every [`DiscoveryProvider::resolve`] call and never cached,
//! so operators can fix a broken file between attempts.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use snafu::{ResultExt, Snafu};
use swimseed_types::config::{BootstrapConfig, ConfigError, DiscoverySource};
use tracing::debug;

/// Identifies which strategy a provider implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Inline list from the configuration.
    StaticHosts,
    /// JSON file on disk.
    JsonFile,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticHosts => f.write_str("static_hosts"),
            Self::JsonFile => f.write_str("json_file"),
        }
    }
}

/// Resolves the seed peers used to join a cluster.
pub trait DiscoveryProvider: fmt::Debug + Send + Sync {
    /// Strategy implemented by this provider.
    fn kind(&self) -> ProviderKind;

    /// Returns the seed addresses, in the order they should be tried.
    ///
    /// An empty list is a valid answer; deciding what to do with it is up to
    /// the membership engine.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] if the backing resource cannot be read.
    fn resolve(&self) -> Result<Vec<String>, DiscoveryError>;
}

/// Discovery error types.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DiscoveryError {
    /// The hosts file could not be read.
    #[snafu(display("failed to read hosts file {}: {source}", path.display()))]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The hosts file is not a JSON array of strings.
    #[snafu(display("failed to parse hosts file {}: {source}", path.display()))]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Seed list fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHosts {
    hosts: Vec<String>,
}

impl StaticHosts {
    /// Creates a provider that always resolves to `hosts`, unchanged.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { hosts: hosts.into_iter().map(Into::into).collect() }
    }

    /// The configured addresses.
    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }
}

impl DiscoveryProvider for StaticHosts {
    fn kind(&self) -> ProviderKind {
        ProviderKind::StaticHosts
    }

    fn resolve(&self) -> Result<Vec<String>, DiscoveryError> {
        Ok(self.hosts.clone())
    }
}

/// Seed list stored as a JSON array in a file.
///
/// ```json
/// ["10.0.0.1:3000", "10.0.0.2:3000"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Creates a provider bound to `path`. The file is not touched until
    /// [`DiscoveryProvider::resolve`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this provider reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiscoveryProvider for JsonFile {
    fn kind(&self) -> ProviderKind {
        ProviderKind::JsonFile
    }

    fn resolve(&self) -> Result<Vec<String>, DiscoveryError> {
        let content = std::fs::read_to_string(&self.path).context(ReadSnafu { path: &self.path })?;
        let hosts: Vec<String> =
            serde_json::from_str(&content).context(ParseSnafu { path: &self.path })?;

        debug!(path = %self.path.display(), count = hosts.len(), "Loaded seed hosts from file");
        Ok(hosts)
    }
}

/// Builds the provider matching the configured bootstrap mode.
///
/// This is a pure mapping: nothing is read or contacted here.
///
/// # Errors
///
/// - [`ConfigError::UnknownBootstrapMode`] when no mode is set
/// - [`ConfigError::MissingBootstrapFile`] for mode `file` without a path
pub fn select_provider(config: &BootstrapConfig) -> Result<Box<dyn DiscoveryProvider>, ConfigError> {
    let provider = provider_for(config.discovery_source()?);
    debug!(
        cluster = %config.name,
        mode = %config.bootstrap_mode,
        provider = %provider.kind(),
        "Selected discovery provider"
    );
    Ok(provider)
}

/// Builds the provider for an already-resolved seed source.
#[must_use]
pub fn provider_for(source: DiscoverySource) -> Box<dyn DiscoveryProvider> {
    match source {
        DiscoverySource::Hosts(hosts) => Box::new(StaticHosts::new(hosts)),
        DiscoverySource::File(path) => Box::new(JsonFile::new(path)),
    }
}
