//! Bootstrap coordination for joining a gossip cluster.
//!
//! [`bootstrap`] drives a single join attempt:
//!
//! 1. Validate the configuration (normalizing the join deadline)
//! 2. Select the discovery provider for the configured mode
//! 3. Resolve the seed peers once
//! 4. Call the membership client's join, bounded by `max_join_duration`
//! 5. Hand the outcome back unchanged
//!
//! Failures in steps 1-2 are configuration errors and happen before any I/O.
//! Failures in steps 3-4 are operational; the caller decides whether to run
//! the whole bootstrap again. Nothing here retries.

use std::time::Duration;

use snafu::{ResultExt, Snafu};
use swimseed_types::config::{BootstrapConfig, ConfigError};
use tracing::{debug, info, warn};

use crate::{
    discovery::{DiscoveryError, DiscoveryProvider, select_provider},
    membership::{JoinError, JoinResult, MembershipClient},
};

/// Broad category of a bootstrap failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The configuration is unusable. Retrying without changing it cannot help.
    Configuration,
    /// File, network or timeout failure. The bootstrap may be retried.
    Operational,
}

/// Errors that can occur during bootstrap.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BootstrapError {
    /// Configuration validation or provider selection failed.
    #[snafu(display("invalid bootstrap configuration: {source}"))]
    Config {
        /// Underlying validation error.
        source: ConfigError,
    },

    /// Seed peers could not be resolved.
    #[snafu(display("seed discovery failed: {source}"))]
    Discovery {
        /// Underlying discovery error.
        source: DiscoveryError,
    },

    /// The membership client failed to join.
    #[snafu(display("cluster join failed: {source}"))]
    Join {
        /// Error reported by the membership engine.
        source: JoinError,
    },
}

impl BootstrapError {
    /// Returns the failure category.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Config { .. } => ErrorClass::Configuration,
            Self::Discovery { .. } | Self::Join { .. } => ErrorClass::Operational,
        }
    }

    /// Whether running the bootstrap again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Operational
    }
}

/// Joins the cluster described by `config` using `client`.
///
/// The config is validated on a copy, so the caller's value is never
/// modified. Exactly one join is attempted per call.
///
/// # Errors
///
/// - [`BootstrapError::Config`] if validation or provider selection fails
/// - [`BootstrapError::Discovery`] if the seed list cannot be resolved
/// - [`BootstrapError::Join`] if the join fails or exceeds the deadline
pub async fn bootstrap<M>(config: &BootstrapConfig, client: &M) -> Result<JoinResult, BootstrapError>
where
    M: MembershipClient,
{
    let config = config.clone().validated().context(ConfigSnafu)?;
    let provider = select_provider(&config).context(ConfigSnafu)?;
    join_cluster(&config, provider.as_ref(), client).await
}

/// Resolves seeds from `provider` and performs one bounded join.
///
/// `config` must already be validated so the deadline is positive.
pub(crate) async fn join_cluster<M>(
    config: &BootstrapConfig,
    provider: &dyn DiscoveryProvider,
    client: &M,
) -> Result<JoinResult, BootstrapError>
where
    M: MembershipClient,
{
    let seeds = provider.resolve().context(DiscoverySnafu)?;
    let deadline = config.max_join_duration;

    info!(
        cluster = %config.name,
        provider = %provider.kind(),
        seed_count = seeds.len(),
        deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        "Starting cluster join"
    );
    debug!(seeds = ?seeds, "Resolved seed peers");

    match join_with_deadline(client, &seeds, deadline).await {
        Ok(joined) => {
            info!(
                cluster = %config.name,
                joined_count = joined.len(),
                "Joined cluster"
            );
            Ok(joined)
        },
        Err(e) => {
            warn!(cluster = %config.name, error = %e, "Cluster join failed");
            Err(BootstrapError::Join { source: e })
        },
    }
}

/// Runs `client.join`, abandoning it once `deadline` elapses.
async fn join_with_deadline<M>(
    client: &M,
    seeds: &[String],
    deadline: Duration,
) -> Result<JoinResult, JoinError>
where
    M: MembershipClient,
{
    match tokio::time::timeout(deadline, client.join(seeds, deadline)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(JoinError::Timeout { deadline }),
    }
}
