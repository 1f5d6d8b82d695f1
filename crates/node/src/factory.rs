//! Factory that turns a bootstrap configuration into joined membership clients.
//!
//! The factory validates its configuration once, up front. Each call to
//! [`BootstrapFactory::create_member`] then builds a fresh discovery provider,
//! creates a client over the caller's channel and joins the cluster.

use snafu::ResultExt;
use swimseed_types::config::{BootstrapConfig, ConfigError};
use tracing::debug;

use crate::{
    coordinator::{BootstrapError, ConfigSnafu, JoinSnafu, join_cluster},
    discovery::select_provider,
    membership::{Channel, JoinResult, MembershipBuilder},
};

/// A membership client that has joined its cluster.
#[derive(Debug)]
pub struct BootstrappedMember<M> {
    /// The joined client. Its lifecycle belongs to the caller from here on.
    pub client: M,
    /// Outcome of the join.
    pub joined: JoinResult,
}

/// Builds and bootstraps membership clients from a validated configuration.
#[derive(Debug, Clone)]
pub struct BootstrapFactory {
    config: BootstrapConfig,
}

impl BootstrapFactory {
    /// Validates `config` and creates a factory for it.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] produced by [`BootstrapConfig::validate`].
    pub fn new(config: BootstrapConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self { config })
    }

    /// The validated, normalized configuration.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Creates a client over `channel` and joins the cluster with it.
    ///
    /// The discovery provider is selected before the client is built, so a
    /// configuration problem never creates a client.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::Config`] if no provider matches the mode
    /// - [`BootstrapError::Join`] if the client cannot be built or the join fails
    /// - [`BootstrapError::Discovery`] if the seed list cannot be resolved
    pub async fn create_member<C, B>(
        &self,
        builder: &B,
        channel: C,
    ) -> Result<BootstrappedMember<B::Client>, BootstrapError>
    where
        C: Channel,
        B: MembershipBuilder<C>,
    {
        let provider = select_provider(&self.config).context(ConfigSnafu)?;
        let client = builder.build(&self.config.name, channel).context(JoinSnafu)?;
        debug!(cluster = %self.config.name, "Created membership client");

        let joined = join_cluster(&self.config, provider.as_ref(), &client).await?;
        Ok(BootstrappedMember { client, joined })
    }
}
