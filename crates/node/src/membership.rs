//! Capabilities consumed from the gossip membership engine.
//!
//! The engine itself (failure detection, dissemination, ring hashing) lives
//! outside this crate. Bootstrap only needs three things from it:
//! - a [`Channel`] handle to hand to the engine when a client is created
//! - a [`MembershipBuilder`] that turns `(cluster name, channel)` into a client
//! - a [`MembershipClient`] that performs a single join against seed peers

use std::{collections::BTreeSet, future::Future, time::Duration};

use snafu::Snafu;

/// Opaque transport handle owned by the caller.
///
/// Bootstrap never inspects a channel; it only forwards it to
/// [`MembershipBuilder::build`].
pub trait Channel: Send + Sync + 'static {}

/// A gossip membership client able to join a cluster.
pub trait MembershipClient: Send + Sync {
    /// Joins the cluster through the given seed peers.
    ///
    /// `deadline` is always a positive duration. Implementations should give
    /// up once it elapses; the coordinator abandons the call at that point
    /// regardless.
    fn join(
        &self,
        seeds: &[String],
        deadline: Duration,
    ) -> impl Future<Output = Result<JoinResult, JoinError>> + Send;
}

/// Creates membership clients bound to a transport channel.
pub trait MembershipBuilder<C: Channel> {
    /// The client type produced by this builder.
    type Client: MembershipClient;

    /// Creates a client for `cluster_name` that communicates over `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`JoinError::Client`] if the engine rejects the parameters.
    fn build(&self, cluster_name: &str, channel: C) -> Result<Self::Client, JoinError>;
}

/// Outcome of a successful join.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinResult {
    /// Peers this node exchanged membership with during the join.
    pub joined_peers: BTreeSet<String>,
}

impl JoinResult {
    /// Creates a result from the peers that acknowledged the join.
    pub fn from_peers<I, S>(peers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { joined_peers: peers.into_iter().map(Into::into).collect() }
    }

    /// Number of distinct peers joined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joined_peers.len()
    }

    /// True when the node joined without reaching any peer, which is the
    /// case for the first member of a new cluster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joined_peers.is_empty()
    }
}

/// Join failures reported by the membership engine.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum JoinError {
    /// The join did not finish before the deadline.
    #[snafu(display("join did not complete within {deadline:?}"))]
    Timeout {
        /// The deadline that elapsed.
        deadline: Duration,
    },

    /// Seed peers could not be reached.
    #[snafu(display("network error during join: {message}"))]
    Network {
        /// Error description.
        message: String,
    },

    /// The cluster refused this node.
    #[snafu(display("join rejected by cluster: {reason}"))]
    Rejected {
        /// Reason given by the cluster.
        reason: String,
    },

    /// The membership client could not be created.
    #[snafu(display("membership client could not be created: {message}"))]
    Client {
        /// Error description.
        message: String,
    },
}
