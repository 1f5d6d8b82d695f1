//! In-memory stand-ins for a gossip membership engine.
//!
//! [`FakeMembershipClient`] records every join it receives and answers with
//! the seeds it was given, an injected failure, or after an injected delay.
//! Clones share state, so a test can keep a handle while the code under test
//! owns another.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use swimseed_node::{Channel, JoinError, JoinResult, MembershipBuilder, MembershipClient};

/// Arguments of one [`MembershipClient::join`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCall {
    /// Seeds passed to the join.
    pub seeds: Vec<String>,
    /// Deadline passed to the join.
    pub deadline: Duration,
}

#[derive(Debug, Default)]
struct ClientState {
    calls: Mutex<Vec<JoinCall>>,
    failure: Mutex<Option<JoinError>>,
    delay: Mutex<Option<Duration>>,
}

/// Membership client that records joins.
#[derive(Debug, Clone, Default)]
pub struct FakeMembershipClient {
    state: Arc<ClientState>,
}

impl FakeMembershipClient {
    /// A client whose joins succeed with every seed as a joined peer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose joins fail with `error`.
    #[must_use]
    pub fn failing(error: JoinError) -> Self {
        let client = Self::new();
        client.set_failure(Some(error));
        client
    }

    /// Makes every join sleep for `delay` (on the tokio clock) before answering.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.state.delay.lock() = Some(delay);
        self
    }

    /// Replaces the injected failure. `None` makes joins succeed again.
    pub fn set_failure(&self, error: Option<JoinError>) {
        *self.state.failure.lock() = error;
    }

    /// All joins received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<JoinCall> {
        self.state.calls.lock().clone()
    }

    /// Number of joins received so far.
    #[must_use]
    pub fn join_count(&self) -> usize {
        self.state.calls.lock().len()
    }
}

impl MembershipClient for FakeMembershipClient {
    async fn join(&self, seeds: &[String], deadline: Duration) -> Result<JoinResult, JoinError> {
        self.state.calls.lock().push(JoinCall { seeds: seeds.to_vec(), deadline });

        let delay = *self.state.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.state.failure.lock().clone();
        match failure {
            Some(error) => Err(error),
            None => Ok(JoinResult::from_peers(seeds.iter().cloned())),
        }
    }
}

/// Channel handle carrying a label so tests can check it was forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeChannel {
    label: String,
}

impl FakeChannel {
    /// Creates a channel labelled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }

    /// The channel's label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Channel for FakeChannel {}

/// Builder handing out clones of one shared [`FakeMembershipClient`].
#[derive(Debug, Clone, Default)]
pub struct FakeMembershipBuilder {
    client: FakeMembershipClient,
    builds: Arc<Mutex<Vec<(String, String)>>>,
    failure: Option<String>,
}

impl FakeMembershipBuilder {
    /// A builder whose clients accept every join.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that hands out clones of `client`.
    #[must_use]
    pub fn with_client(client: FakeMembershipClient) -> Self {
        Self { client, ..Self::default() }
    }

    /// A builder that refuses to create clients.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { failure: Some(message.into()), ..Self::default() }
    }

    /// The shared client.
    #[must_use]
    pub fn client(&self) -> &FakeMembershipClient {
        &self.client
    }

    /// `(cluster name, channel label)` of every build attempt, oldest first.
    #[must_use]
    pub fn builds(&self) -> Vec<(String, String)> {
        self.builds.lock().clone()
    }
}

impl MembershipBuilder<FakeChannel> for FakeMembershipBuilder {
    type Client = FakeMembershipClient;

    fn build(
        &self,
        cluster_name: &str,
        channel: FakeChannel,
    ) -> Result<FakeMembershipClient, JoinError> {
        self.builds.lock().push((cluster_name.to_string(), channel.label));
        match &self.failure {
            Some(message) => Err(JoinError::Client { message: message.clone() }),
            None => Ok(self.client.clone()),
        }
    }
}
