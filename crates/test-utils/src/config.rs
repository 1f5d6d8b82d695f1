//! Bootstrap configurations for tests.

use std::path::PathBuf;

use swimseed_types::{BootstrapConfig, BootstrapMode};

/// Cluster name used by the config helpers.
pub const TEST_CLUSTER: &str = "test-cluster";

/// A `hosts` mode configuration for [`TEST_CLUSTER`] with a zero deadline,
/// so validation applies the default.
pub fn hosts_config(hosts: &[&str]) -> BootstrapConfig {
    BootstrapConfig {
        name: TEST_CLUSTER.to_string(),
        bootstrap_mode: BootstrapMode::Hosts,
        bootstrap_hosts: hosts.iter().map(|h| (*h).to_string()).collect(),
        ..BootstrapConfig::default()
    }
}

/// A `file` mode configuration for [`TEST_CLUSTER`] reading `path`.
pub fn file_config(path: impl Into<PathBuf>) -> BootstrapConfig {
    BootstrapConfig {
        name: TEST_CLUSTER.to_string(),
        bootstrap_mode: BootstrapMode::File,
        bootstrap_file: Some(path.into()),
        ..BootstrapConfig::default()
    }
}
