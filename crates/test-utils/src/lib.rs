//! Shared test utilities for swimseed crates.
//!
//! - [`TestDir`] - Managed temporary directory with seed-file helpers
//! - [`FakeMembershipClient`], [`FakeMembershipBuilder`], [`FakeChannel`] -
//!   in-memory stand-ins for a gossip membership engine
//! - [`hosts_config`], [`file_config`] - Bootstrap configurations for tests
//! - [`strategies`] - Proptest generators for peer addresses and host lists

#![deny(unsafe_code)]

mod test_dir;
pub use test_dir::TestDir;

mod fakes;
pub use fakes::{FakeChannel, FakeMembershipBuilder, FakeMembershipClient, JoinCall};

mod config;
pub use config::{TEST_CLUSTER, file_config, hosts_config};

pub mod strategies;
