//! Swimseed node library.
//!
//! Seed discovery and bootstrap coordination for gossip membership clients:
//! configuration loading, discovery providers, the single-attempt bootstrap
//! coordinator, and a factory that builds and joins clients.

#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod discovery;
pub mod factory;
pub mod membership;

pub use coordinator::{BootstrapError, ErrorClass, bootstrap};
pub use discovery::{
    DiscoveryError, DiscoveryProvider, JsonFile, ProviderKind, StaticHosts, select_provider,
};
pub use factory::{BootstrapFactory, BootstrappedMember};
pub use membership::{Channel, JoinError, JoinResult, MembershipBuilder, MembershipClient};
