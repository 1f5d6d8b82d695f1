//! Proptest strategies for bootstrap inputs.
//!
//! # Usage
//!
//! ```no_run
//! use swimseed_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(hosts in strategies::arb_host_list(8)) {
//!         // test invariant with a random seed list
//!     }
//! }
//! ```

use proptest::prelude::*;

/// Generates an IPv4 `host:port` address.
pub fn arb_ipv4_address() -> impl Strategy<Value = String> {
    (any::<[u8; 4]>(), 1u16..=u16::MAX)
        .prop_map(|([a, b, c, d], port)| format!("{a}.{b}.{c}.{d}:{port}"))
}

/// Generates a DNS-style `name:port` address such as `node-3.ring.local:3000`.
pub fn arb_hostname_address() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9-]{0,11}", prop::sample::select(vec!["local", "internal", "svc"]), 1u16..=u16::MAX)
        .prop_map(|(host, domain, port)| format!("{host}.{domain}:{port}"))
}

/// Generates a peer address, either IPv4 or hostname based.
pub fn arb_peer_address() -> impl Strategy<Value = String> {
    prop_oneof![arb_ipv4_address(), arb_hostname_address()]
}

/// Generates 1 to `max` peer addresses. Duplicates are allowed.
pub fn arb_host_list(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_peer_address(), 1..=max.max(1))
}

/// Generates a non-empty cluster name.
pub fn arb_cluster_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,23}"
}

/// Generates `"hosts"` or `"file"` with arbitrary ASCII casing.
pub fn arb_mode_spelling() -> impl Strategy<Value = String> {
    (prop::sample::select(vec!["hosts", "file"]), proptest::collection::vec(any::<bool>(), 5))
        .prop_map(|(mode, upper)| {
            mode.chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn peer_addresses_have_a_port(addr in arb_peer_address()) {
            let (host, port) = addr.rsplit_once(':').unwrap_or_default();
            prop_assert!(!host.is_empty());
            prop_assert!(port.parse::<u16>().is_ok());
        }

        #[test]
        fn host_lists_are_never_empty(hosts in arb_host_list(4)) {
            prop_assert!(!hosts.is_empty());
            prop_assert!(hosts.len() <= 4);
        }

        #[test]
        fn mode_spellings_parse(spelling in arb_mode_spelling()) {
            let mode: swimseed_types::BootstrapMode = spelling.parse().unwrap_or_default();
            prop_assert_ne!(mode, swimseed_types::BootstrapMode::None);
        }
    }
}
