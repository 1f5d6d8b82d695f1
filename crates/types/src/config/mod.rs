//! Configuration types for swimseed.
//!
//! Configuration is loaded from files and environment variables by the node
//! crate. [`BootstrapConfig`] validates its values at construction time via a
//! fallible builder. Post-deserialization validation (and normalization of
//! the join deadline) is available via [`BootstrapConfig::validate`].

mod bootstrap;

pub use bootstrap::*;
use snafu::Snafu;

/// Configuration validation error.
///
/// Every variant is detected synchronously, before any file or network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum ConfigError {
    /// A required field is empty.
    #[snafu(display("membership config missing `{field}` param"))]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The bootstrap mode is absent or not one of `hosts` / `file`.
    #[snafu(display("invalid or no bootstrap mode: {value:?}"))]
    InvalidBootstrapMode {
        /// The rejected mode value as written by the operator.
        value: String,
    },

    /// `bootstrap_mode = "file"` without a `bootstrap_file`.
    #[snafu(display("membership config missing bootstrap file param"))]
    MissingBootstrapFile,

    /// `bootstrap_mode = "hosts"` without any `bootstrap_hosts`.
    #[snafu(display("membership config missing bootstrap hosts param"))]
    MissingBootstrapHosts,

    /// No discovery provider exists for the configured mode.
    #[snafu(display("unknown bootstrap mode"))]
    UnknownBootstrapMode,
}

/// Duration serialization using humantime format.
///
/// Deserialization also accepts a bare integer, read as whole seconds.
mod humantime_serde {
    use std::{fmt, time::Duration};

    use serde::{
        Deserializer, Serializer,
        de::{self, Visitor},
    };

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DurationVisitor)
    }

    struct DurationVisitor;

    impl Visitor<'_> for DurationVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a duration such as \"10s\" or a number of seconds")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Duration, E> {
            humantime::parse_duration(value.trim()).map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Duration, E> {
            Ok(Duration::from_secs(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Duration, E> {
            u64::try_from(value)
                .map(Duration::from_secs)
                .map_err(|_| E::custom(format!("duration must not be negative, got {value}")))
        }
    }
}
