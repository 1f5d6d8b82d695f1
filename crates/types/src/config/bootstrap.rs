use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Join deadline applied when `max_join_duration` is unset or zero.
pub const DEFAULT_MAX_JOIN_DURATION: Duration = Duration::from_secs(10);

/// Strategy used to find the initial seed peers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BootstrapMode {
    /// No mode configured. Never valid for use.
    #[default]
    None,
    /// Seeds are read from a JSON file.
    File,
    /// Seeds are listed inline in the configuration.
    Hosts,
}

impl BootstrapMode {
    /// Returns the canonical lowercase token for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::File => "file",
            Self::Hosts => "hosts",
        }
    }
}

impl FromStr for BootstrapMode {
    type Err = ConfigError;

    /// Parses a mode case-insensitively. Only `hosts` and `file` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hosts" => Ok(Self::Hosts),
            "file" => Ok(Self::File),
            _ => Err(ConfigError::InvalidBootstrapMode { value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for BootstrapMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BootstrapMode> for String {
    fn from(mode: BootstrapMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for BootstrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where seed peers come from, with the data each strategy needs.
///
/// This is the tagged form of the `(bootstrap_mode, bootstrap_file,
/// bootstrap_hosts)` triple: the invalid combinations cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverySource {
    /// A fixed, ordered list of peer addresses.
    Hosts(Vec<String>),
    /// A JSON file containing an array of peer addresses.
    File(PathBuf),
}

/// Membership bootstrap configuration.
///
/// Keys may be written in snake case or camel case (`bootstrapMode`). The
/// all-lowercase camel spellings are accepted too, since layered config
/// sources fold key case before deserializing.
///
/// # Validation Rules
///
/// - `name` must be non-empty
/// - `bootstrap_mode` must be `hosts` or `file`
/// - mode `file` requires a non-empty `bootstrap_file`
/// - mode `hosts` requires at least one entry in `bootstrap_hosts`
///
/// A zero `max_join_duration` is replaced by [`DEFAULT_MAX_JOIN_DURATION`]
/// once validation succeeds.
///
/// # Example
///
/// ```no_run
/// # use swimseed_types::config::{BootstrapConfig, BootstrapMode};
/// let config = BootstrapConfig::builder()
///     .name("svc")
///     .bootstrap_mode(BootstrapMode::Hosts)
///     .bootstrap_hosts(vec!["10.0.0.1:3000".to_string()])
///     .build()
///     .expect("valid bootstrap config");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BootstrapConfig {
    /// Cluster name shared by every member.
    #[serde(default)]
    pub name: String,
    /// Discovery strategy: `hosts` or `file` (case-insensitive).
    #[serde(default, alias = "bootstrapMode", alias = "bootstrapmode")]
    #[schemars(with = "String")]
    pub bootstrap_mode: BootstrapMode,
    /// JSON file listing seed addresses. Required when the mode is `file`.
    #[serde(
        default,
        alias = "bootstrapFile",
        alias = "bootstrapfile",
        skip_serializing_if = "Option::is_none"
    )]
    pub bootstrap_file: Option<PathBuf>,
    /// Seed addresses, in the order they should be tried. Required when the
    /// mode is `hosts`.
    #[serde(default, alias = "bootstrapHosts", alias = "bootstraphosts")]
    pub bootstrap_hosts: Vec<String>,
    /// Upper bound on a single join attempt. Zero selects the 10s default.
    #[serde(default, alias = "maxJoinDuration", alias = "maxjoinduration")]
    #[serde(with = "super::humantime_serde")]
    #[schemars(with = "String")]
    pub max_join_duration: Duration,
}

#[bon::bon]
impl BootstrapConfig {
    /// Creates a new bootstrap configuration with validation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] under the same rules as [`Self::validate`].
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        bootstrap_mode: BootstrapMode,
        #[builder(into)] bootstrap_file: Option<PathBuf>,
        #[builder(default)] bootstrap_hosts: Vec<String>,
        #[builder(default)] max_join_duration: Duration,
    ) -> Result<Self, ConfigError> {
        let config =
            Self { name, bootstrap_mode, bootstrap_file, bootstrap_hosts, max_join_duration };
        config.validated()
    }
}

impl BootstrapConfig {
    /// Validates the configuration and normalizes the join deadline.
    ///
    /// Call after deserialization. The config is only modified when every
    /// check passes; calling it again on a validated config is a no-op.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingField`] if `name` is empty
    /// - [`ConfigError::InvalidBootstrapMode`] if no mode is set
    /// - [`ConfigError::MissingBootstrapFile`] for mode `file` without a path
    /// - [`ConfigError::MissingBootstrapHosts`] for mode `hosts` without hosts
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingField { field: "name" });
        }
        match self.bootstrap_mode {
            BootstrapMode::File => {
                if self.bootstrap_file.as_ref().is_none_or(|path| path.as_os_str().is_empty()) {
                    return Err(ConfigError::MissingBootstrapFile);
                }
            },
            BootstrapMode::Hosts => {
                if self.bootstrap_hosts.is_empty() {
                    return Err(ConfigError::MissingBootstrapHosts);
                }
            },
            BootstrapMode::None => {
                return Err(ConfigError::InvalidBootstrapMode {
                    value: self.bootstrap_mode.to_string(),
                });
            },
        }
        if self.max_join_duration.is_zero() {
            self.max_join_duration = DEFAULT_MAX_JOIN_DURATION;
        }
        Ok(())
    }

    /// Consuming form of [`Self::validate`].
    ///
    /// # Errors
    ///
    /// See [`Self::validate`].
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Returns the seed source selected by `bootstrap_mode`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownBootstrapMode`] when no mode is set
    /// - [`ConfigError::MissingBootstrapFile`] for mode `file` without a path
    pub fn discovery_source(&self) -> Result<DiscoverySource, ConfigError> {
        match self.bootstrap_mode {
            BootstrapMode::Hosts => Ok(DiscoverySource::Hosts(self.bootstrap_hosts.clone())),
            BootstrapMode::File => self
                .bootstrap_file
                .clone()
                .map(DiscoverySource::File)
                .ok_or(ConfigError::MissingBootstrapFile),
            BootstrapMode::None => Err(ConfigError::UnknownBootstrapMode),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn hosts_config(hosts: &[&str]) -> BootstrapConfig {
        BootstrapConfig {
            name: "svc".to_string(),
            bootstrap_mode: BootstrapMode::Hosts,
            bootstrap_hosts: hosts.iter().map(|h| h.to_string()).collect(),
            ..BootstrapConfig::default()
        }
    }

    // =========================================================================
    // BootstrapMode parsing
    // =========================================================================

    #[test]
    fn test_parse_mode_is_case_insensitive() {
        for token in ["hosts", "HOSTS", "Hosts", "hOsTs"] {
            assert_eq!(token.parse::<BootstrapMode>().unwrap(), BootstrapMode::Hosts);
        }
        for token in ["file", "FILE", "File"] {
            assert_eq!(token.parse::<BootstrapMode>().unwrap(), BootstrapMode::File);
        }
    }

    #[test]
    fn test_parse_mode_rejects_unknown_tokens() {
        for token in ["bogus", "", "none", "dns", " hosts"] {
            let err = token.parse::<BootstrapMode>().unwrap_err();
            assert_eq!(err, ConfigError::InvalidBootstrapMode { value: token.to_string() });
        }
    }

    #[test]
    fn test_mode_deserializes_from_string() {
        let mode: BootstrapMode = serde_json::from_str("\"Hosts\"").unwrap();
        assert_eq!(mode, BootstrapMode::Hosts);

        let err = serde_json::from_str::<BootstrapMode>("\"bogus\"").unwrap_err();
        assert!(err.to_string().contains("invalid or no bootstrap mode"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn test_validate_hosts_config() {
        let mut config = hosts_config(&["10.0.0.1:3000", "10.0.0.2:3000"]);
        config.validate().expect("hosts config should be valid");
        assert_eq!(config.max_join_duration, DEFAULT_MAX_JOIN_DURATION);
    }

    #[test]
    fn test_validate_missing_name() {
        let mut config = hosts_config(&["x"]);
        config.name.clear();
        assert_eq!(config.validate(), Err(ConfigError::MissingField { field: "name" }));
    }

    #[test]
    fn test_validate_none_mode() {
        let mut config = BootstrapConfig { name: "svc".to_string(), ..Default::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBootstrapMode { .. }));
    }

    #[test]
    fn test_validate_file_mode_requires_path() {
        let mut config = BootstrapConfig {
            name: "svc".to_string(),
            bootstrap_mode: BootstrapMode::File,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MissingBootstrapFile));

        config.bootstrap_file = Some(PathBuf::new());
        assert_eq!(config.validate(), Err(ConfigError::MissingBootstrapFile));

        config.bootstrap_file = Some(PathBuf::from("/tmp/missing.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_hosts_mode_requires_hosts() {
        let mut config = hosts_config(&[]);
        assert_eq!(config.validate(), Err(ConfigError::MissingBootstrapHosts));
    }

    #[test]
    fn test_failed_validation_leaves_config_untouched() {
        let mut config = hosts_config(&[]);
        let before = config.clone();
        assert!(config.validate().is_err());
        assert_eq!(config, before);
        assert!(config.max_join_duration.is_zero());
    }

    #[test]
    fn test_explicit_join_duration_is_kept() {
        let mut config = hosts_config(&["x"]);
        config.max_join_duration = Duration::from_secs(3);
        config.validate().unwrap();
        assert_eq!(config.max_join_duration, Duration::from_secs(3));
    }

    #[test]
    fn test_builder_validates() {
        let config = BootstrapConfig::builder()
            .name("svc")
            .bootstrap_mode(BootstrapMode::File)
            .bootstrap_file("/etc/swimseed/hosts.json")
            .build()
            .expect("valid file config");
        assert_eq!(config.bootstrap_file, Some(PathBuf::from("/etc/swimseed/hosts.json")));
        assert_eq!(config.max_join_duration, DEFAULT_MAX_JOIN_DURATION);

        let result = BootstrapConfig::builder().name("").bootstrap_mode(BootstrapMode::Hosts).build();
        assert_eq!(result.unwrap_err(), ConfigError::MissingField { field: "name" });
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConfigError::MissingField { field: "name" }.to_string(),
            "membership config missing `name` param"
        );
        assert_eq!(ConfigError::UnknownBootstrapMode.to_string(), "unknown bootstrap mode");
    }

    // =========================================================================
    // Discovery source
    // =========================================================================

    #[test]
    fn test_discovery_source_per_mode() {
        let config = hosts_config(&["a:1", "b:2", "a:1"]);
        assert_eq!(
            config.discovery_source().unwrap(),
            DiscoverySource::Hosts(vec!["a:1".into(), "b:2".into(), "a:1".into()])
        );

        let config = BootstrapConfig {
            name: "svc".to_string(),
            bootstrap_mode: BootstrapMode::File,
            bootstrap_file: Some(PathBuf::from("seeds.json")),
            ..Default::default()
        };
        assert_eq!(
            config.discovery_source().unwrap(),
            DiscoverySource::File(PathBuf::from("seeds.json"))
        );

        let config = BootstrapConfig::default();
        assert_eq!(config.discovery_source(), Err(ConfigError::UnknownBootstrapMode));
    }

    // =========================================================================
    // Deserialization
    // =========================================================================

    #[test]
    fn test_deserialize_camel_case_keys() {
        let json = r#"{
            "name": "svc",
            "bootstrapMode": "HOSTS",
            "bootstrapHosts": ["10.0.0.1:3000", "10.0.0.2:3000"],
            "maxJoinDuration": "2s"
        }"#;
        let config: BootstrapConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bootstrap_mode, BootstrapMode::Hosts);
        assert_eq!(config.bootstrap_hosts.len(), 2);
        assert_eq!(config.max_join_duration, Duration::from_secs(2));
    }

    #[test]
    fn test_deserialize_case_folded_camel_keys() {
        let json = r#"{
            "name": "svc",
            "bootstrapmode": "file",
            "bootstrapfile": "/tmp/seeds.json",
            "maxjoinduration": 4
        }"#;
        let config: BootstrapConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.bootstrap_mode, BootstrapMode::File);
        assert_eq!(config.bootstrap_file, Some(PathBuf::from("/tmp/seeds.json")));
        assert_eq!(config.max_join_duration, Duration::from_secs(4));

        let config: BootstrapConfig =
            serde_json::from_str(r#"{"name": "svc", "bootstraphosts": ["a:1"]}"#).unwrap();
        assert_eq!(config.bootstrap_hosts, vec!["a:1"]);
    }

    #[test]
    fn test_deserialize_numeric_join_duration_as_seconds() {
        let config: BootstrapConfig = toml::from_str(
            r#"
name = "svc"
bootstrap_mode = "file"
bootstrap_file = "/tmp/seeds.json"
max_join_duration = 30
"#,
        )
        .unwrap();
        assert_eq!(config.max_join_duration, Duration::from_secs(30));
        assert_eq!(config.bootstrap_file, Some(PathBuf::from("/tmp/seeds.json")));
    }

    #[test]
    fn test_deserialize_without_mode_defaults_to_none() {
        let mut config: BootstrapConfig = serde_json::from_str(r#"{"name": "svc"}"#).unwrap();
        assert_eq!(config.bootstrap_mode, BootstrapMode::None);
        assert!(config.max_join_duration.is_zero());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBootstrapMode { .. })));
    }

    #[test]
    fn test_serialize_uses_humantime() {
        let config = hosts_config(&["x"]).validated().unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["bootstrap_mode"], "hosts");
        assert_eq!(value["max_join_duration"], "10s");
        assert!(value.get("bootstrap_file").is_none());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn arb_case_variant(word: &'static str) -> impl Strategy<Value = String> {
        proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
            word.chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
    }

    proptest! {
        /// Any casing of `hosts` parses to the hosts mode.
        #[test]
        fn prop_hosts_token_any_case(token in arb_case_variant("hosts")) {
            prop_assert_eq!(token.parse::<BootstrapMode>(), Ok(BootstrapMode::Hosts));
        }

        /// An empty name is rejected before any other field is looked at.
        #[test]
        fn prop_empty_name_always_missing_field(
            mode in prop::sample::select(vec![BootstrapMode::None, BootstrapMode::File, BootstrapMode::Hosts]),
            hosts in proptest::collection::vec("[a-z0-9.]{1,12}:[0-9]{1,5}", 0..4),
            file in proptest::option::of("[a-z/]{0,16}"),
            secs in 0u64..120,
        ) {
            let mut config = BootstrapConfig {
                name: String::new(),
                bootstrap_mode: mode,
                bootstrap_file: file.map(PathBuf::from),
                bootstrap_hosts: hosts,
                max_join_duration: Duration::from_secs(secs),
            };
            prop_assert_eq!(config.validate(), Err(ConfigError::MissingField { field: "name" }));
        }

        /// Normalizing twice yields the same config as normalizing once.
        #[test]
        fn prop_validate_is_idempotent(
            hosts in proptest::collection::vec("[a-z0-9.]{1,12}:[0-9]{1,5}", 1..6),
            secs in 0u64..120,
        ) {
            let mut config = BootstrapConfig {
                name: "svc".to_string(),
                bootstrap_mode: BootstrapMode::Hosts,
                bootstrap_file: None,
                bootstrap_hosts: hosts,
                max_join_duration: Duration::from_secs(secs),
            };
            config.validate().unwrap();
            let once = config.clone();
            config.validate().unwrap();
            prop_assert_eq!(&config, &once);
            prop_assert!(!config.max_join_duration.is_zero());
        }
    }
}
