//! Key layout configuration.
//!
//! The defaults reproduce the conventional layout (`Person:all`,
//! `Person:city:NYC`, `~Person:all+...`, `...#age`). Deployments sharing a
//! store with other tooling can override individual markers from TOML.

use crate::{
    error::{ErrorClass, ErrorOrigin},
    key::may_appear_encoded,
    store::{SORT_FIELD_MARKER, SORT_WILDCARD},
};
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// KeyConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KeyConfig {
    /// Separator between key segments.
    pub separator: String,
    /// Final segment of the "all identifiers" set.
    pub all_suffix: String,
    /// Prefix marking a derived intersection key.
    pub composite_prefix: String,
    /// Join between constituent keys of an intersection.
    pub composite_join: String,
    /// Marker between a source key and its materialized ordering.
    pub order_marker: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            separator: ":".to_string(),
            all_suffix: "all".to_string(),
            composite_prefix: "~".to_string(),
            composite_join: "+".to_string(),
            order_marker: "#".to_string(),
        }
    }
}

impl KeyConfig {
    /// Parse a TOML document; omitted fields keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let delimiters = [
            ("separator", &self.separator),
            ("composite_join", &self.composite_join),
            ("order_marker", &self.order_marker),
        ];
        let segments = [
            ("all_suffix", &self.all_suffix),
            ("composite_prefix", &self.composite_prefix),
        ];

        for &(name, marker) in delimiters.iter().chain(&segments) {
            if marker.is_empty() && name != "composite_prefix" {
                return Err(ConfigError::EmptyMarker(name));
            }
            if marker.contains(SORT_WILDCARD) || marker.contains(SORT_FIELD_MARKER) {
                return Err(ConfigError::ReservedMarker(name));
            }
        }

        // a delimiter must not be producible by an encoded value
        for (name, marker) in delimiters {
            if marker.bytes().all(may_appear_encoded) {
                return Err(ConfigError::AmbiguousMarker(name));
            }
        }

        Ok(())
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid key config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("key config marker '{0}' must not be empty")]
    EmptyMarker(&'static str),

    #[error("key config marker '{0}' must not contain the sort pattern syntax '*' or '->'")]
    ReservedMarker(&'static str),

    #[error("key config marker '{0}' needs a character outside [A-Za-z0-9._%-]")]
    AmbiguousMarker(&'static str),
}

impl ConfigError {
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::InvalidArgument
    }

    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = KeyConfig::from_toml("").expect("empty config should parse");
        assert_eq!(config, KeyConfig::default());
    }

    #[test]
    fn overrides_keep_unspecified_defaults() {
        let config = KeyConfig::from_toml(
            r#"
            separator = "/"
            order_marker = "@"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.separator, "/");
        assert_eq!(config.order_marker, "@");
        assert_eq!(config.all_suffix, "all");
        assert_eq!(config.composite_join, "+");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = KeyConfig::from_toml("sepparator = \"/\"").expect_err("typo should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_markers_are_rejected() {
        let err = KeyConfig::from_toml("separator = \"\"").expect_err("empty separator");
        assert!(matches!(err, ConfigError::EmptyMarker("separator")));
        assert_eq!(err.origin(), ErrorOrigin::Config);
    }

    #[test]
    fn empty_composite_prefix_is_allowed() {
        let config = KeyConfig::from_toml("composite_prefix = \"\"").expect("config should parse");
        assert_eq!(config.composite_prefix, "");
    }

    #[test]
    fn sort_pattern_syntax_is_reserved() {
        let cases = [
            ("separator = \"*\"", "separator"),
            ("separator = \":->\"", "separator"),
            ("all_suffix = \"a*\"", "all_suffix"),
            ("composite_prefix = \"->\"", "composite_prefix"),
            ("composite_join = \"+*\"", "composite_join"),
            ("order_marker = \"->\"", "order_marker"),
        ];

        for (source, marker) in cases {
            let err = KeyConfig::from_toml(source).expect_err(source);
            assert!(
                matches!(err, ConfigError::ReservedMarker(name) if name == marker),
                "{source}: {err}"
            );
        }
    }

    #[test]
    fn delimiters_must_not_look_like_encoded_values() {
        let cases = [
            ("separator = \"_\"", "separator"),
            ("composite_join = \"and\"", "composite_join"),
            ("order_marker = \"%\"", "order_marker"),
            ("order_marker = \"-\"", "order_marker"),
        ];

        for (source, marker) in cases {
            let err = KeyConfig::from_toml(source).expect_err(source);
            assert!(
                matches!(err, ConfigError::AmbiguousMarker(name) if name == marker),
                "{source}: {err}"
            );
        }

        // one distinguishing character is enough
        let config = KeyConfig::from_toml("separator = \"_:_\"").expect("config should parse");
        assert_eq!(config.separator, "_:_");
    }
}
