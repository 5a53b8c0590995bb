//! Configuration file handling for seatcupra-inspect

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuration for the inspect tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: Option<String>,
    /// Only print attributes added by the Seat/Cupra connector
    pub custom_only: bool,
    /// Pretty-print the JSON output
    pub pretty: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            custom_only: false,
            pretty: true,
        }
    }
}

impl InspectConfig {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Merge CLI flags over config file values
    pub fn merge_with_args(&self, custom_only: bool, verbose: bool) -> MergedConfig {
        let log_filter = if verbose {
            "debug".to_string()
        } else {
            self.log_filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
        };

        MergedConfig {
            log_filter,
            custom_only: custom_only || self.custom_only,
            pretty: self.pretty,
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub log_filter: String,
    pub custom_only: bool,
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = InspectConfig::parse("").unwrap();
        assert_eq!(config, InspectConfig::default());
        assert!(config.pretty);
    }

    #[test]
    fn test_parse_all_fields() {
        let config = InspectConfig::parse(
            r#"
            log_filter = "carconn_seatcupra=debug"
            custom_only = true
            pretty = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config.log_filter.as_deref(),
            Some("carconn_seatcupra=debug")
        );
        assert!(config.custom_only);
        assert!(!config.pretty);
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(InspectConfig::parse("pretty = \"yes\"").is_err());
    }

    #[test]
    fn test_merge_verbose_overrides_filter() {
        let config = InspectConfig {
            log_filter: Some("info".to_string()),
            ..Default::default()
        };
        assert_eq!(config.merge_with_args(false, false).log_filter, "info");
        assert_eq!(config.merge_with_args(false, true).log_filter, "debug");
        assert_eq!(
            InspectConfig::default().merge_with_args(false, false).log_filter,
            "warn"
        );
    }

    #[test]
    fn test_merge_custom_only_from_either_side() {
        let config = InspectConfig::default();
        assert!(!config.merge_with_args(false, false).custom_only);
        assert!(config.merge_with_args(true, false).custom_only);

        let config = InspectConfig {
            custom_only: true,
            ..Default::default()
        };
        assert!(config.merge_with_args(false, false).custom_only);
    }
}
