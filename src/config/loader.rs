//! Rule table loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading fee rule
//! tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{RuleTable, RuleTableFile};

/// The rule file name inside a configuration directory.
pub const RULES_FILE_NAME: &str = "fee_rules.yaml";

/// Loads a validated [`RuleTable`] from YAML.
///
/// # Directory Structure
///
/// ```text
/// config/ebay_us/
/// └── fee_rules.yaml   # Table metadata and per-category schedules
/// ```
///
/// # Example
///
/// ```no_run
/// use fee_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ebay_us")?;
/// println!("Loaded {} categories", loader.table().len());
/// # Ok::<(), fee_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: RuleTable,
}

impl ConfigLoader {
    /// Loads `fee_rules.yaml` from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The rule file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or fields (`ConfigParseError`)
    /// - A schedule breaks the tier/threshold invariants (`MalformedSchedule`)
    /// - The `"most"` schedule is absent (`MissingDefaultSchedule`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        Self::load_file(path.as_ref().join(RULES_FILE_NAME))
    }

    /// Loads a rule file from an explicit path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, &path_str)?;
        info!(
            path = %path_str,
            marketplace = %loader.table.metadata().marketplace,
            version = %loader.table.metadata().version,
            categories = loader.table.len(),
            "Loaded fee rule table"
        );
        Ok(loader)
    }

    /// Parses a rule table from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        let file: RuleTableFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            table: file.into_table()?,
        })
    }

    /// Returns the loaded rule table.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Consumes the loader, returning the rule table.
    pub fn into_table(self) -> RuleTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScheduleMode, ScheduleRules, ThresholdBand};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/ebay_us"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const MINIMAL: &str = r#"
marketplace: test
version: 2025-01-01
source_url: https://example.com/fees
categories:
  most:
    mode: tiered
    store: [{ cap: "2500", rate: "0.127" }, { rate: "0.0235" }]
    non_store: [{ cap: "7500", rate: "0.136" }, { rate: "0.0235" }]
  sneakers:
    mode: threshold
    store: [{ threshold: "0", rate: "0.127" }, { threshold: "150", rate: "0.07" }]
    non_store: [{ threshold: "150", rate: "0.08" }, { threshold: "0", rate: "0.136" }]
"#;

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.table().metadata().marketplace, "ebay_us");
        assert!(loader.table().contains("most"));
    }

    #[test]
    fn test_shipped_configuration_matches_builtin_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let builtin = RuleTable::builtin();

        assert_eq!(loader.table().metadata(), builtin.metadata());
        let loaded: Vec<_> = loader.table().schedules().collect();
        let expected: Vec<_> = builtin.schedules().collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_from_yaml_str() {
        let table = ConfigLoader::from_yaml_str(MINIMAL).unwrap().into_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("sneakers").unwrap().mode(), ScheduleMode::Threshold);

        match &table.get("sneakers").unwrap().rules {
            ScheduleRules::Threshold { store, .. } => {
                assert_eq!(store[1], ThresholdBand::new(dec("150"), dec("0.07")));
            }
            other => panic!("Expected threshold rules, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("fee_rules.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_file_from_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RULES_FILE_NAME), MINIMAL).unwrap();

        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert!(loader.table().contains("sneakers"));
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("broken.yaml");
        fs::write(&file, "categories: [unterminated").unwrap();

        match ConfigLoader::load_file(&file) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("broken.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_mode_returns_parse_error() {
        let yaml = MINIMAL.replace("mode: threshold", "mode: sliding");
        assert!(matches!(
            ConfigLoader::from_yaml_str(&yaml),
            Err(EngineError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_malformed_schedule_fails_at_load() {
        let yaml = MINIMAL.replace(
            r#"non_store: [{ threshold: "150", rate: "0.08" }, { threshold: "0", rate: "0.136" }]"#,
            r#"non_store: [{ threshold: "150", rate: "0.08" }]"#,
        );
        match ConfigLoader::from_yaml_str(&yaml) {
            Err(EngineError::MalformedSchedule { category, message }) => {
                assert_eq!(category, "sneakers");
                assert!(message.contains("catch-all"));
            }
            other => panic!("Expected MalformedSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_default_schedule_fails_at_load() {
        let yaml = r#"
marketplace: test
version: 2025-01-01
source_url: https://example.com/fees
categories:
  electronics:
    mode: tiered
    store: [{ rate: "0.0935" }]
    non_store: [{ rate: "0.1255" }]
"#;
        assert!(matches!(
            ConfigLoader::from_yaml_str(yaml),
            Err(EngineError::MissingDefaultSchedule)
        ));
    }
}
