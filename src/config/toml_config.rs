use crate::core::ranges::{ReferenceRange, ReferenceTable};
use crate::domain::model::MarkerName;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_RECORDS_PATH: &str = "./data/analyses.jsonl";
pub const DEFAULT_WORKER_COUNT: usize = 2;

/// File-based configuration. Every section is optional; anything absent
/// falls back to the built-in defaults, including reference ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub analyzer: Option<AnalyzerSection>,
    pub worker: Option<WorkerSection>,
    pub ranges: Option<HashMap<MarkerName, ReferenceRange>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerSection {
    pub upload_dir: Option<String>,
    pub records_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSection {
    pub count: Option<usize>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalyzerError::Config {
                message: format!("cannot read config file {}: {e}", path.as_ref().display()),
            }
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in reference ranges with the file's overrides applied.
    pub fn reference_table(&self) -> ReferenceTable {
        let mut table = ReferenceTable::default();
        if let Some(overrides) = &self.ranges {
            for (name, range) in overrides {
                table.set_range(*name, *range);
            }
        }
        table
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("analyzer.upload_dir", self.upload_dir())?;
        validate_path("analyzer.records_path", self.records_path())?;
        validate_positive_number("worker.count", self.worker_count(), 1)?;

        if let Some(overrides) = &self.ranges {
            for (name, range) in overrides {
                if range.low > range.high {
                    return Err(AnalyzerError::InvalidConfigValue {
                        field: format!("ranges.{name}"),
                        value: format!("[{}, {}]", range.low, range.high),
                        reason: "low bound exceeds high bound".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn upload_dir(&self) -> &str {
        self.analyzer
            .as_ref()
            .and_then(|a| a.upload_dir.as_deref())
            .unwrap_or(DEFAULT_UPLOAD_DIR)
    }

    fn records_path(&self) -> &str {
        self.analyzer
            .as_ref()
            .and_then(|a| a.records_path.as_deref())
            .unwrap_or(DEFAULT_RECORDS_PATH)
    }

    fn worker_count(&self) -> usize {
        self.worker
            .as_ref()
            .and_then(|w| w.count)
            .unwrap_or(DEFAULT_WORKER_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ranges::Classification;

    #[test]
    fn empty_config_uses_defaults() {
        let config = TomlConfig::from_toml("").unwrap();
        assert_eq!(config.upload_dir(), DEFAULT_UPLOAD_DIR);
        assert_eq!(config.records_path(), DEFAULT_RECORDS_PATH);
        assert_eq!(config.worker_count(), DEFAULT_WORKER_COUNT);
        assert_eq!(config.reference_table(), ReferenceTable::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = TomlConfig::from_toml(
            r#"
[analyzer]
upload_dir = "/tmp/staging"
records_path = "/tmp/records.jsonl"

[worker]
count = 4
"#,
        )
        .unwrap();
        assert_eq!(config.upload_dir(), "/tmp/staging");
        assert_eq!(config.records_path(), "/tmp/records.jsonl");
        assert_eq!(config.worker_count(), 4);
    }

    #[test]
    fn range_override_changes_classification() {
        let config = TomlConfig::from_toml(
            r#"
[ranges]
WBC = { low = 5.0, high = 6.0 }
"#,
        )
        .unwrap();

        let table = config.reference_table();
        assert_eq!(table.classify(MarkerName::Wbc, 7.5), Classification::High);
        // Untouched markers keep the built-in range.
        assert_eq!(
            table.classify(MarkerName::Hemoglobin, 13.0),
            Classification::Normal
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = TomlConfig::from_toml(
            r#"
[ranges]
Platelets = { low = 450.0, high = 150.0 }
"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidConfigValue { .. }));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err = TomlConfig::from_toml(
            r#"
[worker]
count = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidConfigValue { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = TomlConfig::from_toml("[analyzer").unwrap_err();
        assert!(matches!(err, AnalyzerError::TomlParse(_)));
    }
}
