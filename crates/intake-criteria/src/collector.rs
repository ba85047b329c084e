//! Incremental criteria collection

use crate::criteria::{Criteria, fields};
use intake_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Configuration for a criteria collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Fields that must be set and non-empty before a session is ready
    pub required_fields: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            required_fields: vec![
                fields::CATEGORY.to_string(),
                fields::CONDITION.to_string(),
                fields::BUDGET.to_string(),
            ],
        }
    }
}

impl CollectorConfig {
    /// Create a config with a custom required-field set
    pub fn new(required_fields: Vec<String>) -> Result<Self> {
        if required_fields.is_empty() {
            return Err(Error::Config(
                "required_fields must not be empty".to_string(),
            ));
        }
        Ok(Self { required_fields })
    }
}

/// Accumulates decision fields for one intake session
///
/// Updates are last-write-wins with no history. Values are stored trimmed;
/// a whitespace-only value does not count toward completion.
///
/// # Example
///
/// ```
/// use intake_criteria::{CollectorConfig, CriteriaCollector, fields};
///
/// let mut collector = CriteriaCollector::new(CollectorConfig::default());
/// collector.update(fields::CATEGORY, "sedan");
/// collector.update(fields::CONDITION, "new");
/// assert!(!collector.is_complete());
///
/// collector.update(fields::BUDGET, "25000");
/// assert!(collector.is_complete());
/// let criteria = collector.snapshot().unwrap();
/// assert_eq!(criteria.get("category"), Some("sedan"));
/// ```
#[derive(Debug, Clone)]
pub struct CriteriaCollector {
    config: CollectorConfig,
    values: BTreeMap<String, String>,
}

impl CriteriaCollector {
    /// Create a collector with the given required-field set
    pub fn new(config: CollectorConfig) -> Self {
        Self {
            config,
            values: BTreeMap::new(),
        }
    }

    /// Merge one field into the current criteria, overwriting any prior value
    pub fn update(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into().trim().to_string();
        debug!(%field, "Criteria field updated");
        self.values.insert(field, value);
    }

    /// Whether every required field is set and non-empty
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Required fields that are still unset or empty, in required-field order
    pub fn missing_fields(&self) -> Vec<String> {
        self.config
            .required_fields
            .iter()
            .filter(|field| {
                self.values
                    .get(field.as_str())
                    .is_none_or(|value| value.is_empty())
            })
            .cloned()
            .collect()
    }

    /// Immutable copy of the collected criteria
    ///
    /// Fails with `IncompleteCriteria` (naming the missing fields) when
    /// called before collection has finished.
    pub fn snapshot(&self) -> Result<Criteria> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Error::IncompleteCriteria { missing });
        }
        Ok(Criteria::from_values(self.values.clone()))
    }
}

impl Default for CriteriaCollector {
    fn default() -> Self {
        Self::new(CollectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_until_all_required_fields_set() {
        let mut collector = CriteriaCollector::default();
        assert!(!collector.is_complete());

        collector.update(fields::CATEGORY, "sedan");
        assert!(!collector.is_complete());
        collector.update(fields::CONDITION, "new");
        assert!(!collector.is_complete());
        collector.update(fields::BUDGET, "25000");
        assert!(collector.is_complete());
    }

    #[test]
    fn test_stays_complete_under_value_changes() {
        let mut collector = CriteriaCollector::default();
        collector.update(fields::CATEGORY, "sedan");
        collector.update(fields::CONDITION, "new");
        collector.update(fields::BUDGET, "25000");
        assert!(collector.is_complete());

        // Changing values never removes fields
        collector.update(fields::BUDGET, "30000");
        collector.update(fields::CATEGORY, "truck");
        assert!(collector.is_complete());
        assert_eq!(collector.snapshot().unwrap().budget().unwrap(), 30_000);
    }

    #[test]
    fn test_last_write_wins() {
        let mut collector = CriteriaCollector::default();
        collector.update(fields::CATEGORY, "truck");
        collector.update(fields::CATEGORY, "sedan");
        collector.update(fields::CONDITION, "new");
        collector.update(fields::BUDGET, "25000");
        assert_eq!(
            collector.snapshot().unwrap().get(fields::CATEGORY),
            Some("sedan")
        );
    }

    #[test]
    fn test_whitespace_value_does_not_complete() {
        let mut collector = CriteriaCollector::default();
        collector.update(fields::CATEGORY, "   ");
        collector.update(fields::CONDITION, "new");
        collector.update(fields::BUDGET, "25000");
        assert!(!collector.is_complete());
        assert_eq!(collector.missing_fields(), vec!["category".to_string()]);
    }

    #[test]
    fn test_snapshot_before_completion_names_missing_fields() {
        let mut collector = CriteriaCollector::default();
        collector.update(fields::BUDGET, "25000");
        let err = collector.snapshot().unwrap_err();
        match err {
            Error::IncompleteCriteria { missing } => {
                assert_eq!(missing, vec!["category".to_string(), "condition".to_string()]);
            }
            other => panic!("expected IncompleteCriteria, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_required_fields() {
        let config = CollectorConfig::new(vec!["color".to_string()]).unwrap();
        let mut collector = CriteriaCollector::new(config);
        collector.update("color", "blue");
        assert!(collector.is_complete());
    }

    #[test]
    fn test_empty_required_set_is_config_error() {
        assert!(matches!(
            CollectorConfig::new(Vec::new()),
            Err(Error::Config(_))
        ));
    }
}
