//! Immutable criteria snapshot with typed accessors

use intake_catalog::{Category, Condition};
use intake_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known criteria field names
pub mod fields {
    /// Class-of-good tag (e.g. "sedan", "SUV", "truck")
    pub const CATEGORY: &str = "category";
    /// New or used
    pub const CONDITION: &str = "condition";
    /// Maximum price the requester will pay
    pub const BUDGET: &str = "budget";
}

/// An immutable set of collected decision fields
///
/// Produced by [`CriteriaCollector::snapshot`](crate::CriteriaCollector::snapshot)
/// once all required fields are present. Raw values stay as entered; the
/// typed accessors parse on demand and report unusable values as
/// `InvalidField`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    values: BTreeMap<String, String>,
}

impl Criteria {
    pub(crate) fn from_values(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Raw value of a field, if set
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Number of collected fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields have been collected
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Requested category
    pub fn category(&self) -> Result<Category> {
        self.require(fields::CATEGORY).map(Category::new)
    }

    /// Requested condition
    pub fn condition(&self) -> Result<Condition> {
        let raw = self.require(fields::CONDITION)?;
        raw.parse().map_err(|reason| Error::InvalidField {
            field: fields::CONDITION.to_string(),
            reason,
        })
    }

    /// Maximum acceptable price
    ///
    /// Accepts plain integers plus a leading `$` and thousands separators
    /// ("$25,000" parses as 25000).
    pub fn budget(&self) -> Result<u64> {
        let raw = self.require(fields::BUDGET)?;
        let cleaned: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        cleaned.parse().map_err(|_| Error::InvalidField {
            field: fields::BUDGET.to_string(),
            reason: format!("not a non-negative integer: {raw}"),
        })
    }

    fn require(&self, field: &str) -> Result<&str> {
        self.get(field).ok_or_else(|| Error::IncompleteCriteria {
            missing: vec![field.to_string()],
        })
    }
}
