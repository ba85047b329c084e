//! Catalog item types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Category tag for a catalog item (e.g. "sedan", "SUV", "truck")
///
/// Categories compare case-insensitively: `"SUV" == "suv"`. The original
/// casing is preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category from any string-like value
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as originally written
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Category {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Condition of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Factory new
    New,
    /// Previously owned
    Used,
}

impl FromStr for Condition {
    type Err = String;

    /// Case-insensitive; accepts the legacy "pre-owned" spelling for `Used`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "used" | "pre-owned" | "preowned" => Ok(Self::Used),
            other => Err(format!("unknown condition: {other}")),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::Used => f.write_str("used"),
        }
    }
}

/// One offerable item in the catalog
///
/// Immutable once listed: the store hands out clones and the matcher never
/// mutates. Anything beyond the typed decision fields lives in the open
/// attribute bag (e.g. make/model for vehicles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier within the catalog
    pub id: String,
    /// Class-of-good tag, compared case-insensitively
    pub category: Category,
    /// New or used
    pub condition: Condition,
    /// Listing price; never negative
    pub price: u64,
    /// Open attribute bag for display and downstream use
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl CatalogItem {
    /// Create an item with an empty attribute bag
    pub fn new(
        id: impl Into<String>,
        category: impl Into<Category>,
        condition: Condition,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            condition,
            price,
            attributes: HashMap::new(),
        }
    }

    /// Attach an attribute (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Human-readable name for confirmations
    ///
    /// Prefers a "make model" pair from the attribute bag, falling back to
    /// the item id.
    pub fn display_name(&self) -> String {
        let make = self.attributes.get("make").and_then(|v| v.as_str());
        let model = self.attributes.get("model").and_then(|v| v.as_str());
        match (make, model) {
            (Some(make), Some(model)) => format!("{make} {model}"),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => self.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_case_insensitive_eq() {
        assert_eq!(Category::new("SUV"), Category::new("suv"));
        assert_eq!(Category::new("Sedan"), Category::new("SEDAN"));
        assert_ne!(Category::new("sedan"), Category::new("truck"));
    }

    #[test]
    fn test_condition_parsing() {
        assert_eq!("New".parse::<Condition>().unwrap(), Condition::New);
        assert_eq!("USED".parse::<Condition>().unwrap(), Condition::Used);
        assert_eq!("pre-owned".parse::<Condition>().unwrap(), Condition::Used);
        assert!("vintage".parse::<Condition>().is_err());
    }

    #[test]
    fn test_display_name_prefers_make_model() {
        let item = CatalogItem::new("honda-civic", "sedan", Condition::New, 25_000)
            .with_attribute("make", json!("Honda"))
            .with_attribute("model", json!("Civic"));
        assert_eq!(item.display_name(), "Honda Civic");

        let bare = CatalogItem::new("mystery-box", "box", Condition::New, 10);
        assert_eq!(bare.display_name(), "mystery-box");
    }

    #[test]
    fn test_item_json_round_trip() {
        let item = CatalogItem::new("toyota-rav4", "SUV", Condition::Used, 28_000)
            .with_attribute("make", json!("Toyota"));
        let encoded = serde_json::to_string(&item).unwrap();
        let decoded: CatalogItem = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, item);
    }
}
