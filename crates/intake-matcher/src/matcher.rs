//! Matcher and match result types

use intake_catalog::{CatalogItem, CatalogStore};
use intake_core::Result;
use intake_criteria::Criteria;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Ordered outcome of applying criteria to the catalog
///
/// Preserves catalog listing order; there is no ranking beyond the filter.
/// An empty result is a normal terminal outcome, distinct from "no lookup has
/// run yet" (which the session layer tracks via its state machine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    items: Vec<CatalogItem>,
}

impl MatchResult {
    /// Matched items in catalog listing order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of matches
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item satisfied the criteria
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item id is among the matches
    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }

    /// Iterate over matched items
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }
}

impl IntoIterator for MatchResult {
    type Item = CatalogItem;
    type IntoIter = std::vec::IntoIter<CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Applies a completed criteria set against a catalog store
///
/// Stateless and deterministic: the same criteria against the same catalog
/// snapshot always yields the same ordered result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    /// Create a matcher
    pub fn new() -> Self {
        Self
    }

    /// Find catalog items satisfying `criteria`
    ///
    /// All three conditions are required: category equality
    /// (case-insensitive), condition equality (case-insensitive), and
    /// price within budget. Fails with `InvalidField` when a criteria value
    /// cannot be interpreted, or `CatalogUnavailable` when the store cannot
    /// be read. Zero matches is `Ok`.
    pub async fn find(&self, criteria: &Criteria, store: &dyn CatalogStore) -> Result<MatchResult> {
        let category = criteria.category()?;
        let condition = criteria.condition()?;
        let budget = criteria.budget()?;

        debug!(%category, %condition, budget, "Running catalog lookup");

        let wanted_category = category.clone();
        let items = store
            .filter(&move |item: &CatalogItem| {
                item.category == wanted_category
                    && item.condition == condition
                    && item.price <= budget
            })
            .await?;

        if items.is_empty() {
            info!(%category, %condition, budget, "No items matched the criteria");
        } else {
            info!(count = items.len(), "Found matching items");
        }

        Ok(MatchResult { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_catalog::{Condition, InMemoryCatalog};
    use intake_criteria::{CriteriaCollector, fields};
    use serde_json::json;

    fn showroom() -> InMemoryCatalog {
        InMemoryCatalog::with_items(vec![
            CatalogItem::new("honda-civic", "sedan", Condition::New, 25_000)
                .with_attribute("make", json!("Honda"))
                .with_attribute("model", json!("Civic")),
            CatalogItem::new("toyota-rav4", "SUV", Condition::Used, 28_000),
            CatalogItem::new("mercedes-c-class", "sedan", Condition::New, 40_000)
                .with_attribute("make", json!("Mercedes"))
                .with_attribute("model", json!("C-Class")),
            CatalogItem::new("toyota-camry", "sedan", Condition::Used, 22_000),
        ])
    }

    fn criteria(category: &str, condition: &str, budget: &str) -> Criteria {
        let mut collector = CriteriaCollector::default();
        collector.update(fields::CATEGORY, category);
        collector.update(fields::CONDITION, condition);
        collector.update(fields::BUDGET, budget);
        collector.snapshot().unwrap()
    }

    #[tokio::test]
    async fn test_budget_excludes_expensive_matches() {
        // Civic (25k) fits a 25k budget, C-Class (40k) does not
        let result = Matcher::new()
            .find(&criteria("sedan", "new", "25000"), &showroom())
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.items()[0].id, "honda-civic");
    }

    #[tokio::test]
    async fn test_matching_is_case_insensitive() {
        let result = Matcher::new()
            .find(&criteria("SEDAN", "NEW", "25000"), &showroom())
            .await
            .unwrap();
        assert!(result.contains("honda-civic"));
    }

    #[tokio::test]
    async fn test_all_three_conditions_are_required() {
        // Right category and budget, wrong condition
        let result = Matcher::new()
            .find(&criteria("sedan", "used", "25000"), &showroom())
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.items()[0].id, "toyota-camry");
    }

    #[tokio::test]
    async fn test_empty_result_is_ok_not_error() {
        let result = Matcher::new()
            .find(&criteria("sedan", "new", "100"), &showroom())
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[tokio::test]
    async fn test_search_is_deterministic() {
        let store = showroom();
        let wanted = criteria("sedan", "new", "50000");
        let matcher = Matcher::new();

        let first = matcher.find(&wanted, &store).await.unwrap();
        let second = matcher.find(&wanted, &store).await.unwrap();
        assert_eq!(first, second);

        // Catalog listing order is preserved
        let ids: Vec<_> = first.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["honda-civic", "mercedes-c-class"]);
    }

    #[tokio::test]
    async fn test_uninterpretable_budget_is_reported() {
        let bad = criteria("sedan", "new", "a lot");
        let err = Matcher::new().find(&bad, &showroom()).await.unwrap_err();
        assert!(matches!(
            err,
            intake_core::Error::InvalidField { ref field, .. } if field == "budget"
        ));
    }
}
