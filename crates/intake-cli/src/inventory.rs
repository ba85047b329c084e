//! Built-in showroom catalog used when no catalog file is given

use intake_catalog::{CatalogItem, Condition};
use serde_json::json;

fn vehicle(make: &str, model: &str, category: &str, condition: Condition, price: u64) -> CatalogItem {
    let id = format!("{}-{}", make.to_lowercase(), model.to_lowercase()).replace(' ', "-");
    CatalogItem::new(id, category, condition, price)
        .with_attribute("make", json!(make))
        .with_attribute("model", json!(model))
}

/// The demo showroom: eight vehicles across sedans, SUVs, and trucks
pub fn demo_inventory() -> Vec<CatalogItem> {
    vec![
        vehicle("Honda", "Civic", "sedan", Condition::New, 25_000),
        vehicle("Toyota", "RAV4", "SUV", Condition::Used, 28_000),
        vehicle("Ford", "F-150", "truck", Condition::New, 45_000),
        vehicle("BMW", "X5", "SUV", Condition::Used, 35_000),
        vehicle("Mercedes", "C-Class", "sedan", Condition::New, 40_000),
        vehicle("Nissan", "Titan", "truck", Condition::Used, 30_000),
        vehicle("Honda", "CRV", "SUV", Condition::New, 32_000),
        vehicle("Toyota", "Camry", "sedan", Condition::Used, 22_000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_inventory_shape() {
        let inventory = demo_inventory();
        assert_eq!(inventory.len(), 8);
        assert!(inventory.iter().any(|i| i.id == "honda-civic"));
        assert!(inventory.iter().all(|i| i.price > 0));
    }

    #[test]
    fn test_ids_are_unique() {
        let inventory = demo_inventory();
        let mut ids: Vec<_> = inventory.iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), inventory.len());
    }
}
