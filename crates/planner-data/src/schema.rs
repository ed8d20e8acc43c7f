//! Serde structs for the keyed catalog document.
//!
//! Field names follow the document format (`timeSec`, `outQty`, `qty`), not
//! the planner's own naming. Everything except the key is optional.

use std::collections::BTreeMap;

use planner_core::item::{Ingredient, Item};
use serde::Deserialize;

/// The whole document: item name to item definition.
pub type CatalogDocument = BTreeMap<String, ItemData>;

/// One item entry in a catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    /// Must match the key when present.
    #[serde(default)]
    pub name: Option<String>,
    /// `None` marks a raw material.
    #[serde(default)]
    pub time_sec: Option<f64>,
    /// Batch yield. Fractions are truncated and values below 1 become 1.
    #[serde(default)]
    pub out_qty: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientData>,
}

/// One ingredient line in a catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientData {
    pub name: String,
    pub qty: f64,
}

impl ItemData {
    /// Convert into a planner item named `key`. Quantities are validated
    /// later, when the item enters a catalog.
    pub fn into_item(self, key: &str) -> Item {
        let output_quantity = self
            .out_qty
            .filter(|q| q.is_finite())
            .map(|q| q.max(1.0) as u32)
            .unwrap_or(1);

        Item {
            name: key.to_string(),
            craft_time_seconds: self.time_sec,
            output_quantity,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|ing| Ingredient::new(ing.name, ing.qty))
                .collect(),
            color: self.color.filter(|c| !c.is_empty()),
            image: self.image.filter(|i| !i.is_empty()),
        }
    }
}
