use serde::{Deserialize, Serialize};

use crate::error::{PlanError, QuantityField, require_positive};

/// One ingredient line of a recipe: `quantity` units of `name` per craft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A named entry in the catalog.
///
/// `craft_time_seconds == None` marks a raw material: nothing manufactures it,
/// so it never gets a machine row. Ingredients on such an item still
/// propagate demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub craft_time_seconds: Option<f64>,
    /// Units produced per craft. Anything below 1 is treated as 1.
    pub output_quantity: u32,
    pub ingredients: Vec<Ingredient>,
    /// Display colour for diagrams. Opaque to the planner.
    pub color: Option<String>,
    /// Display image reference. Opaque to the planner.
    pub image: Option<String>,
}

impl Item {
    /// A raw material: no craft time, no ingredients.
    pub fn raw(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            craft_time_seconds: None,
            output_quantity: 1,
            ingredients: Vec::new(),
            color: None,
            image: None,
        }
    }

    /// A crafted item producing `output_quantity` units every
    /// `craft_time_seconds`.
    pub fn crafted(name: impl Into<String>, craft_time_seconds: f64, output_quantity: u32) -> Self {
        Self {
            craft_time_seconds: Some(craft_time_seconds),
            output_quantity,
            ..Self::raw(name)
        }
    }

    /// Builder-style: append an ingredient line.
    pub fn with_ingredient(mut self, name: impl Into<String>, quantity: f64) -> Self {
        self.ingredients.push(Ingredient::new(name, quantity));
        self
    }

    /// Builder-style: set the display colour.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Batch yield with the `>= 1` clamp applied.
    pub fn effective_output_quantity(&self) -> u32 {
        self.output_quantity.max(1)
    }

    /// True when the item has ingredients to descend into.
    pub fn has_recipe(&self) -> bool {
        !self.ingredients.is_empty()
    }

    /// Units one machine produces per second, or `None` for raw materials.
    pub fn capacity_per_second(&self) -> Option<f64> {
        self.craft_time_seconds
            .map(|t| f64::from(self.effective_output_quantity()) / t)
    }

    /// Check craft time and ingredient quantities are positive and finite.
    pub fn validate(&self) -> Result<(), PlanError> {
        if let Some(t) = self.craft_time_seconds {
            require_positive(t, QuantityField::CraftTime, Some(&self.name))?;
        }
        for ing in &self.ingredients {
            require_positive(
                ing.quantity,
                QuantityField::IngredientQuantity,
                Some(&self.name),
            )?;
        }
        Ok(())
    }
}

/// The result of looking a name up in a [`Catalog`](crate::catalog::Catalog).
///
/// Ingredient names may reference items that were never registered. Those
/// resolve to `Unregistered`, which behaves as a raw material and carries no
/// recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemRef<'a> {
    Registered(&'a Item),
    Unregistered(&'a str),
}

impl<'a> ItemRef<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            ItemRef::Registered(item) => &item.name,
            ItemRef::Unregistered(name) => name,
        }
    }

    /// Ingredient lines to descend into. Empty for unregistered names.
    pub fn ingredients(&self) -> &'a [Ingredient] {
        match *self {
            ItemRef::Registered(item) => &item.ingredients,
            ItemRef::Unregistered(_) => &[],
        }
    }

    pub fn item(&self) -> Option<&'a Item> {
        match *self {
            ItemRef::Registered(item) => Some(item),
            ItemRef::Unregistered(_) => None,
        }
    }
}
