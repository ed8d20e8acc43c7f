//! The item catalog: a validated, name-keyed collection of [`Item`]s.
//!
//! Keys are unique and always equal the item's own `name`. Every item is
//! validated on the way in, so the planning algorithms can rely on positive,
//! finite craft times and ingredient quantities.

use std::collections::{BTreeSet, HashMap};

use crate::error::PlanError;
use crate::item::{Item, ItemRef};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from items, failing on the first invalid or duplicate
    /// entry.
    pub fn from_items<I>(items: I) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = Item>,
    {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// Register a new item. Fails if the name is taken or a quantity is invalid.
    pub fn insert(&mut self, item: Item) -> Result<(), PlanError> {
        if self.items.contains_key(&item.name) {
            return Err(PlanError::DuplicateItem { name: item.name });
        }
        item.validate()?;
        self.items.insert(item.name.clone(), item);
        Ok(())
    }

    /// Register or overwrite an item, returning the previous definition.
    pub fn replace(&mut self, item: Item) -> Result<Option<Item>, PlanError> {
        item.validate()?;
        Ok(self.items.insert(item.name.clone(), item))
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Look a name up, falling back to the unregistered (raw) variant.
    pub fn resolve<'a>(&'a self, name: &'a str) -> ItemRef<'a> {
        match self.items.get(name) {
            Some(item) => ItemRef::Registered(item),
            None => ItemRef::Unregistered(name),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate registered items in arbitrary order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Registered names in lexicographic order, for display.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.items.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Ingredient names referenced by some recipe but never registered,
    /// in lexicographic order.
    pub fn unregistered_references(&self) -> Vec<&str> {
        let missing: BTreeSet<&str> = self
            .items
            .values()
            .flat_map(|item| item.ingredients.iter())
            .map(|ing| ing.name.as_str())
            .filter(|name| !self.items.contains_key(*name))
            .collect();
        missing.into_iter().collect()
    }
}
