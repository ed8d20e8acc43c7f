//! Demand propagation: turn a target throughput for one root item into the
//! per-second production rate of every upstream item.
//!
//! Demand is additive. An item reached through several parents receives the
//! sum of every path's contribution, which is what makes shared
//! sub-ingredients (diamonds) come out right. The cost is O(paths) rather
//! than O(items + edges): catalogs with many shared ingredients repeated at
//! depth can take exponentially many steps. Nothing is truncated.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::Catalog;

/// Required production rate of one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateEntry {
    pub name: String,
    pub per_second: f64,
}

/// Item name to required units per second.
///
/// Each name appears at most once. Entries keep the order in which the
/// propagation first reached them (root first), so iteration is
/// deterministic for a given catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RateMap {
    entries: Vec<RateEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl RateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `per_second` onto `name`.
    pub fn add(&mut self, name: &str, per_second: f64) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].per_second += per_second,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(RateEntry {
                    name: name.to_string(),
                    per_second,
                });
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&i| self.entries[i].per_second)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &RateEntry> {
        self.entries.iter()
    }

    /// Entries by descending rate. Equal rates keep discovery order.
    pub fn sorted_descending(&self) -> Vec<&RateEntry> {
        let mut sorted: Vec<&RateEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.per_second.total_cmp(&a.per_second));
        sorted
    }
}

/// Compute the per-second demand of every item feeding `root`.
///
/// The root is charged `target_per_second`; each item with ingredients then
/// needs `demand / output_quantity` crafts per second and charges each
/// ingredient `crafts * quantity`. Unregistered names and items without
/// ingredients end the descent.
///
/// # Preconditions
///
/// - No cycle is reachable from `root` (see [`has_cycle`](crate::cycle::has_cycle)).
///   On a cyclic catalog this never returns.
/// - `target_per_second` is positive and finite. The
///   [`plan`](crate::plan::plan) entry point checks both.
pub fn compute_rates(catalog: &Catalog, root: &str, target_per_second: f64) -> RateMap {
    debug_assert!(target_per_second.is_finite() && target_per_second >= 0.0);

    let mut rates = RateMap::new();
    let mut pending: Vec<(&str, f64)> = vec![(root, target_per_second)];
    let mut visits: u64 = 0;

    while let Some((name, per_second)) = pending.pop() {
        visits += 1;
        rates.add(name, per_second);

        let Some(item) = catalog.get(name) else {
            continue;
        };
        if !item.has_recipe() {
            continue;
        }

        let crafts_per_second = per_second / f64::from(item.effective_output_quantity());
        // Reverse so the first ingredient is expanded first.
        for ing in item.ingredients.iter().rev() {
            pending.push((ing.name.as_str(), crafts_per_second * ing.quantity));
        }
    }

    tracing::debug!(
        root,
        target_per_second,
        visits,
        distinct = rates.len(),
        "demand propagation finished"
    );
    rates
}
