use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::id::ItemId;

// ---------------------------------------------------------------------------
// RecipeGraph
// ---------------------------------------------------------------------------

/// Directed graph of `item -> direct ingredient` edges derived from a catalog.
///
/// Every name that appears in the catalog, either as an item or as an
/// ingredient, is interned to an [`ItemId`] and gets an adjacency entry
/// (possibly empty), so lookups never need existence checks downstream.
/// Duplicate ingredient lines collapse to a single edge.
///
/// Registered items are interned first in lexicographic order, followed by
/// unregistered ingredient names in order of first reference, which keeps
/// ids stable for a given catalog.
#[derive(Debug, Clone, Default)]
pub struct RecipeGraph {
    names: Vec<String>,
    name_to_id: HashMap<String, ItemId>,
    adjacency: Vec<Vec<ItemId>>,
}

impl RecipeGraph {
    /// Derive the graph from a catalog. Never fails.
    pub fn build(catalog: &Catalog) -> Self {
        let mut graph = Self::default();
        let names = catalog.sorted_names();

        for name in &names {
            graph.intern(name);
        }

        for name in names {
            let Some(item) = catalog.get(name) else {
                continue;
            };
            let parent = graph.intern(name);
            for ing in &item.ingredients {
                let child = graph.intern(&ing.name);
                let edges = &mut graph.adjacency[parent.index()];
                if !edges.contains(&child) {
                    edges.push(child);
                }
            }
        }

        graph
    }

    fn intern(&mut self, name: &str) -> ItemId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = ItemId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.name_to_id.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Lookup the id interned for `name`.
    pub fn id(&self, name: &str) -> Option<ItemId> {
        self.name_to_id.get(name).copied()
    }

    /// The name an id was interned from. Empty for foreign ids.
    pub fn name(&self, id: ItemId) -> &str {
        self.names.get(id.index()).map(String::as_str).unwrap_or("")
    }

    /// Direct ingredients of `id`, without duplicates.
    pub fn ingredients(&self, id: ItemId) -> &[ItemId] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Direct ingredient names of `name`. Empty for unknown names.
    pub fn ingredient_names(&self, name: &str) -> impl Iterator<Item = &str> {
        let ids = self.id(name).map(|id| self.ingredients(id)).unwrap_or(&[]);
        ids.iter().map(|&id| self.name(id))
    }

    /// Total number of interned names.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Total number of distinct `item -> ingredient` edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Iterate over all ids and their names.
    pub fn nodes(&self) -> impl Iterator<Item = (ItemId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (ItemId(i as u32), name.as_str()))
    }
}

/// Derive the `item -> ingredient` adjacency of a catalog.
pub fn build_graph(catalog: &Catalog) -> RecipeGraph {
    RecipeGraph::build(catalog)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
