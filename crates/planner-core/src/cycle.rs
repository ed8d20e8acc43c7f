//! Cycle detection over the recipe graph.
//!
//! A depth-first walk from the root tags every node with a [`VisitState`].
//! Reaching a node that is still `InProgress` means it sits on the current
//! DFS path, so the edge closes a cycle. Demand propagation does not
//! terminate on such a graph, which makes this check a hard precondition of
//! [`compute_rates`](crate::rates::compute_rates).

use crate::catalog::Catalog;
use crate::graph::RecipeGraph;
use crate::id::ItemId;

/// Per-node traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    Unvisited,
    /// On the current DFS path.
    InProgress,
    /// Fully explored; no cycle runs through it.
    Done,
}

impl RecipeGraph {
    /// Find a cycle reachable from `root`.
    ///
    /// Returns the path from the first repeated node back to itself, e.g.
    /// `[a, b, a]`. Stops at the first back-edge found. The walk keeps its
    /// own stack, so deep chains do not exhaust the call stack.
    pub fn find_cycle_from(&self, root: ItemId) -> Option<Vec<ItemId>> {
        if root.index() >= self.node_count() {
            return None;
        }

        let mut state = vec![VisitState::Unvisited; self.node_count()];
        // (node, index of the next ingredient to explore)
        let mut stack: Vec<(ItemId, usize)> = vec![(root, 0)];
        state[root.index()] = VisitState::InProgress;

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(&child) = self.ingredients(node).get(frame.1) else {
                state[node.index()] = VisitState::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match state[child.index()] {
                VisitState::Unvisited => {
                    state[child.index()] = VisitState::InProgress;
                    stack.push((child, 0));
                }
                VisitState::InProgress => {
                    let start = stack
                        .iter()
                        .position(|&(n, _)| n == child)
                        .unwrap_or(0);
                    let mut cycle: Vec<ItemId> = stack[start..].iter().map(|&(n, _)| n).collect();
                    cycle.push(child);
                    return Some(cycle);
                }
                VisitState::Done => {}
            }
        }

        None
    }
}

/// Find a cycle reachable from `root`, returned as item names.
///
/// A root absent from the catalog is a sink and never starts a cycle.
pub fn find_cycle(catalog: &Catalog, root: &str) -> Option<Vec<String>> {
    let graph = RecipeGraph::build(catalog);
    let root_id = graph.id(root)?;
    let cycle = graph.find_cycle_from(root_id)?;
    Some(
        cycle
            .into_iter()
            .map(|id| graph.name(id).to_string())
            .collect(),
    )
}

/// True when a cycle is reachable from `root`.
pub fn has_cycle(catalog: &Catalog, root: &str) -> bool {
    find_cycle(catalog, root).is_some()
}
