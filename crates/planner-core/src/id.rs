use serde::{Deserialize, Serialize};

/// Identifies an item name interned by a [`RecipeGraph`](crate::graph::RecipeGraph).
/// Cheap to copy and compare; only meaningful for the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Index into per-node tables sized by the graph's node count.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
