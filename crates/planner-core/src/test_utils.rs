//! Shared catalog fixtures for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::catalog::Catalog;
use crate::item::Item;

// ===========================================================================
// Fixtures
// ===========================================================================

/// `Ingot` (2s, x1) <- `Ore` x1. `Ore` is raw.
pub fn linear_chain() -> Catalog {
    catalog([
        Item::crafted("Ingot", 2.0, 1).with_ingredient("Ore", 1.0),
        Item::raw("Ore"),
    ])
}

/// `Gadget` <- `Part` x2 + `Wire` x1; `Part` and `Wire` each <- `Metal` x1.
pub fn diamond() -> Catalog {
    catalog([
        Item::crafted("Gadget", 1.0, 1)
            .with_ingredient("Part", 2.0)
            .with_ingredient("Wire", 1.0),
        Item::crafted("Part", 1.0, 1).with_ingredient("Metal", 1.0),
        Item::crafted("Wire", 1.0, 1).with_ingredient("Metal", 1.0),
        Item::raw("Metal"),
    ])
}

/// `A` <-> `B`, plus an unrelated acyclic `Plate` <- `Ore`.
pub fn mutual_cycle() -> Catalog {
    catalog([
        Item::crafted("A", 1.0, 1).with_ingredient("B", 1.0),
        Item::crafted("B", 1.0, 1).with_ingredient("A", 1.0),
        Item::crafted("Plate", 1.0, 1).with_ingredient("Ore", 1.0),
        Item::raw("Ore"),
    ])
}

/// A factory-game tree: ores, ingots, steel, plates, wire, circuits.
pub fn smelting_tree() -> Catalog {
    catalog([
        Item::raw("Iron Ore").with_color("#a8a8a8"),
        Item::raw("Copper Ore").with_color("#c28a5b"),
        Item::raw("Coal").with_color("#242424"),
        Item::crafted("Iron Ingot", 3.2, 1)
            .with_ingredient("Iron Ore", 1.0)
            .with_color("#b9d4ff"),
        Item::crafted("Copper Ingot", 3.2, 1)
            .with_ingredient("Copper Ore", 1.0)
            .with_color("#ffd1a6"),
        Item::crafted("Steel Ingot", 8.0, 1)
            .with_ingredient("Iron Ingot", 2.0)
            .with_ingredient("Coal", 1.0)
            .with_color("#8aa0a8"),
        Item::crafted("Iron Plate", 1.6, 1)
            .with_ingredient("Iron Ingot", 1.0)
            .with_color("#e4eefc"),
        Item::crafted("Copper Wire", 0.5, 2)
            .with_ingredient("Copper Ingot", 1.0)
            .with_color("#ffe5cc"),
        Item::crafted("Circuit", 4.0, 1)
            .with_ingredient("Iron Plate", 1.0)
            .with_ingredient("Copper Wire", 2.0)
            .with_color("#d7ffd9"),
    ])
}

/// `layers` rows of `width` items, each item using every item of the next
/// row. Demand paths grow as `width^layers`, which exercises the O(paths)
/// cost of propagation. Root is `"L0_0"`.
pub fn layered_mesh(layers: usize, width: usize) -> Catalog {
    let mut items = Vec::new();
    for layer in 0..layers {
        for i in 0..width {
            let mut item = Item::crafted(format!("L{layer}_{i}"), 1.0, 1);
            if layer + 1 < layers {
                for j in 0..width {
                    item = item.with_ingredient(format!("L{}_{j}", layer + 1), 1.0);
                }
            }
            items.push(item);
        }
    }
    catalog(items)
}

// ===========================================================================
// Helpers
// ===========================================================================

/// Build a catalog, panicking on invalid fixtures.
pub fn catalog<I: IntoIterator<Item = Item>>(items: I) -> Catalog {
    Catalog::from_items(items).expect("fixture catalog should be valid")
}

/// Assert two rates agree to within a relative tolerance.
pub fn assert_rate(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("rate should be present");
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected rate {expected}, got {actual}"
    );
}
