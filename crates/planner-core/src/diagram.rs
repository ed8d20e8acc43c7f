//! Subtree extraction and flowchart text generation.
//!
//! The diagram text uses a generic flowchart grammar:
//!
//! ```text
//! flowchart TD
//! Circuit["Circuit<br/>(output: 1/craft, 4s)"]
//! style Circuit fill:#d7ffd9,stroke:#333,stroke-width:1px
//! Circuit -->|×2| Copper_Wire
//! ```
//!
//! Node identifiers are restricted to `[A-Za-z0-9_]`; the readable name only
//! appears inside the quoted label.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

// ---------------------------------------------------------------------------
// Subtree
// ---------------------------------------------------------------------------

/// The names reachable from a root through ingredient edges, root included.
#[derive(Debug, Clone, Default)]
pub struct Subtree {
    order: Vec<String>,
    members: HashSet<String>,
}

impl Subtree {
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Names in depth-first discovery order, root first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Collect every name reachable from `root`. Safe on cyclic catalogs.
pub fn subtree_of(catalog: &Catalog, root: &str) -> Subtree {
    let mut subtree = Subtree::default();
    let mut pending: Vec<&str> = vec![root];

    while let Some(name) = pending.pop() {
        if !subtree.members.insert(name.to_string()) {
            continue;
        }
        subtree.order.push(name.to_string());
        pending.extend(
            catalog
                .resolve(name)
                .ingredients()
                .iter()
                .rev()
                .map(|ing| ing.name.as_str()),
        );
    }

    subtree
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Layout direction of the flowchart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlowDirection {
    #[default]
    #[serde(rename = "TD")]
    TopDown,
    #[serde(rename = "LR")]
    LeftRight,
    #[serde(rename = "BT")]
    BottomTop,
    #[serde(rename = "RL")]
    RightLeft,
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowDirection::TopDown => "TD",
            FlowDirection::LeftRight => "LR",
            FlowDirection::BottomTop => "BT",
            FlowDirection::RightLeft => "RL",
        };
        f.write_str(s)
    }
}

/// Presentation options for [`build_diagram`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub direction: FlowDirection,
    /// Border colour applied to styled nodes.
    pub stroke: String,
    pub stroke_width_px: u32,
    /// Append batch yield and craft time to crafted items' labels.
    pub show_recipe_meta: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            direction: FlowDirection::TopDown,
            stroke: "#333".to_string(),
            stroke_width_px: 1,
            show_recipe_meta: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Diagram
// ---------------------------------------------------------------------------

/// A node declaration in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    pub id: String,
    pub name: String,
    pub label: String,
    pub fill: Option<String>,
}

/// An `item -> ingredient` edge in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    pub quantity: f64,
}

/// Structured diagram plus its rendered text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    text: String,
}

impl Diagram {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Look up the node declared for an item name.
    pub fn node(&self, name: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Words the flowchart grammar reserves; identifiers must not equal them.
const RESERVED_IDS: &[&str] = &[
    "end",
    "graph",
    "flowchart",
    "subgraph",
    "style",
    "class",
    "classdef",
    "click",
    "linkstyle",
    "direction",
];

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn escape_label(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("#quot;"),
            '<' => out.push_str("#lt;"),
            '>' => out.push_str("#gt;"),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Colours are passed through only when they cannot break the style line.
fn is_safe_color(color: &str) -> bool {
    !color.is_empty() && color.chars().all(|c| c.is_ascii_alphanumeric() || c == '#')
}

/// Assigns unique, grammar-safe identifiers to item names.
#[derive(Default)]
struct IdAllocator {
    used: HashSet<String>,
    by_name: HashMap<String, String>,
}

impl IdAllocator {
    fn id_for(&mut self, name: &str) -> String {
        if let Some(id) = self.by_name.get(name) {
            return id.clone();
        }

        let mut base = sanitize_id(name);
        if base.is_empty() || RESERVED_IDS.contains(&base.to_ascii_lowercase().as_str()) {
            base.push('_');
        }

        let mut id = base.clone();
        let mut suffix = 2;
        while self.used.contains(&id) {
            id = format!("{base}_{suffix}");
            suffix += 1;
        }

        self.used.insert(id.clone());
        self.by_name.insert(name.to_string(), id.clone());
        id
    }
}

/// Build the flowchart for the subtree under `root`.
///
/// Items outside [`subtree_of`]`(catalog, root)` never appear, even if they
/// are in the catalog. Works on cyclic catalogs.
pub fn build_diagram(catalog: &Catalog, root: &str, config: &DiagramConfig) -> Diagram {
    let subtree = subtree_of(catalog, root);
    let mut ids = IdAllocator::default();

    let stroke = if is_safe_color(&config.stroke) {
        config.stroke.clone()
    } else {
        tracing::warn!(stroke = %config.stroke, "ignoring unsafe stroke colour");
        DiagramConfig::default().stroke
    };

    let mut nodes = Vec::with_capacity(subtree.len());
    for name in subtree.iter() {
        let item = catalog.get(name);

        let mut label = escape_label(name);
        if config.show_recipe_meta
            && let Some(item) = item
            && let Some(t) = item.craft_time_seconds
        {
            label.push_str(&format!(
                "<br/>(output: {}/craft, {t}s)",
                item.effective_output_quantity()
            ));
        }

        let fill = item.and_then(|i| i.color.as_deref()).and_then(|c| {
            if is_safe_color(c) {
                Some(c.to_string())
            } else {
                tracing::warn!(item = name, color = c, "ignoring unsafe diagram colour");
                None
            }
        });

        nodes.push(DiagramNode {
            id: ids.id_for(name),
            name: name.to_string(),
            label,
            fill,
        });
    }

    // Repeated ingredient lines merge into one edge carrying the summed quantity.
    let mut edges: Vec<DiagramEdge> = Vec::new();
    let mut edge_index: HashMap<(String, String), usize> = HashMap::new();
    for name in subtree.iter() {
        let Some(item) = catalog.get(name) else {
            continue;
        };
        for ing in &item.ingredients {
            if !subtree.contains(&ing.name) {
                continue;
            }
            let from = ids.id_for(name);
            let to = ids.id_for(&ing.name);
            match edge_index.entry((from.clone(), to.clone())) {
                Entry::Occupied(slot) => edges[*slot.get()].quantity += ing.quantity,
                Entry::Vacant(slot) => {
                    slot.insert(edges.len());
                    edges.push(DiagramEdge {
                        from,
                        to,
                        quantity: ing.quantity,
                    });
                }
            }
        }
    }

    let mut lines = Vec::with_capacity(1 + nodes.len() * 2 + edges.len());
    lines.push(format!("flowchart {}", config.direction));
    for node in &nodes {
        lines.push(format!("{}[\"{}\"]", node.id, node.label));
        if let Some(fill) = &node.fill {
            lines.push(format!(
                "style {} fill:{fill},stroke:{stroke},stroke-width:{}px",
                node.id, config.stroke_width_px
            ));
        }
    }
    for edge in &edges {
        lines.push(format!("{} -->|×{}| {}", edge.from, edge.quantity, edge.to));
    }

    Diagram {
        nodes,
        edges,
        text: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    fn circuit_catalog() -> Catalog {
        Catalog::from_items([
            Item::crafted("Circuit", 4.0, 1)
                .with_ingredient("Iron Plate", 1.0)
                .with_ingredient("Copper Wire", 2.0)
                .with_color("#d7ffd9"),
            Item::crafted("Iron Plate", 1.6, 1).with_ingredient("Iron Ingot", 1.0),
            Item::crafted("Copper Wire", 0.5, 2).with_ingredient("Copper Ingot", 1.0),
            Item::crafted("Steel", 8.0, 1).with_ingredient("Iron Ingot", 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn subtree_is_inclusive_and_depth_first() {
        let subtree = subtree_of(&circuit_catalog(), "Circuit");
        let names: Vec<&str> = subtree.iter().collect();
        assert_eq!(
            names,
            vec!["Circuit", "Iron Plate", "Iron Ingot", "Copper Wire", "Copper Ingot"]
        );
        assert!(!subtree.contains("Steel"));
    }

    #[test]
    fn subtree_handles_cycles() {
        let catalog = Catalog::from_items([
            Item::crafted("A", 1.0, 1).with_ingredient("B", 1.0),
            Item::crafted("B", 1.0, 1).with_ingredient("A", 1.0),
        ])
        .unwrap();
        let subtree = subtree_of(&catalog, "A");
        assert_eq!(subtree.len(), 2);
    }

    #[test]
    fn subtree_of_unknown_root_is_just_the_root() {
        let subtree = subtree_of(&Catalog::new(), "Ghost");
        assert_eq!(subtree.iter().collect::<Vec<_>>(), vec!["Ghost"]);
    }

    #[test]
    fn diagram_text_shape() {
        let diagram = build_diagram(&circuit_catalog(), "Circuit", &DiagramConfig::default());
        let expected = [
            "flowchart TD",
            "Circuit[\"Circuit<br/>(output: 1/craft, 4s)\"]",
            "style Circuit fill:#d7ffd9,stroke:#333,stroke-width:1px",
            "Iron_Plate[\"Iron Plate<br/>(output: 1/craft, 1.6s)\"]",
            "Iron_Ingot[\"Iron Ingot\"]",
            "Copper_Wire[\"Copper Wire<br/>(output: 2/craft, 0.5s)\"]",
            "Copper_Ingot[\"Copper Ingot\"]",
            "Circuit -->|×1| Iron_Plate",
            "Circuit -->|×2| Copper_Wire",
            "Iron_Plate -->|×1| Iron_Ingot",
            "Copper_Wire -->|×1| Copper_Ingot",
        ]
        .join("\n");
        assert_eq!(diagram.text(), expected);
    }

    #[test]
    fn items_outside_subtree_are_omitted() {
        let diagram = build_diagram(&circuit_catalog(), "Iron Plate", &DiagramConfig::default());
        assert_eq!(diagram.nodes.len(), 2);
        assert!(diagram.node("Steel").is_none());
        assert!(diagram.node("Circuit").is_none());
        assert!(!diagram.text().contains("Steel"));
        assert_eq!(diagram.edges.len(), 1);
    }

    #[test]
    fn colliding_and_reserved_ids_are_disambiguated() {
        let catalog = Catalog::from_items([Item::crafted("Kit", 1.0, 1)
            .with_ingredient("Iron Ore", 1.0)
            .with_ingredient("Iron_Ore", 1.0)
            .with_ingredient("end", 1.0)
            .with_ingredient("鉄", 1.0)])
        .unwrap();

        let diagram = build_diagram(&catalog, "Kit", &DiagramConfig::default());
        assert_eq!(diagram.node("Iron Ore").unwrap().id, "Iron_Ore");
        assert_eq!(diagram.node("Iron_Ore").unwrap().id, "Iron_Ore_2");
        assert_eq!(diagram.node("end").unwrap().id, "end_");
        assert_eq!(diagram.node("鉄").unwrap().id, "_");
        assert_eq!(diagram.node("鉄").unwrap().label, "鉄");

        let mut ids: Vec<&str> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), diagram.nodes.len());
    }

    #[test]
    fn labels_are_escaped() {
        let catalog = Catalog::from_items([Item::raw("Say \"hi\" <now>")]).unwrap();
        let diagram = build_diagram(&catalog, "Say \"hi\" <now>", &DiagramConfig::default());
        assert_eq!(
            diagram.text().lines().nth(1).unwrap(),
            "Say__hi___now_[\"Say #quot;hi#quot; #lt;now#gt;\"]"
        );
    }

    #[test]
    fn unsafe_colour_is_dropped() {
        let catalog = Catalog::from_items([
            Item::raw("Ore").with_color("red\nstyle x fill:#000"),
        ])
        .unwrap();
        let diagram = build_diagram(&catalog, "Ore", &DiagramConfig::default());
        assert_eq!(diagram.nodes[0].fill, None);
        assert!(!diagram.text().contains("style"));
    }

    #[test]
    fn config_controls_direction_stroke_and_meta() {
        let config = DiagramConfig {
            direction: FlowDirection::LeftRight,
            stroke: "#000".to_string(),
            stroke_width_px: 3,
            show_recipe_meta: false,
        };
        let diagram = build_diagram(&circuit_catalog(), "Circuit", &config);
        let mut lines = diagram.text().lines();
        assert_eq!(lines.next(), Some("flowchart LR"));
        assert_eq!(lines.next(), Some("Circuit[\"Circuit\"]"));
        assert_eq!(
            lines.next(),
            Some("style Circuit fill:#d7ffd9,stroke:#000,stroke-width:3px")
        );
    }

    #[test]
    fn repeated_ingredient_lines_merge_into_one_edge() {
        let catalog = Catalog::from_items([
            Item::crafted("Steel", 8.0, 1)
                .with_ingredient("Iron Ingot", 1.0)
                .with_ingredient("Coal", 1.0)
                .with_ingredient("Iron Ingot", 1.5),
        ])
        .unwrap();

        let diagram = build_diagram(&catalog, "Steel", &DiagramConfig::default());
        assert_eq!(diagram.edges.len(), 2);
        assert_eq!(diagram.edges[0].to, "Iron_Ingot");
        assert_eq!(diagram.edges[0].quantity, 2.5);
        assert_eq!(diagram.text().matches("Steel -->|×2.5| Iron_Ingot").count(), 1);
        assert_eq!(diagram.text().matches("-->").count(), 2);
    }

    #[test]
    fn fractional_quantities_render_plainly() {
        let catalog =
            Catalog::from_items([Item::crafted("Mix", 1.0, 1).with_ingredient("Dust", 0.25)])
                .unwrap();
        let diagram = build_diagram(&catalog, "Mix", &DiagramConfig::default());
        assert!(diagram.text().ends_with("Mix -->|×0.25| Dust"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: DiagramConfig = serde_json::from_str(r#"{"direction": "LR"}"#).unwrap();
        assert_eq!(config.direction, FlowDirection::LeftRight);
        assert_eq!(config.stroke, "#333");
        assert!(config.show_recipe_meta);
    }
}
