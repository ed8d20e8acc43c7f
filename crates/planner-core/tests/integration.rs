//! End-to-end tests for the planning pipeline: catalog -> cycle check ->
//! demand propagation -> machine sizing, plus the diagram builder.

use planner_core::catalog::Catalog;
use planner_core::cycle::has_cycle;
use planner_core::diagram::{DiagramConfig, build_diagram, subtree_of};
use planner_core::error::{PlanError, QuantityField};
use planner_core::graph::build_graph;
use planner_core::item::Item;
use planner_core::machines::{MachineSizing, size_machines};
use planner_core::plan::{PlanningQuery, TimeUnit, diagram, plan, plan_rate};
use planner_core::rates::compute_rates;
use planner_core::test_utils::*;

// ===========================================================================
// Worked examples
// ===========================================================================

#[test]
fn linear_chain_example() {
    let catalog = linear_chain();

    assert!(!has_cycle(&catalog, "Ingot"));
    let rates = compute_rates(&catalog, "Ingot", 1.0);
    assert_eq!(rates.len(), 2);
    assert_rate(rates.get("Ingot"), 1.0);
    assert_rate(rates.get("Ore"), 1.0);

    let sizing = size_machines(&rates, &catalog).unwrap();
    let rows = sizing.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ingot");
    assert_eq!(rows[0].capacity_per_second, 0.5);
    assert_eq!(rows[0].exact_machines, 2.0);
    assert_eq!(rows[0].required_machines, 2);
}

#[test]
fn diamond_example() {
    let rates = compute_rates(&diamond(), "Gadget", 1.0);

    assert_rate(rates.get("Part"), 2.0);
    assert_rate(rates.get("Wire"), 1.0);
    assert_rate(rates.get("Metal"), 2.0 * 1.0 + 1.0 * 1.0);
}

#[test]
fn cycle_example() {
    let catalog = mutual_cycle();

    assert!(has_cycle(&catalog, "A"));
    assert!(!has_cycle(&catalog, "Plate"));
    assert!(matches!(
        plan_rate(&catalog, "A", 1.0),
        Err(PlanError::CyclicRecipe { .. })
    ));
    assert!(plan_rate(&catalog, "Plate", 1.0).is_ok());
}

// ===========================================================================
// Smelting tree
// ===========================================================================
//
// 1 circuit / 4s => 0.25/s circuit.
// Circuit needs Iron Plate x1 and Copper Wire x2 per craft.

#[test]
fn smelting_tree_plan() {
    let catalog = smelting_tree();
    let query = PlanningQuery::new("Circuit", 15.0, 1.0).with_unit(TimeUnit::Minute);

    let plan = plan(&catalog, &query).unwrap();
    assert_rate(Some(plan.target_per_second), 0.25);

    assert_rate(plan.rates.get("Circuit"), 0.25);
    assert_rate(plan.rates.get("Iron Plate"), 0.25);
    assert_rate(plan.rates.get("Copper Wire"), 0.5);
    // Wire yields 2 per craft: 0.25 crafts/s, 1 ingot each.
    assert_rate(plan.rates.get("Copper Ingot"), 0.25);
    assert_rate(plan.rates.get("Iron Ingot"), 0.25);
    assert_rate(plan.rates.get("Iron Ore"), 0.25);
    assert!(!plan.rates.contains("Steel Ingot"));
    assert!(!plan.rates.contains("Coal"));

    // Circuit 0.25 * 4 = 1.0, Ingots 0.25 * 3.2 = 0.8, Plate 0.4, Wire 0.125
    let names: Vec<&str> = plan.machines.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names[0], "Circuit");
    assert_eq!(names.len(), 5);
    assert_eq!(plan.total_machines(), 5);

    let raw: Vec<&str> = plan.raw_inputs.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(raw, vec!["Iron Ore", "Copper Ore"]);
}

#[test]
fn steel_shares_iron_with_plates() {
    // Both Steel and Plate draw on Iron Ingot through different parents.
    let mut catalog = smelting_tree();
    catalog
        .insert(
            Item::crafted("Frame", 10.0, 1)
                .with_ingredient("Steel Ingot", 1.0)
                .with_ingredient("Iron Plate", 4.0),
        )
        .unwrap();

    let plan = plan_rate(&catalog, "Frame", 0.5).unwrap();
    // Steel 0.5/s * 2 + Plate 2.0/s * 1
    assert_rate(plan.rates.get("Iron Ingot"), 3.0);
    assert_rate(plan.rates.get("Coal"), 0.5);
}

// ===========================================================================
// Error surfaces
// ===========================================================================

#[test]
fn unknown_root_produces_no_partial_result() {
    let result = plan(&smelting_tree(), &PlanningQuery::new("Rocket", 1.0, 1.0));
    assert_eq!(
        result.unwrap_err(),
        PlanError::UnknownRoot {
            name: "Rocket".to_string()
        }
    );
}

#[test]
fn zero_time_window_is_invalid() {
    let result = plan(&smelting_tree(), &PlanningQuery::new("Circuit", 1.0, 0.0));
    assert!(matches!(
        result,
        Err(PlanError::InvalidQuantity {
            field: QuantityField::TimeWindow,
            ..
        })
    ));
}

#[test]
fn catalog_rejects_zero_craft_time() {
    let mut catalog = smelting_tree();
    let result = catalog.replace(Item::crafted("Iron Plate", 0.0, 1));
    assert!(matches!(
        result,
        Err(PlanError::InvalidQuantity {
            field: QuantityField::CraftTime,
            ..
        })
    ));
    // The previous definition is untouched.
    assert_eq!(
        catalog.get("Iron Plate").unwrap().craft_time_seconds,
        Some(1.6)
    );
}

#[test]
fn all_raw_subtree_reports_no_machines() {
    let plan = plan_rate(&smelting_tree(), "Coal", 2.0).unwrap();
    assert_eq!(plan.machines, MachineSizing::NoCraftTimeData);
    assert_rate(plan.rates.get("Coal"), 2.0);
}

// ===========================================================================
// Graph, subtree, diagram
// ===========================================================================

#[test]
fn graph_covers_every_name() {
    let graph = build_graph(&smelting_tree());
    assert_eq!(graph.node_count(), 9);
    assert_eq!(graph.edge_count(), 8);
}

#[test]
fn diagram_restricted_to_subtree() {
    let catalog = smelting_tree();
    let subtree = subtree_of(&catalog, "Steel Ingot");
    let d = build_diagram(&catalog, "Steel Ingot", &DiagramConfig::default());

    assert_eq!(d.nodes.len(), subtree.len());
    for node in &d.nodes {
        assert!(subtree.contains(&node.name));
    }
    assert!(d.node("Circuit").is_none());
    assert!(d.node("Copper Ore").is_none());
    assert!(d.text().contains("Steel_Ingot -->|×2| Iron_Ingot"));
    assert!(d.text().contains("style Coal fill:#242424,stroke:#333,stroke-width:1px"));
}

#[test]
fn diagram_entry_point_rejects_unknown_root() {
    let result = diagram(&Catalog::new(), "Anything", &DiagramConfig::default());
    assert!(matches!(result, Err(PlanError::UnknownRoot { .. })));
}

#[test]
fn catalog_is_not_mutated_by_planning() {
    let catalog = smelting_tree();
    let before: Vec<Item> = catalog
        .sorted_names()
        .into_iter()
        .map(|n| catalog.get(n).unwrap().clone())
        .collect();

    let _ = plan_rate(&catalog, "Circuit", 1.0).unwrap();
    let _ = build_diagram(&catalog, "Circuit", &DiagramConfig::default());

    let after: Vec<Item> = catalog
        .sorted_names()
        .into_iter()
        .map(|n| catalog.get(n).unwrap().clone())
        .collect();
    assert_eq!(before, after);
}
