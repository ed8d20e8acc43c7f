//! Production chain example: circuits from iron and copper ore.
//!
//! Plans 30 circuits per minute, prints the rate and machine tables, then
//! the flowchart text for the circuit subtree.
//!
//! Run with: `cargo run -p planner-core --example production_chain`

use planner_core::catalog::Catalog;
use planner_core::diagram::DiagramConfig;
use planner_core::error::PlanError;
use planner_core::item::Item;
use planner_core::machines::MachineSizing;
use planner_core::plan::{PlanningQuery, TimeUnit, diagram, plan};

fn main() -> Result<(), PlanError> {
    let catalog = Catalog::from_items([
        Item::crafted("Iron Ingot", 3.2, 1).with_ingredient("Iron Ore", 1.0),
        Item::crafted("Copper Ingot", 3.2, 1).with_ingredient("Copper Ore", 1.0),
        Item::crafted("Iron Plate", 1.6, 1).with_ingredient("Iron Ingot", 1.0),
        Item::crafted("Copper Wire", 0.5, 2).with_ingredient("Copper Ingot", 1.0),
        Item::crafted("Circuit", 4.0, 1)
            .with_ingredient("Iron Plate", 1.0)
            .with_ingredient("Copper Wire", 2.0)
            .with_color("#d7ffd9"),
    ])?;

    // Ores were never registered; they resolve as raw materials.
    println!("unregistered: {:?}", catalog.unregistered_references());

    let query = PlanningQuery::new("Circuit", 30.0, 1.0).with_unit(TimeUnit::Minute);
    let plan = plan(&catalog, &query)?;

    println!("\n{:<14} {:>12}", "item", "per second");
    for entry in plan.rates_descending() {
        println!("{:<14} {:>12.6}", entry.name, entry.per_second);
    }

    println!(
        "\n{:<14} {:>12} {:>10} {:>8}",
        "item", "capacity/s", "exact", "needed"
    );
    match &plan.machines {
        MachineSizing::Sized(rows) => {
            for row in rows {
                println!(
                    "{:<14} {:>12.6} {:>10.3} {:>8}",
                    row.name, row.capacity_per_second, row.exact_machines, row.required_machines
                );
            }
        }
        MachineSizing::NoCraftTimeData => println!("only raw materials; no machines required"),
    }
    println!("total machines: {}", plan.total_machines());

    println!("\n{}", diagram(&catalog, "Circuit", &DiagramConfig::default())?);
    Ok(())
}
