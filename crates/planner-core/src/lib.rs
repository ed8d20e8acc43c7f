//! Planner Core -- production-chain planning for crafting and factory games.
//!
//! Given a [`catalog::Catalog`] of items (raw materials, and crafted items
//! with a batch yield, a craft time, and ingredient lines) and a target
//! throughput for one root item, this crate computes the per-second demand
//! of every upstream item, the number of machines each crafted item needs,
//! and a flowchart description of the subtree feeding the root.
//!
//! # Pipeline
//!
//! 1. **Validate** -- the query's quantity and time window must be positive
//!    and finite; the root must be registered.
//! 2. **Cycle check** -- a three-colour DFS over the [`graph::RecipeGraph`]
//!    rejects roots that reach a cycle.
//! 3. **Propagate** -- [`rates::compute_rates`] pushes demand down every
//!    ingredient path, summing where paths meet.
//! 4. **Size** -- [`machines::size_machines`] turns rates into machine counts,
//!    rounding up.
//!
//! ```rust
//! use planner_core::catalog::Catalog;
//! use planner_core::item::Item;
//! use planner_core::plan::{PlanningQuery, plan};
//!
//! let catalog = Catalog::from_items([
//!     Item::crafted("Ingot", 2.0, 1).with_ingredient("Ore", 1.0),
//!     Item::raw("Ore"),
//! ])?;
//! let plan = plan(&catalog, &PlanningQuery::new("Ingot", 60.0, 60.0))?;
//! assert_eq!(plan.rates.get("Ore"), Some(1.0));
//! assert_eq!(plan.machines.row("Ingot").map(|r| r.required_machines), Some(2));
//! # Ok::<(), planner_core::error::PlanError>(())
//! ```
//!
//! Every operation is a pure function of its inputs. The catalog is never
//! mutated, and nothing is cached between calls.

pub mod catalog;
pub mod cycle;
pub mod diagram;
pub mod error;
pub mod graph;
pub mod id;
pub mod item;
pub mod machines;
pub mod plan;
pub mod rates;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
