//! Planning entry points: validate a query, reject unknown or cyclic roots,
//! then propagate demand and size machines.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::cycle::find_cycle;
use crate::diagram::{Diagram, DiagramConfig, build_diagram};
use crate::error::{PlanError, QuantityField, require_positive};
use crate::machines::{MachineSizing, size_machines};
use crate::rates::{RateEntry, RateMap, compute_rates};

/// Unit of the time window a target quantity is spread over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3600.0,
        }
    }
}

/// "Produce `target_quantity` of `root` every `over_time_units` units."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningQuery {
    pub root: String,
    pub target_quantity: f64,
    pub over_time_units: f64,
    #[serde(default)]
    pub unit: TimeUnit,
}

impl PlanningQuery {
    /// A query whose window is measured in seconds.
    pub fn new(root: impl Into<String>, target_quantity: f64, over_seconds: f64) -> Self {
        Self {
            root: root.into(),
            target_quantity,
            over_time_units: over_seconds,
            unit: TimeUnit::Second,
        }
    }

    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Target throughput in units per second.
    ///
    /// Fails unless both the quantity and the window are positive and finite.
    pub fn per_second(&self) -> Result<f64, PlanError> {
        let quantity = require_positive(self.target_quantity, QuantityField::TargetQuantity, None)?;
        let window = require_positive(self.over_time_units, QuantityField::TimeWindow, None)?;
        let rate = quantity / (window * self.unit.seconds());
        // Guards against underflow to zero or overflow to infinity.
        require_positive(rate, QuantityField::TargetRate, None)
    }
}

/// Everything computed for one planning query.
#[derive(Debug, Clone, Serialize)]
pub struct ProductionPlan {
    pub root: String,
    pub target_per_second: f64,
    pub rates: RateMap,
    pub machines: MachineSizing,
    /// Rated items with no craft time, in rate-map order.
    pub raw_inputs: Vec<RateEntry>,
}

impl ProductionPlan {
    /// All rates, highest first.
    pub fn rates_descending(&self) -> Vec<&RateEntry> {
        self.rates.sorted_descending()
    }

    /// Rated items with no craft time.
    pub fn raw_materials(&self) -> &[RateEntry] {
        &self.raw_inputs
    }

    pub fn total_machines(&self) -> u64 {
        self.machines.total_machines()
    }
}

/// Check that `root` is registered and no cycle is reachable from it.
pub fn check_root(catalog: &Catalog, root: &str) -> Result<(), PlanError> {
    if !catalog.contains(root) {
        return Err(PlanError::UnknownRoot {
            name: root.to_string(),
        });
    }
    if let Some(cycle) = find_cycle(catalog, root) {
        tracing::warn!(root, cycle = ?cycle, "rejecting cyclic recipe");
        return Err(PlanError::CyclicRecipe {
            root: root.to_string(),
            cycle,
        });
    }
    Ok(())
}

/// Compute rates and machine counts for a query.
///
/// Fails with [`PlanError::InvalidQuantity`] for a bad target or window,
/// [`PlanError::UnknownRoot`] for an unregistered root, and
/// [`PlanError::CyclicRecipe`] when a cycle is reachable from the root.
/// Demand that overflows to infinity along a chain, or a machine count too
/// large for a `u64`, is also [`PlanError::InvalidQuantity`]. No partial
/// result is produced on failure.
pub fn plan(catalog: &Catalog, query: &PlanningQuery) -> Result<ProductionPlan, PlanError> {
    let target_per_second = query.per_second()?;
    plan_rate(catalog, &query.root, target_per_second)
}

/// Like [`plan`], with the target already expressed per second.
pub fn plan_rate(
    catalog: &Catalog,
    root: &str,
    target_per_second: f64,
) -> Result<ProductionPlan, PlanError> {
    require_positive(target_per_second, QuantityField::TargetRate, None)?;
    check_root(catalog, root)?;

    tracing::debug!(root, target_per_second, "planning production chain");

    let rates = compute_rates(catalog, root, target_per_second);
    if let Some(entry) = rates.iter().find(|entry| !entry.per_second.is_finite()) {
        return Err(PlanError::InvalidQuantity {
            item: Some(entry.name.clone()),
            field: QuantityField::DemandRate,
            value: entry.per_second,
        });
    }
    let machines = size_machines(&rates, catalog)?;
    let raw_inputs = rates
        .iter()
        .filter(|entry| {
            catalog
                .get(&entry.name)
                .is_none_or(|item| item.craft_time_seconds.is_none())
        })
        .cloned()
        .collect();

    if !machines.is_sized() {
        tracing::debug!(root, "no craft-time data; no machines required");
    }

    Ok(ProductionPlan {
        root: root.to_string(),
        target_per_second,
        rates,
        machines,
        raw_inputs,
    })
}

/// Build the diagram for a registered root.
///
/// Cyclic roots are accepted: subtree extraction never revisits a node.
pub fn diagram(
    catalog: &Catalog,
    root: &str,
    config: &DiagramConfig,
) -> Result<Diagram, PlanError> {
    if !catalog.contains(root) {
        return Err(PlanError::UnknownRoot {
            name: root.to_string(),
        });
    }
    Ok(build_diagram(catalog, root, config))
}
