//! Machine sizing: how many crafting machines sustain each item's rate.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::{PlanError, QuantityField};
use crate::rates::RateMap;

/// Machine requirement for one crafted item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineRow {
    pub name: String,
    /// Units per second the plan needs.
    pub required_rate: f64,
    /// Units per second one machine produces running continuously.
    pub capacity_per_second: f64,
    pub exact_machines: f64,
    /// `exact_machines` rounded up; partial machines cannot be built.
    pub required_machines: u64,
}

/// Outcome of sizing a rate map.
///
/// `NoCraftTimeData` is a valid answer, not a failure: every rated item is a
/// raw material, so no machine is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum MachineSizing {
    Sized(Vec<MachineRow>),
    NoCraftTimeData,
}

impl MachineSizing {
    /// Rows ordered largest bottleneck first. Empty for `NoCraftTimeData`.
    pub fn rows(&self) -> &[MachineRow] {
        match self {
            MachineSizing::Sized(rows) => rows,
            MachineSizing::NoCraftTimeData => &[],
        }
    }

    pub fn is_sized(&self) -> bool {
        matches!(self, MachineSizing::Sized(_))
    }

    /// Sum of `required_machines` over all rows, saturating at `u64::MAX`.
    pub fn total_machines(&self) -> u64 {
        self.rows()
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.required_machines))
    }

    pub fn row(&self, name: &str) -> Option<&MachineRow> {
        self.rows().iter().find(|r| r.name == name)
    }
}

/// Size machines for every rated item that has a craft time.
///
/// `capacity = output_quantity / craft_time`, `exact = rate / capacity`,
/// `required = ceil(exact)`. Rows are sorted by descending `exact_machines`;
/// ties keep rate-map order. Items without a craft time, or not registered
/// at all, are skipped.
///
/// Fails with [`PlanError::InvalidQuantity`] when a machine count is not
/// finite or does not fit in a `u64`.
pub fn size_machines(rates: &RateMap, catalog: &Catalog) -> Result<MachineSizing, PlanError> {
    let mut rows = Vec::new();
    for entry in rates.iter() {
        let Some(capacity) = catalog
            .get(&entry.name)
            .and_then(|item| item.capacity_per_second())
        else {
            continue;
        };
        let exact = entry.per_second / capacity;
        let required_machines = machine_count(exact).ok_or_else(|| PlanError::InvalidQuantity {
            item: Some(entry.name.clone()),
            field: QuantityField::MachineCount,
            value: exact,
        })?;
        rows.push(MachineRow {
            name: entry.name.clone(),
            required_rate: entry.per_second,
            capacity_per_second: capacity,
            exact_machines: exact,
            required_machines,
        });
    }

    if rows.is_empty() {
        return Ok(MachineSizing::NoCraftTimeData);
    }

    rows.sort_by(|a, b| b.exact_machines.total_cmp(&a.exact_machines));
    Ok(MachineSizing::Sized(rows))
}

/// `ceil(exact)` as a `u64`, or `None` if it is not finite or out of range.
fn machine_count(exact: f64) -> Option<u64> {
    let ceiled = exact.ceil();
    // `u64::MAX as f64` rounds up to 2^64, which itself is out of range.
    (ceiled.is_finite() && ceiled >= 0.0 && ceiled < u64::MAX as f64).then_some(ceiled as u64)
}
