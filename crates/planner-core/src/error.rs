use std::fmt;

/// Which numeric input a [`PlanError::InvalidQuantity`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityField {
    /// The requested output quantity of a planning query.
    TargetQuantity,
    /// The time window a planning query spreads its target over.
    TimeWindow,
    /// A per-second throughput handed straight to the propagator.
    TargetRate,
    /// An item's craft time in seconds.
    CraftTime,
    /// The quantity of one ingredient consumed per craft.
    IngredientQuantity,
    /// A propagated per-second demand that overflowed.
    DemandRate,
    /// A machine count too large to represent.
    MachineCount,
}

impl fmt::Display for QuantityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuantityField::TargetQuantity => "target quantity",
            QuantityField::TimeWindow => "time window",
            QuantityField::TargetRate => "target rate",
            QuantityField::CraftTime => "craft time",
            QuantityField::IngredientQuantity => "ingredient quantity",
            QuantityField::DemandRate => "demand rate",
            QuantityField::MachineCount => "machine count",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by catalog validation and the planning entry points.
///
/// None of these are fatal: the catalog is never mutated by a failed call and
/// the caller decides how to present the failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The requested root item is not registered in the catalog.
    #[error("unknown root item '{name}'")]
    UnknownRoot { name: String },

    /// A cycle is reachable from the root; rates are undefined.
    #[error("recipe cycle reachable from '{root}': {}", .cycle.join(" -> "))]
    CyclicRecipe { root: String, cycle: Vec<String> },

    /// A quantity that must be positive and finite was not.
    #[error("invalid {field}{}: {value}", .item.as_deref().map(|n| format!(" on '{n}'")).unwrap_or_default())]
    InvalidQuantity {
        item: Option<String>,
        field: QuantityField,
        value: f64,
    },

    /// An item with the same name is already registered.
    #[error("duplicate item '{name}'")]
    DuplicateItem { name: String },
}

/// Returns `Ok(value)` when `value` is finite and strictly positive.
pub(crate) fn require_positive(
    value: f64,
    field: QuantityField,
    item: Option<&str>,
) -> Result<f64, PlanError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlanError::InvalidQuantity {
            item: item.map(str::to_string),
            field,
            value,
        })
    }
}
