//! The bundled demo catalog: iron, copper, and coal chains feeding steel,
//! plates, wire, and circuits.

use planner_core::catalog::Catalog;

use crate::loader::{DataLoadError, Format, load_catalog_str};

/// Raw JSON of the demo catalog.
pub const DEMO_CATALOG_JSON: &str = include_str!("../data/demo_catalog.json");

/// Parse the bundled demo catalog.
pub fn demo_catalog() -> Result<Catalog, DataLoadError> {
    load_catalog_str(DEMO_CATALOG_JSON, Format::Json)
}
