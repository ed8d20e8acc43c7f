//! Catalog documents for the planner.
//!
//! Parses keyed item documents (`name -> item`) written in RON, TOML, or
//! JSON into a validated [`planner_core::catalog::Catalog`], and ships the
//! bundled demo catalog.

pub mod demo;
pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, Format, load_catalog_str};
