//! Format detection and parsing of keyed catalog documents.
//!
//! A catalog document maps item names to [`ItemData`] entries. Parsing
//! fills a missing `name` from its key, rejects a conflicting one, and
//! pushes every item through [`Catalog::insert`] so quantity validation
//! happens in one place.

use std::fmt;
use std::path::Path;

use planner_core::catalog::Catalog;
use planner_core::error::PlanError;
use serde::de::DeserializeOwned;

use crate::schema::{CatalogDocument, ItemData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a catalog or config document.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The text could not be deserialized.
    #[error("{format} parse error: {detail}")]
    Parse { format: Format, detail: String },

    /// An entry's `name` disagrees with the key it is stored under.
    #[error("item stored under '{key}' is named '{name}'")]
    KeyMismatch { key: String, name: String },

    /// The extension is not one of `ron`, `toml`, `json`.
    #[error("unsupported format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// An item was rejected by the catalog.
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Map a file extension (without the dot, case-insensitive) to a format.
    pub fn from_extension(extension: &str) -> Result<Self, DataLoadError> {
        match extension.to_ascii_lowercase().as_str() {
            "ron" => Ok(Format::Ron),
            "toml" => Ok(Format::Toml),
            "json" => Ok(Format::Json),
            _ => Err(DataLoadError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Ron => "RON",
            Format::Toml => "TOML",
            Format::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    Format::from_extension(extension)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `text` as `T` in the given format.
pub fn parse_str<T: DeserializeOwned>(text: &str, format: Format) -> Result<T, DataLoadError> {
    let parse_error = |detail: String| DataLoadError::Parse { format, detail };
    match format {
        Format::Ron => ron::from_str(text).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(text).map_err(|e| parse_error(e.to_string())),
    }
}

/// Build a catalog from an already-parsed document.
///
/// Entries are inserted in key order, so the first error reported is
/// deterministic.
pub fn catalog_from_document(document: CatalogDocument) -> Result<Catalog, DataLoadError> {
    let mut catalog = Catalog::new();
    for (key, data) in document {
        check_name(&key, &data)?;
        catalog.insert(data.into_item(&key))?;
    }
    Ok(catalog)
}

fn check_name(key: &str, data: &ItemData) -> Result<(), DataLoadError> {
    if let Some(name) = data.name.as_deref()
        && !name.is_empty()
        && name != key
    {
        return Err(DataLoadError::KeyMismatch {
            key: key.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Parse a keyed catalog document into a validated catalog.
pub fn load_catalog_str(text: &str, format: Format) -> Result<Catalog, DataLoadError> {
    let document: CatalogDocument = parse_str(text, format)?;
    let catalog = catalog_from_document(document)?;

    tracing::debug!(
        %format,
        items = catalog.len(),
        unregistered = catalog.unregistered_references().len(),
        "catalog document parsed"
    );
    Ok(catalog)
}

/// Read a catalog file, detecting its format from the extension.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, DataLoadError> {
    let format = detect_format(path)?;
    let text = std::fs::read_to_string(path)?;
    load_catalog_str(&text, format)
}
