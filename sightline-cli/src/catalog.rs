//! Transect Catalog
//!
//! Named survey lines loaded once per session from a JSON file:
//!
//! ```json
//! {
//!   "transects": [
//!     {
//!       "name": "T1",
//!       "dimension": "line",
//!       "parts": [[{ "x": 0.0, "y": 0.0 }, { "x": 0.0, "y": 1500.0 }]]
//!     }
//!   ]
//! }
//! ```
//!
//! `dimension` defaults to `line`. Every transect is validated on load so a
//! bad line is reported once, up front, rather than on every sighting.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sightline_core::{GeometryError, Polyline};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to read transect catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed transect catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("transect '{name}' is not usable: {source}")]
    InvalidTransect {
        name: String,
        #[source]
        source: GeometryError,
    },

    #[error("transect name '{0}' appears more than once")]
    DuplicateName(String),

    #[error("no transect named '{name}' (known: {known})")]
    UnknownTransect { name: String, known: String },
}

/// A named survey line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transect {
    pub name: String,
    #[serde(flatten)]
    pub geometry: Polyline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransectCatalog {
    transects: Vec<Transect>,
}

impl TransectCatalog {
    /// Build a catalog, validating every transect and rejecting duplicate names
    pub fn new(transects: Vec<Transect>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for transect in &transects {
            if !seen.insert(transect.name.as_str()) {
                return Err(CatalogError::DuplicateName(transect.name.clone()));
            }
            transect
                .geometry
                .validate()
                .map_err(|source| CatalogError::InvalidTransect {
                    name: transect.name.clone(),
                    source,
                })?;
        }
        Ok(TransectCatalog { transects })
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: TransectCatalog = serde_json::from_str(text)?;
        TransectCatalog::new(raw.transects)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = TransectCatalog::from_json(&text)?;
        log::info!(
            "Loaded {} transect(s) from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Look up a transect by exact name
    pub fn get(&self, name: &str) -> Result<&Transect, CatalogError> {
        self.transects
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| CatalogError::UnknownTransect {
                name: name.to_string(),
                known: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.transects.iter().map(|t| t.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transect> {
        self.transects.iter()
    }

    pub fn len(&self) -> usize {
        self.transects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transects.is_empty()
    }
}
