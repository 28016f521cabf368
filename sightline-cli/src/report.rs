//! JSON reports handed to the persistence layer
//!
//! Field names are camelCase to match the rest of the survey tooling.

use serde::{Deserialize, Serialize};
use sightline_core::{Azimuth, Coordinate, Dimension};

/// Where the heading used for a projection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingSource {
    /// Resolved against the reference transect
    Transect,
    /// Raw GPS course over ground
    Vessel,
}

/// Computed sighting position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingReport {
    pub heading: Azimuth,
    pub heading_source: HeadingSource,
    /// Compass bearing from the vessel to the sighting
    pub sighting_bearing: Azimuth,
    pub position: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingReport {
    pub transect: String,
    pub travel_bearing: Azimuth,
    pub heading: Azimuth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransectSummary {
    pub name: String,
    pub dimension: Dimension,
    pub parts: usize,
    pub vertices: usize,
    pub length: f64,
}
