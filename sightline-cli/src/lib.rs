//! Sightline command line front end
//!
//! Supplies the pieces the geometry engine leaves to its caller: a catalog
//! of named transects loaded from disk, GPS fix and observation input from
//! the command line, the fallback policy when a transect heading cannot be
//! resolved, and JSON reports for whatever stores the results.

pub mod catalog;
pub mod cli;
pub mod report;

pub use catalog::{CatalogError, Transect, TransectCatalog};
pub use cli::{run, Cli, Command};
pub use report::{HeadingReport, HeadingSource, SightingReport, TransectSummary};
