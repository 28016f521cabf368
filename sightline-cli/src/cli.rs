//! Command line definition and command handlers
//!
//! All configuration comes from the command line. Each subcommand produces a
//! serializable report which [`run`] renders as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use serde::Serialize;
use sightline_core::{
    project_position, Azimuth, Coordinate, GpsFix, HeadingResolver, Observation,
};

use crate::catalog::TransectCatalog;
use crate::report::{HeadingReport, HeadingSource, SightingReport, TransectSummary};

#[derive(Parser, Clone, Debug)]
#[command(name = "sightline", version, about = "Locate survey sightings made from a moving vessel")]
pub struct Cli {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Indent the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Project a sighting using the raw vessel heading
    Project(ProjectArgs),
    /// Resolve the vessel heading against a transect
    Heading(HeadingArgs),
    /// Resolve the heading against a transect, then project the sighting
    Locate(LocateArgs),
    /// List the transects in a catalog
    Transects(CatalogArgs),
}

#[derive(Args, Clone, Debug)]
pub struct CatalogArgs {
    /// Transect catalog (JSON)
    #[arg(long, value_name = "FILE")]
    pub transects: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct TransectArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Name of the transect being surveyed
    #[arg(long, value_name = "NAME")]
    pub line: String,
}

#[derive(Args, Clone, Debug)]
pub struct PositionArgs {
    /// Vessel easting
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,

    /// Vessel northing
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,
}

impl PositionArgs {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

#[derive(Args, Clone, Debug)]
pub struct FixArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// GPS course over ground, compass degrees
    #[arg(long, allow_negative_numbers = true)]
    pub bearing: f64,
}

impl FixArgs {
    pub fn fix(&self) -> Result<GpsFix> {
        GpsFix::new(self.position.coordinate(), self.bearing).context("invalid GPS fix")
    }
}

#[derive(Args, Clone, Debug)]
pub struct ObservationArgs {
    /// Sighting angle, degrees clockwise from the stern (180 = bow)
    #[arg(long, allow_negative_numbers = true)]
    pub relative_angle: f64,

    /// Distance from the vessel to the sighting
    #[arg(long)]
    pub distance: f64,
}

impl ObservationArgs {
    pub fn observation(&self) -> Result<Observation> {
        Observation::new(self.relative_angle, self.distance).context("invalid observation")
    }
}

#[derive(Args, Clone, Debug)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Vessel heading, compass degrees
    #[arg(long, allow_negative_numbers = true)]
    pub heading: f64,

    #[command(flatten)]
    pub observation: ObservationArgs,
}

#[derive(Args, Clone, Debug)]
pub struct HeadingArgs {
    #[command(flatten)]
    pub transect: TransectArgs,

    #[command(flatten)]
    pub fix: FixArgs,
}

#[derive(Args, Clone, Debug)]
pub struct LocateArgs {
    #[command(flatten)]
    pub transect: TransectArgs,

    #[command(flatten)]
    pub fix: FixArgs,

    #[command(flatten)]
    pub observation: ObservationArgs,

    /// Use the raw GPS bearing when the transect heading cannot be resolved
    #[arg(long)]
    pub fallback_to_vessel_bearing: bool,
}

/// Execute the selected command and render its report as JSON
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Project(args) => render(&project(args)?, cli.pretty),
        Command::Heading(args) => render(&heading(args)?, cli.pretty),
        Command::Locate(args) => render(&locate(args)?, cli.pretty),
        Command::Transects(args) => render(&transects(args)?, cli.pretty),
    }
}

fn render<T: Serialize>(report: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    text.context("unable to serialize report")
}

pub fn project(args: &ProjectArgs) -> Result<SightingReport> {
    let heading = Azimuth::try_new(args.heading).context("invalid heading")?;
    let observation = args.observation.observation()?;
    sighting(args.position.coordinate(), heading, HeadingSource::Vessel, &observation)
}

pub fn heading(args: &HeadingArgs) -> Result<HeadingReport> {
    let fix = args.fix.fix()?;
    let heading = resolve_on_transect(&args.transect, &fix)?;
    Ok(HeadingReport {
        transect: args.transect.line.clone(),
        travel_bearing: fix.travel_bearing,
        heading,
    })
}

pub fn locate(args: &LocateArgs) -> Result<SightingReport> {
    let fix = args.fix.fix()?;
    let observation = args.observation.observation()?;

    let (heading, source) = match resolve_on_transect(&args.transect, &fix) {
        Ok(heading) => (heading, HeadingSource::Transect),
        Err(e) if args.fallback_to_vessel_bearing => {
            log::warn!(
                "Transect heading unavailable ({:#}), using vessel bearing {:.1}",
                e,
                fix.travel_bearing
            );
            (fix.travel_bearing, HeadingSource::Vessel)
        }
        Err(e) => return Err(e),
    };

    sighting(fix.location, heading, source, &observation)
}

pub fn transects(args: &CatalogArgs) -> Result<Vec<TransectSummary>> {
    let catalog = TransectCatalog::load(&args.transects)?;
    Ok(catalog
        .iter()
        .map(|t| TransectSummary {
            name: t.name.clone(),
            dimension: t.geometry.dimension(),
            parts: t.geometry.parts().len(),
            vertices: t.geometry.vertex_count(),
            length: t.geometry.length(),
        })
        .collect())
}

fn resolve_on_transect(args: &TransectArgs, fix: &GpsFix) -> Result<Azimuth> {
    let catalog = TransectCatalog::load(&args.catalog.transects)?;
    let transect = catalog.get(&args.line)?;
    let heading = HeadingResolver::new(&transect.geometry)
        .and_then(|resolver| resolver.resolve(fix))
        .with_context(|| format!("unable to resolve heading on transect '{}'", transect.name))?;
    log::info!(
        "Heading {:.1} on transect '{}' (GPS bearing {:.1})",
        heading,
        transect.name,
        fix.travel_bearing
    );
    Ok(heading)
}

fn sighting(
    origin: Coordinate,
    heading: Azimuth,
    source: HeadingSource,
    observation: &Observation,
) -> Result<SightingReport> {
    let position = project_position(
        origin,
        heading,
        observation.relative_angle,
        observation.distance,
    )
    .context("unable to project sighting")?;
    Ok(SightingReport {
        heading,
        heading_source: source,
        sighting_bearing: observation.absolute_azimuth(heading),
        position,
    })
}
