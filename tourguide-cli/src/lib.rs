//! Command-line interface for querying a TourGuide attraction catalogue.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod nearby;

pub use error::CliError;

use nearby::{NearbyArgs, run_nearby};

pub(crate) const ARG_CATALOGUE: &str = "catalogue";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_COUNT: &str = "count";
pub(crate) const ENV_CATALOGUE: &str = "TOURGUIDE_CMDS_NEARBY_CATALOGUE";
pub(crate) const ENV_LATITUDE: &str = "TOURGUIDE_CMDS_NEARBY_LATITUDE";
pub(crate) const ENV_LONGITUDE: &str = "TOURGUIDE_CMDS_NEARBY_LONGITUDE";

/// Run the TourGuide CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, the catalogue or the
/// output stream fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Nearby(args) => run_nearby(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tourguide",
    about = "Rank tourist attractions by distance from a position",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the attractions nearest to a coordinate as JSON.
    Nearby(NearbyArgs),
}

#[cfg(test)]
mod tests;
