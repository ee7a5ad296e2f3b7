//! Nearby command implementation for the TourGuide CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tourguide_core::{
    Attraction, Coordinate, DEFAULT_NEARBY_COUNT, InvalidParameter, RankedAttraction,
    TourGuideConfig, rank,
};

use crate::{
    ARG_CATALOGUE, ARG_COUNT, ARG_LATITUDE, ARG_LONGITUDE, CliError, ENV_CATALOGUE, ENV_LATITUDE,
    ENV_LONGITUDE,
};

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "nearby",
    long_about = "Rank the attractions of a JSON catalogue by their distance \
                 from a coordinate and print the nearest ones as JSON. The \
                 catalogue is an array of objects with name, latitude and \
                 longitude fields, plus optional city and state. Options can \
                 come from CLI flags, configuration files, or environment \
                 variables.",
    about = "List the attractions nearest to a coordinate"
)]
#[ortho_config(prefix = "TOURGUIDE")]
pub(crate) struct NearbyArgs {
    /// Path to the JSON attraction catalogue.
    #[arg(long = ARG_CATALOGUE, value_name = "path")]
    #[serde(default)]
    pub(crate) catalogue: Option<Utf8PathBuf>,
    /// Latitude of the reference position, in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the reference position, in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Number of attractions to list (default 5).
    #[arg(long = ARG_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
}

impl NearbyArgs {
    pub(crate) fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyConfig {
    /// Path to the JSON catalogue.
    pub(crate) catalogue: Utf8PathBuf,
    /// Validated reference position.
    pub(crate) reference: Coordinate,
    /// Number of attractions to list.
    pub(crate) count: usize,
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let catalogue = args.catalogue.ok_or(CliError::MissingArgument {
            field: ARG_CATALOGUE,
            env: ENV_CATALOGUE,
        })?;
        let latitude = args.latitude.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_LATITUDE,
        })?;
        let longitude = args.longitude.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_LONGITUDE,
        })?;
        let reference =
            Coordinate::new(latitude, longitude).map_err(InvalidParameter::Coordinate)?;

        let guide_config = TourGuideConfig::default()
            .with_nearby_count(args.count.unwrap_or(DEFAULT_NEARBY_COUNT));
        guide_config.validate()?;

        Ok(Self {
            catalogue,
            reference,
            count: guide_config.nearby_count,
        })
    }
}

pub(crate) fn run_nearby(args: NearbyArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_nearby_with(args, &mut stdout)
}

pub(crate) fn run_nearby_with(args: NearbyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let ranked = execute_nearby(&config)?;
    write_nearby(writer, &ranked)
}

pub(crate) fn execute_nearby(config: &NearbyConfig) -> Result<Vec<RankedAttraction>, CliError> {
    let attractions = load_catalogue(&config.catalogue)?;
    debug!(
        "ranking {} attractions from {:?}",
        attractions.len(),
        config.catalogue
    );
    Ok(rank(config.reference, &attractions, config.count))
}

/// Loads and validates a JSON attraction catalogue from disk.
pub(crate) fn load_catalogue(path: &Utf8Path) -> Result<Vec<Attraction>, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenCatalogue {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let attractions: Vec<Attraction> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| CliError::ParseCatalogue {
            path: path.to_path_buf(),
            source,
        })?;
    for attraction in &attractions {
        attraction
            .coordinate
            .validate()
            .map_err(|source| CliError::InvalidAttraction {
                path: path.to_path_buf(),
                name: attraction.name.clone(),
                source,
            })?;
    }
    Ok(attractions)
}

pub(crate) fn write_nearby(
    writer: &mut dyn Write,
    ranked: &[RankedAttraction],
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(ranked).map_err(CliError::SerialiseNearby)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteNearbyOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteNearbyOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearbyConfig, CliError> {
    let merged = NearbyArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearbyConfig::try_from(merged)
}
