//! Error types emitted by the TourGuide CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tourguide_core::{CoordinateError, InvalidParameter};

/// Errors emitted by the TourGuide CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The query parameters were rejected.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),
    /// Opening the catalogue file failed.
    #[error("failed to open catalogue at {path:?}: {source}")]
    OpenCatalogue {
        /// Catalogue path as given.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The catalogue was not a JSON array of attractions.
    #[error("failed to parse catalogue at {path:?}: {source}")]
    ParseCatalogue {
        /// Catalogue path as given.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A catalogue entry carried an invalid coordinate.
    #[error("attraction {name:?} in {path:?} has an invalid coordinate: {source}")]
    InvalidAttraction {
        /// Catalogue path as given.
        path: Utf8PathBuf,
        /// Name of the offending attraction.
        name: String,
        /// Validation failure.
        #[source]
        source: CoordinateError,
    },
    /// Serialising the ranked attractions failed.
    #[error("failed to serialise nearby attractions: {0}")]
    SerialiseNearby(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write nearby attractions: {0}")]
    WriteNearbyOutput(#[source] std::io::Error),
}
