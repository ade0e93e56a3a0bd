//! Error kinds surfaced by manifest verification.
//!
//! Reconciliation mismatches are not errors; they live in the report. Every
//! variant here ends the run with a non-zero exit, except
//! `RouteReservationCheck`, which the fetcher logs and downgrades.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("{0}")]
    Usage(String),

    #[error("unable to read manifest file {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse manifest file {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("application at index {index} has an empty name")]
    ManifestValidation { index: usize },

    #[error("target configuration: {0}")]
    Config(String),

    #[error("platform query {path} failed: {message}")]
    PlatformQuery { path: String, message: String },

    #[error("route reservation response for {path} is malformed: {message}")]
    RouteReservationCheck { path: String, message: String },
}

impl VerifyError {
    pub(crate) fn query(path: &str, message: impl std::fmt::Display) -> Self {
        VerifyError::PlatformQuery {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}
