//! CLI argument parsing for the verify-manifest check.
//!
//! Parsing never exits the process; `main` decides what a usage error costs.
use crate::error::VerifyError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// One-line usage printed alongside usage errors.
pub const USAGE: &str = "Usage: cfvm verify-manifest -f PATH_TO_MANIFEST [--debug true] [--json]";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "cfvm",
    version,
    about = "Verify manifest service bindings and routes against the current Cloud Foundry target",
    after_help = "Examples:\n  cfvm verify-manifest -f manifest.yml\n  cfvm verify-manifest -f manifest.yml --debug true\n  cfvm verify-manifest -f manifest.yml --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    VerifyManifest(VerifyManifestArgs),
}

/// Inputs for checking one manifest against the target space.
#[derive(Parser, Debug)]
#[command(about = "Verify manifest.yml for service instances and routes")]
pub struct VerifyManifestArgs {
    /// Path to an application manifest
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<String>,

    /// Enable debug diagnostics when set to any non-empty value
    #[arg(long, value_name = "VALUE")]
    pub debug: Option<String>,

    /// Emit the report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Validated options for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOptions {
    pub manifest_path: PathBuf,
    pub debug: bool,
    pub json: bool,
}

impl VerifyOptions {
    pub fn from_root(root: RootArgs) -> Result<Self, VerifyError> {
        let Command::VerifyManifest(args) = root.command;
        Self::from_args(args)
    }

    pub fn from_args(args: VerifyManifestArgs) -> Result<Self, VerifyError> {
        let manifest_path = match args.file {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => return Err(VerifyError::Usage("missing manifest argument".to_string())),
        };
        Ok(VerifyOptions {
            manifest_path,
            debug: args.debug.is_some_and(|value| !value.is_empty()),
            json: args.json,
        })
    }
}
