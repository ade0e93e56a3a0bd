use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;
mod extract;
mod manifest;
mod platform;
mod reconcile;
mod report;
mod verify;

use cli::{RootArgs, VerifyOptions, USAGE};

fn main() -> ExitCode {
    let root = match RootArgs::try_parse() {
        Ok(root) => root,
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprint!("{err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    let options = match VerifyOptions::from_root(root) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(options.debug);

    match cmd_verify_manifest(&options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cfvm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
    tracing::debug!("debug output enabled");
}

/// Run both checks; `Ok(false)` means the report lists unsatisfied items.
fn cmd_verify_manifest(options: &VerifyOptions) -> Result<bool> {
    let manifest = manifest::load_manifest(&options.manifest_path)?;
    manifest::validate_names(&manifest)?;
    if !options.json {
        println!("Using manifest path: '{}'", options.manifest_path.display());
    }

    let cf_home = config::cf_home()?;
    let target = config::load_target(&cf_home)?;
    if !options.json {
        print!("{}", report::render_target(&target));
    }
    let transport = platform::HttpTransport::new(&target);
    let outcome = verify::verify_manifest(&manifest, &target, &transport)?;

    let rendered = if options.json {
        report::render_json(&options.manifest_path, &outcome)?
    } else {
        report::render_text(&options.manifest_path, &outcome)
    };
    print!("{rendered}");
    Ok(outcome.ok())
}
