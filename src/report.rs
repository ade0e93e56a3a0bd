//! Text and JSON rendering of a verification outcome.
use crate::config::TargetConfig;
use crate::extract::{ManifestRoute, ManifestService};
use crate::verify::VerifyOutcome;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    manifest: String,
    ok: bool,
    target: &'a TargetConfig,
    services: JsonServices<'a>,
    routes: JsonRoutes<'a>,
}

#[derive(Serialize)]
struct JsonServices<'a> {
    ok: bool,
    available: &'a BTreeSet<String>,
    satisfied: &'a [ManifestService],
    unsatisfied: &'a [ManifestService],
}

#[derive(Serialize)]
struct JsonRoutes<'a> {
    ok: bool,
    domain_count: usize,
    satisfied: &'a [ManifestRoute],
    unsatisfied: Vec<JsonRouteFinding<'a>>,
}

#[derive(Serialize)]
struct JsonRouteFinding<'a> {
    app: &'a str,
    route: &'a str,
    reason: String,
}

pub fn render_json(manifest_path: &Path, outcome: &VerifyOutcome) -> serde_json::Result<String> {
    let report = JsonReport {
        manifest: manifest_path.display().to_string(),
        ok: outcome.ok(),
        target: &outcome.target,
        services: JsonServices {
            ok: outcome.services.ok(),
            available: &outcome.available_services,
            satisfied: &outcome.services.satisfied,
            unsatisfied: &outcome.services.unsatisfied,
        },
        routes: JsonRoutes {
            ok: outcome.routes.ok(),
            domain_count: outcome.domain_count,
            satisfied: &outcome.routes.satisfied,
            unsatisfied: outcome
                .routes
                .unsatisfied
                .iter()
                .map(|finding| JsonRouteFinding {
                    app: &finding.app,
                    route: &finding.route,
                    reason: finding.problem.to_string(),
                })
                .collect(),
        },
    };
    let mut text = serde_json::to_string_pretty(&report)?;
    text.push('\n');
    Ok(text)
}

/// Target block printed before any platform query runs.
pub fn render_target(target: &TargetConfig) -> String {
    let mut out = String::new();
    out.push_str("Target:\n");
    out.push_str(&format!("  API endpoint: {}\n", target.api_endpoint));
    out.push_str(&format!("  Org:          {}\n", or_unset(&target.org)));
    out.push_str(&format!("  Space:        {}\n", or_unset(&target.space)));
    out
}

/// Service and route sections plus the final verdict line.
pub fn render_text(manifest_path: &Path, outcome: &VerifyOutcome) -> String {
    let mut out = String::new();
    append_services(&mut out, manifest_path, outcome);
    append_routes(&mut out, manifest_path, outcome);
    let verdict = if outcome.ok() { "OK" } else { "FAILED" };
    out.push_str(&format!("\nverify-manifest: {verdict}\n"));
    out
}

fn append_services(out: &mut String, manifest_path: &Path, outcome: &VerifyOutcome) {
    let check = &outcome.services;
    out.push_str(&format!(
        "\nChecking service instances from the manifest ... {}\n",
        manifest_path.display()
    ));
    out.push_str("  Existing service instances in current space:\n");
    for name in &outcome.available_services {
        out.push_str(&format!("  - '{name}'\n"));
    }
    if !check.satisfied.is_empty() {
        out.push_str(
            "  [GOOD] Service instances specified in the manifest exist in current space:\n",
        );
        for item in &check.satisfied {
            out.push_str(&format!("  - app: '{}', service: '{}'\n", item.app, item.service));
        }
    }
    if !check.unsatisfied.is_empty() {
        out.push_str(
            "  [ERROR] Service instances specified in the manifest are missing from current space:\n",
        );
        for item in &check.unsatisfied {
            out.push_str(&format!("  - app: '{}', service: '{}'\n", item.app, item.service));
        }
    }
}

fn append_routes(out: &mut String, manifest_path: &Path, outcome: &VerifyOutcome) {
    let check = &outcome.routes;
    out.push_str(&format!(
        "\nChecking route availability from the manifest ... {}\n",
        manifest_path.display()
    ));
    if !check.satisfied.is_empty() {
        out.push_str("  [GOOD] Routes specified in the manifest are available:\n");
        for item in &check.satisfied {
            out.push_str(&format!("  - app: '{}', route: '{}'\n", item.app, item.route));
        }
    }
    if !check.unsatisfied.is_empty() {
        out.push_str("  [ERROR] Routes specified in the manifest are not available:\n");
        for finding in &check.unsatisfied {
            out.push_str(&format!(
                "  - app: '{}', route: '{}' -> {}\n",
                finding.app, finding.route, finding.problem
            ));
        }
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "<unset>"
    } else {
        value
    }
}
