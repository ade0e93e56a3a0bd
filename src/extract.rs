//! Flattening of the manifest into (application, item) pairs.
//!
//! Both extractors are fail-closed: a manifest with an unnamed application
//! yields nothing rather than pairs attributed to an empty name.
use crate::manifest::Manifest;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestService {
    pub app: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRoute {
    pub app: String,
    pub route: String,
}

/// One pair per service binding per application, in manifest order.
pub fn services_of(manifest: &Manifest) -> Vec<ManifestService> {
    if !manifest.has_valid_names() {
        return Vec::new();
    }
    let services: Vec<ManifestService> = manifest
        .applications
        .iter()
        .flat_map(|app| {
            app.services.iter().map(|binding| ManifestService {
                app: app.name.clone(),
                service: binding.name().to_string(),
            })
        })
        .collect();
    for item in &services {
        tracing::debug!(app = %item.app, service = %item.service, "manifest service");
    }
    services
}

/// One pair per route per application, in manifest order.
pub fn routes_of(manifest: &Manifest) -> Vec<ManifestRoute> {
    if !manifest.has_valid_names() {
        return Vec::new();
    }
    let mut routes = Vec::new();
    for app in &manifest.applications {
        for entry in &app.routes {
            tracing::debug!(
                app = %app.name,
                route = %entry.route,
                protocol = entry.protocol.as_deref().unwrap_or("-"),
                "manifest route"
            );
            routes.push(ManifestRoute {
                app: app.name.clone(),
                route: entry.route.clone(),
            });
        }
    }
    routes
}

/// Split `host.domain` at the first dot. A route without a dot has an empty
/// domain.
pub fn split_route(route: &str) -> (&str, &str) {
    route.split_once('.').unwrap_or((route, ""))
}
