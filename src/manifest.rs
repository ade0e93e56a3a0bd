//! Application manifest schema and loading.
//!
//! Only service bindings and routes matter to verification; `env` is parsed so
//! real manifests load cleanly, then ignored.
use crate::error::VerifyError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub env: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    pub services: Vec<ServiceBinding>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// A service binding, either a bare instance name or the long form with
/// binding parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ServiceBinding {
    Name(String),
    Detailed { name: String },
}

impl ServiceBinding {
    pub fn name(&self) -> &str {
        match self {
            ServiceBinding::Name(name) => name,
            ServiceBinding::Detailed { name } => name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub protocol: Option<String>,
}

impl Manifest {
    /// Index of the first application whose name is empty, if any.
    pub fn first_unnamed(&self) -> Option<usize> {
        self.applications
            .iter()
            .position(|app| app.name.trim().is_empty())
    }

    pub fn has_valid_names(&self) -> bool {
        self.first_unnamed().is_none()
    }
}

/// Read and deserialize a manifest document.
pub fn load_manifest(path: &Path) -> Result<Manifest, VerifyError> {
    let text = fs::read_to_string(path).map_err(|source| VerifyError::ManifestIo {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = parse_manifest(&text).map_err(|source| VerifyError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })?;
    for app in &manifest.applications {
        tracing::debug!(
            app = %app.name,
            services = app.services.len(),
            routes = app.routes.len(),
            env_vars = app.env.len(),
            "loaded application"
        );
    }
    Ok(manifest)
}

/// Parse manifest text; a blank document is a manifest with no applications.
pub fn parse_manifest(text: &str) -> Result<Manifest, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(Manifest::default());
    }
    serde_yaml::from_str(text)
}

/// Reject manifests containing an application without a name.
pub fn validate_names(manifest: &Manifest) -> Result<(), VerifyError> {
    match manifest.first_unnamed() {
        Some(index) => Err(VerifyError::ManifestValidation { index }),
        None => Ok(()),
    }
}
