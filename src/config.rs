//! Target configuration loaded from the platform CLI's config document.
//!
//! The platform CLI stores the logged-in API endpoint, bearer token, and
//! targeted org/space in `$CF_HOME/.cf/config.json`. Verification reads that
//! document instead of prompting for credentials.
use crate::error::VerifyError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CF_HOME_ENV: &str = "CF_HOME";
const CONFIG_REL: &str = ".cf/config.json";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CfConfigFile {
    #[serde(default)]
    target: String,
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    organization_fields: NamedGuid,
    #[serde(default)]
    space_fields: NamedGuid,
    #[serde(default, rename = "SSLDisabled")]
    ssl_disabled: bool,
}

#[derive(Debug, Default, Deserialize)]
struct NamedGuid {
    #[serde(default, rename = "GUID")]
    guid: String,
    #[serde(default, rename = "Name")]
    name: String,
}

/// Resolved target for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetConfig {
    pub api_endpoint: String,
    #[serde(skip)]
    pub access_token: String,
    pub org: String,
    pub space: String,
    pub space_guid: String,
    pub skip_ssl_validation: bool,
}

/// Directory holding `.cf/`: `$CF_HOME`, else the user's home directory.
pub fn cf_home() -> Result<PathBuf, VerifyError> {
    if let Some(home) = env::var_os(CF_HOME_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| VerifyError::Config("cannot determine home directory".into()))
}

pub fn config_path(cf_home: &Path) -> PathBuf {
    cf_home.join(CONFIG_REL)
}

/// Load and validate the target from `<cf_home>/.cf/config.json`.
pub fn load_target(cf_home: &Path) -> Result<TargetConfig, VerifyError> {
    let path = config_path(cf_home);
    let bytes = fs::read(&path)
        .map_err(|err| VerifyError::Config(format!("read {}: {err}", path.display())))?;
    let target = parse_target(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        api = %target.api_endpoint,
        space = %target.space,
        "loaded target config"
    );
    Ok(target)
}

pub fn parse_target(bytes: &[u8]) -> Result<TargetConfig, VerifyError> {
    let raw: CfConfigFile = serde_json::from_slice(bytes)
        .map_err(|err| VerifyError::Config(format!("parse config JSON: {err}")))?;
    let api_endpoint = raw.target.trim().trim_end_matches('/').to_string();
    if api_endpoint.is_empty() {
        return Err(VerifyError::Config(
            "no API endpoint set; log in with the platform CLI first".into(),
        ));
    }
    if raw.access_token.trim().is_empty() {
        return Err(VerifyError::Config(
            "no access token; log in with the platform CLI first".into(),
        ));
    }
    if raw.space_fields.guid.trim().is_empty() {
        return Err(VerifyError::Config(
            "no space targeted; target an org and space first".into(),
        ));
    }
    Ok(TargetConfig {
        api_endpoint,
        access_token: raw.access_token.trim().to_string(),
        org: raw.organization_fields.name,
        space: raw.space_fields.name,
        space_guid: raw.space_fields.guid,
        skip_ssl_validation: raw.ssl_disabled,
    })
}
