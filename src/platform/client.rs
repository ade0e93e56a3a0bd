//! Blocking HTTP transport against the control-plane API.
use super::Transport;
use crate::config::TargetConfig;
use crate::error::VerifyError;
use std::time::Instant;
use ureq::tls::TlsConfig;
use ureq::Agent;

pub struct HttpTransport {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl HttpTransport {
    pub fn new(target: &TargetConfig) -> Self {
        let tls = TlsConfig::builder()
            .disable_verification(target.skip_ssl_validation)
            .build();
        let config = Agent::config_builder().tls_config(tls).build();
        HttpTransport {
            agent: Agent::new_with_config(config),
            base_url: target.api_endpoint.clone(),
            authorization: target.access_token.clone(),
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<String, VerifyError> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();
        let mut resp = self
            .agent
            .get(&url)
            .header("Authorization", self.authorization.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", concat!("cfvm/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(|err| VerifyError::query(path, err))?;
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|err| VerifyError::query(path, err))?;
        let elapsed_ms = start.elapsed().as_millis();

        tracing::debug!(
            path,
            elapsed_ms,
            response_bytes = body.len(),
            "platform query complete"
        );
        Ok(body)
    }
}
