//! Shared test infrastructure: a mock control-plane API and a temporary
//! `CF_HOME` pointing the binary at it.

use mockito::{Matcher, Mock, Server, ServerGuard};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub const ACCESS_TOKEN: &str = "bearer test-token";
pub const SPACE_GUID: &str = "space-guid";

const PROXY_VARS: &[&str] = &[
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

/// Mock platform plus the config that targets it.
pub struct MockPlatform {
    server: ServerGuard,
    mocks: Vec<Mock>,
    cf_home: TempDir,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        let server = Server::new();
        let cf_home = tempfile::tempdir().expect("create CF_HOME");
        let config = serde_json::json!({
            "ConfigVersion": 3,
            "Target": server.url(),
            "AccessToken": ACCESS_TOKEN,
            "OrganizationFields": { "GUID": "org-guid", "Name": "acme" },
            "SpaceFields": { "GUID": SPACE_GUID, "Name": "dev" },
            "SSLDisabled": false
        });
        let cf_dir = cf_home.path().join(".cf");
        std::fs::create_dir_all(&cf_dir).expect("create .cf dir");
        std::fs::write(cf_dir.join("config.json"), config.to_string()).expect("write config");
        MockPlatform {
            server,
            mocks: Vec::new(),
            cf_home,
        }
    }

    pub fn services(mut self, names: &[&str]) -> Self {
        let resources: Vec<serde_json::Value> = names
            .iter()
            .map(|name| serde_json::json!({ "guid": format!("{name}-guid"), "name": name }))
            .collect();
        let body = serde_json::json!({
            "pagination": { "total_results": names.len(), "total_pages": 1 },
            "resources": resources,
        });
        let mock = self
            .server
            .mock("GET", "/v3/service_instances")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("space_guids".into(), SPACE_GUID.into()),
                Matcher::UrlEncoded("per_page".into(), "5000".into()),
            ]))
            .match_header("authorization", ACCESS_TOKEN)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();
        self.mocks.push(mock);
        self
    }

    /// Serve the domain listing, one page per slice entry.
    pub fn domain_pages(mut self, pages: &[&[(&str, &str)]]) -> Self {
        let total_pages = pages.len();
        let total_results: usize = pages.iter().map(|page| page.len()).sum();
        for (index, page) in pages.iter().enumerate() {
            let resources: Vec<serde_json::Value> = page
                .iter()
                .map(|(guid, name)| serde_json::json!({ "guid": guid, "name": name }))
                .collect();
            let body = serde_json::json!({
                "pagination": { "total_results": total_results, "total_pages": total_pages },
                "resources": resources,
            });
            let mock = self
                .server
                .mock("GET", "/v3/domains")
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("page".into(), (index + 1).to_string()),
                    Matcher::UrlEncoded("per_page".into(), "50".into()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .create();
            self.mocks.push(mock);
        }
        self
    }

    pub fn reservation(self, domain_guid: &str, host: &str, reserved: bool) -> Self {
        let body = serde_json::json!({ "matching_route": reserved }).to_string();
        self.reservation_body(domain_guid, host, &body)
    }

    pub fn reservation_body(mut self, domain_guid: &str, host: &str, body: &str) -> Self {
        let mock = self
            .server
            .mock(
                "GET",
                format!("/v3/domains/{domain_guid}/route_reservations").as_str(),
            )
            .match_query(Matcher::UrlEncoded("host".into(), host.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();
        self.mocks.push(mock);
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_cfvm"));
        command
            .args(args)
            .env("CF_HOME", self.cf_home.path())
            .env_remove("RUST_LOG");
        for var in PROXY_VARS {
            command.env_remove(var);
        }
        command.output().expect("run cfvm")
    }
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
