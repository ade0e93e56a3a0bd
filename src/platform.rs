//! Read-only queries against the target platform.
//!
//! Every query is a blocking GET issued through a [`Transport`], one at a time.
//! Service and domain listings fail the run on any transport or decode error.
//! The reservation check is lenient about its response body: a body that does
//! not decode is logged and read as "not reserved". Transport failures on that
//! check are still fatal.
use crate::error::VerifyError;
use std::collections::{BTreeMap, BTreeSet};

mod client;
mod types;

pub use client::HttpTransport;
use types::{DomainPage, RouteReservation, ServiceInstanceList};

/// Page size for the paginated domain listing.
pub const DOMAIN_PAGE_SIZE: u32 = 50;
/// Service instances are read in a single page of the maximum size.
pub const SERVICE_PAGE_SIZE: u32 = 5000;

/// GET a path relative to the API endpoint and return the body.
pub trait Transport {
    fn get(&self, path: &str) -> Result<String, VerifyError>;
}

/// Domain name to platform identifier, plus every name seen in listing order.
#[derive(Debug, Default, Clone)]
pub struct DomainIndex {
    guids: BTreeMap<String, String>,
    names: Vec<String>,
}

impl DomainIndex {
    pub fn insert(&mut self, name: String, guid: String) {
        self.names.push(name.clone());
        self.guids.insert(name, guid);
    }

    pub fn guid(&self, name: &str) -> Option<&str> {
        self.guids.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Names of the service instances provisioned in the targeted space.
pub fn fetch_service_names<T: Transport + ?Sized>(
    transport: &T,
    space_guid: &str,
) -> Result<BTreeSet<String>, VerifyError> {
    let path = format!(
        "/v3/service_instances?space_guids={}&per_page={SERVICE_PAGE_SIZE}",
        urlencoding::encode(space_guid)
    );
    let body = transport.get(&path)?;
    let list: ServiceInstanceList =
        serde_json::from_str(&body).map_err(|err| VerifyError::query(&path, err))?;
    let names: BTreeSet<String> = list.resources.into_iter().map(|item| item.name).collect();
    tracing::debug!(count = names.len(), "fetched service instances");
    Ok(names)
}

/// Walk every page of the domain listing, starting at page 1, until the
/// reported current page reaches the reported page count.
pub fn fetch_domain_index<T: Transport + ?Sized>(
    transport: &T,
) -> Result<DomainIndex, VerifyError> {
    let mut index = DomainIndex::default();
    let mut page: u32 = 1;
    loop {
        let path = format!("/v3/domains?page={page}&per_page={DOMAIN_PAGE_SIZE}");
        let body = transport.get(&path)?;
        let listing: DomainPage =
            serde_json::from_str(&body).map_err(|err| VerifyError::query(&path, err))?;
        tracing::debug!(
            page,
            total_pages = listing.pagination.total_pages,
            total_results = listing.pagination.total_results,
            resources = listing.resources.len(),
            "fetched domain page"
        );
        for resource in listing.resources {
            tracing::debug!(guid = %resource.guid, name = %resource.name, "domain");
            index.insert(resource.name, resource.guid);
        }
        if page >= listing.pagination.total_pages {
            break;
        }
        page += 1;
    }
    Ok(index)
}

/// Whether `host` is already claimed on the domain with `domain_guid`.
pub fn check_route_reserved<T: Transport + ?Sized>(
    transport: &T,
    host: &str,
    domain_guid: &str,
) -> Result<bool, VerifyError> {
    let path = format!(
        "/v3/domains/{domain_guid}/route_reservations?host={}",
        urlencoding::encode(host)
    );
    tracing::debug!(host, domain_guid, "checking route reservation");
    let body = transport.get(&path)?;
    match parse_reservation(&path, &body) {
        Ok(reservation) => Ok(reservation.matching_route),
        Err(err) => {
            tracing::warn!(error = %err, "treating route as not reserved");
            Ok(false)
        }
    }
}

fn parse_reservation(path: &str, body: &str) -> Result<RouteReservation, VerifyError> {
    serde_json::from_str(body).map_err(|err| VerifyError::RouteReservationCheck {
        path: path.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
#[path = "platform_tests.rs"]
pub(crate) mod tests;
