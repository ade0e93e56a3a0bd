//! Response shapes for the v3 endpoints the checks read.
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ServiceInstanceList {
    #[serde(default)]
    pub resources: Vec<ServiceInstance>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceInstance {
    pub name: String,
}

/// One page of `/v3/domains`: pagination metadata and the resource list.
#[derive(Debug, Deserialize)]
pub struct DomainPage {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub resources: Vec<DomainResource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct DomainResource {
    pub guid: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RouteReservation {
    #[serde(default)]
    pub matching_route: bool,
}
