//! Classification of manifest items against fetched platform state.
//!
//! Mismatches are outcomes, not errors. Only a failed reservation query can
//! abort route reconciliation.
use crate::error::VerifyError;
use crate::extract::{split_route, ManifestRoute, ManifestService};
use crate::platform::DomainIndex;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Default, Clone)]
pub struct ServiceCheck {
    pub satisfied: Vec<ManifestService>,
    pub unsatisfied: Vec<ManifestService>,
}

impl ServiceCheck {
    pub fn ok(&self) -> bool {
        self.unsatisfied.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteProblem {
    MissingDomain,
    UnknownDomain(String),
    Reserved,
}

impl fmt::Display for RouteProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteProblem::MissingDomain => write!(f, "invalid route: missing domain"),
            RouteProblem::UnknownDomain(domain) => write!(f, "unknown domain '{domain}'"),
            RouteProblem::Reserved => write!(f, "route already reserved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFinding {
    pub app: String,
    pub route: String,
    pub problem: RouteProblem,
}

#[derive(Debug, Default, Clone)]
pub struct RouteCheck {
    pub satisfied: Vec<ManifestRoute>,
    pub unsatisfied: Vec<RouteFinding>,
}

impl RouteCheck {
    pub fn ok(&self) -> bool {
        self.unsatisfied.is_empty()
    }
}

/// Partition wanted services by membership in the provisioned set.
pub fn reconcile_services(
    wanted: &[ManifestService],
    available: &BTreeSet<String>,
) -> ServiceCheck {
    let mut check = ServiceCheck::default();
    for item in wanted {
        if available.contains(&item.service) {
            check.satisfied.push(item.clone());
        } else {
            check.unsatisfied.push(item.clone());
        }
    }
    check
}

/// Classify each route. `is_reserved(host, domain_guid)` is only consulted
/// for routes whose domain is known.
pub fn reconcile_routes<F>(
    wanted: &[ManifestRoute],
    domains: &DomainIndex,
    mut is_reserved: F,
) -> Result<RouteCheck, VerifyError>
where
    F: FnMut(&str, &str) -> Result<bool, VerifyError>,
{
    let mut check = RouteCheck::default();
    for item in wanted {
        let (host, domain) = split_route(&item.route);
        let problem = if domain.is_empty() {
            Some(RouteProblem::MissingDomain)
        } else {
            match domains.guid(domain) {
                None => Some(RouteProblem::UnknownDomain(domain.to_string())),
                Some(guid) => is_reserved(host, guid)?.then_some(RouteProblem::Reserved),
            }
        };
        match problem {
            Some(problem) => check.unsatisfied.push(RouteFinding {
                app: item.app.clone(),
                route: item.route.clone(),
                problem,
            }),
            None => check.satisfied.push(item.clone()),
        }
    }
    Ok(check)
}
