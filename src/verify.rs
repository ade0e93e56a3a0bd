//! One verification pass: extract, fetch, reconcile.
//!
//! Both checks always run; the overall result is their conjunction.
use crate::config::TargetConfig;
use crate::error::VerifyError;
use crate::extract::{routes_of, services_of};
use crate::manifest::{validate_names, Manifest};
use crate::platform::{self, Transport};
use crate::reconcile::{reconcile_routes, reconcile_services, RouteCheck, ServiceCheck};
use std::collections::BTreeSet;

#[derive(Debug)]
pub struct VerifyOutcome {
    pub target: TargetConfig,
    pub available_services: BTreeSet<String>,
    pub domain_count: usize,
    pub services: ServiceCheck,
    pub routes: RouteCheck,
}

impl VerifyOutcome {
    pub fn ok(&self) -> bool {
        let services_ok = self.services.ok();
        let routes_ok = self.routes.ok();
        services_ok && routes_ok
    }
}

pub fn verify_manifest<T: Transport + ?Sized>(
    manifest: &Manifest,
    target: &TargetConfig,
    transport: &T,
) -> Result<VerifyOutcome, VerifyError> {
    validate_names(manifest)?;

    let wanted_services = services_of(manifest);
    let available_services = platform::fetch_service_names(transport, &target.space_guid)?;
    let services = reconcile_services(&wanted_services, &available_services);

    let wanted_routes = routes_of(manifest);
    let domains = platform::fetch_domain_index(transport)?;
    if domains.is_empty() {
        tracing::warn!("target reports no domains; every route will be unsatisfied");
    }
    let routes = reconcile_routes(&wanted_routes, &domains, |host, guid| {
        platform::check_route_reserved(transport, host, guid)
    })?;

    tracing::debug!(
        services_ok = services.ok(),
        routes_ok = routes.ok(),
        "verification complete"
    );
    Ok(VerifyOutcome {
        target: target.clone(),
        available_services,
        domain_count: domains.len(),
        services,
        routes,
    })
}
