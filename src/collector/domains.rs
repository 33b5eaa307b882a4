use super::resource::{Resource, ResourceCollector};
use anyhow::Result;
use futures::future::BoxFuture;
use koyeb_api::{Domain, PlatformApi};

/// Koyeb Domains
pub struct Domains;

impl Resource for Domains {
    type Record = Domain;

    const KIND: &'static str = "Domains";
    const SUBSYSTEM: &'static str = "domains";
    const HELP: &'static str = "1 if the Domain is up, 0 otherwise";
    const LABELS: &'static [&'static str] =
        &["id", "app_id", "organization_id", "name", "status", "type"];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<Domain>>> {
        api.list_domains()
    }

    fn labels(domain: &Domain) -> Vec<String> {
        vec![
            domain.id.clone(),
            domain.app_id.clone(),
            domain.organization_id.clone(),
            domain.name.clone(),
            domain.status.clone(),
            domain.domain_type.clone(),
        ]
    }
}

pub type DomainsCollector = ResourceCollector<Domains>;
