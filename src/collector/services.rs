use super::resource::{Resource, ResourceCollector};
use anyhow::Result;
use futures::future::BoxFuture;
use koyeb_api::{PlatformApi, Service};

/// Koyeb Services
pub struct Services;

impl Resource for Services {
    type Record = Service;

    const KIND: &'static str = "Services";
    const SUBSYSTEM: &'static str = "services";
    const HELP: &'static str = "1 if the Service is up, 0 otherwise";
    const LABELS: &'static [&'static str] = &["id", "app_id", "organization_id", "name", "status"];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<Service>>> {
        api.list_services()
    }

    fn labels(service: &Service) -> Vec<String> {
        vec![
            service.id.clone(),
            service.app_id.clone(),
            service.organization_id.clone(),
            service.name.clone(),
            service.status.clone(),
        ]
    }
}

pub type ServicesCollector = ResourceCollector<Services>;
