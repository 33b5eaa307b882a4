use super::resource::{Resource, ResourceCollector};
use anyhow::Result;
use futures::future::BoxFuture;
use koyeb_api::{Instance, PlatformApi};

/// Koyeb Instances
pub struct Instances;

impl Resource for Instances {
    type Record = Instance;

    const KIND: &'static str = "Instances";
    const SUBSYSTEM: &'static str = "instances";
    const HELP: &'static str = "1 if the Instance is up, 0 otherwise";
    const LABELS: &'static [&'static str] =
        &["id", "app_id", "service_id", "organization_id", "region", "status"];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<Instance>>> {
        api.list_instances()
    }

    fn labels(instance: &Instance) -> Vec<String> {
        vec![
            instance.id.clone(),
            instance.app_id.clone(),
            instance.service_id.clone(),
            instance.organization_id.clone(),
            instance.region.clone(),
            instance.status.clone(),
        ]
    }
}

pub type InstancesCollector = ResourceCollector<Instances>;
