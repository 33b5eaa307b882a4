use super::resource::{Resource, ResourceCollector};
use anyhow::Result;
use futures::future::BoxFuture;
use koyeb_api::{Deployment, PlatformApi};

/// Koyeb Deployments
pub struct Deployments;

impl Resource for Deployments {
    type Record = Deployment;

    const KIND: &'static str = "Deployments";
    const SUBSYSTEM: &'static str = "deployments";
    const HELP: &'static str = "1 if the Deployment is up, 0 otherwise";
    const LABELS: &'static [&'static str] = &[
        "id",
        "app_id",
        "deployment_group",
        "name",
        "service_id",
        "status",
        "type",
    ];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<Deployment>>> {
        api.list_deployments()
    }

    // name and type come from the deployment's definition
    fn labels(deployment: &Deployment) -> Vec<String> {
        vec![
            deployment.id.clone(),
            deployment.app_id.clone(),
            deployment.deployment_group.clone(),
            deployment.definition_name().to_string(),
            deployment.service_id.clone(),
            deployment.status.clone(),
            deployment.definition_type().to_string(),
        ]
    }
}

pub type DeploymentsCollector = ResourceCollector<Deployments>;
