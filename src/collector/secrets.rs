use super::resource::{Resource, ResourceCollector};
use crate::registry_type::RegistryType;
use anyhow::Result;
use futures::future::BoxFuture;
use koyeb_api::{PlatformApi, Secret};

/// Koyeb Secrets
pub struct Secrets;

impl Resource for Secrets {
    type Record = Secret;

    const KIND: &'static str = "Secrets";
    const SUBSYSTEM: &'static str = "secrets";
    const HELP: &'static str = "1 if the Secret is up, 0 otherwise";
    // registry is synthetic: derived from the secret's registry sub-objects
    const LABELS: &'static [&'static str] = &["id", "organization_id", "name", "type", "registry"];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<Secret>>> {
        api.list_secrets()
    }

    fn labels(secret: &Secret) -> Vec<String> {
        vec![
            secret.id.clone(),
            secret.organization_id.clone(),
            secret.name.clone(),
            secret.secret_type.clone(),
            RegistryType::classify(&secret.registries).to_string(),
        ]
    }
}

pub type SecretsCollector = ResourceCollector<Secrets>;
