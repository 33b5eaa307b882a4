use super::resource::{Resource, ResourceCollector};
use anyhow::Result;
use futures::future::BoxFuture;
use koyeb_api::{Credential, PlatformApi};

/// Koyeb API credentials
pub struct Credentials;

impl Resource for Credentials {
    type Record = Credential;

    const KIND: &'static str = "Credentials";
    const SUBSYSTEM: &'static str = "credentials";
    const HELP: &'static str = "1 if the Credentials is up, 0 otherwise";
    const LABELS: &'static [&'static str] = &["id", "organization_id", "user_id", "name"];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<Credential>>> {
        api.list_credentials()
    }

    fn labels(credential: &Credential) -> Vec<String> {
        vec![
            credential.id.clone(),
            credential.organization_id.clone(),
            credential.user_id.clone(),
            credential.name.clone(),
        ]
    }
}

pub type CredentialsCollector = ResourceCollector<Credentials>;
