use crate::types::{App, Credential, Deployment, Domain, Instance, Secret, Service};
use anyhow::Result;
use async_trait::async_trait;

/// Read-only view of the Koyeb control plane.
///
/// One list operation per resource kind. Implementations must be safe to call
/// concurrently from several collectors at once; every call is an independent,
/// one-shot request (no retries).
///
/// Records are returned in upstream order. An `Err` means the listing failed
/// as a whole; implementations never return a partial listing.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn list_apps(&self) -> Result<Vec<App>>;

    async fn list_credentials(&self) -> Result<Vec<Credential>>;

    async fn list_deployments(&self) -> Result<Vec<Deployment>>;

    async fn list_domains(&self) -> Result<Vec<Domain>>;

    async fn list_instances(&self) -> Result<Vec<Instance>>;

    async fn list_secrets(&self) -> Result<Vec<Secret>>;

    async fn list_services(&self) -> Result<Vec<Service>>;
}
