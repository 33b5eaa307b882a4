//! In-process stand-in for the Koyeb API used by collector and registry tests.

use crate::probe::{self, Status, StatusReceiver};
use crate::shutdown::{self, Shutdown};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use koyeb_api::{App, Credential, Deployment, Domain, Instance, PlatformApi, Secret, Service};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned listings. A kind named in `failing` errors instead of returning
/// its records; `delay` is applied before every call.
#[derive(Default)]
pub(crate) struct StubApi {
    pub apps: Vec<App>,
    pub credentials: Vec<Credential>,
    pub deployments: Vec<Deployment>,
    pub domains: Vec<Domain>,
    pub instances: Vec<Instance>,
    pub secrets: Vec<Secret>,
    pub services: Vec<Service>,
    pub failing: HashSet<&'static str>,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl StubApi {
    pub fn failing(kinds: &[&'static str]) -> Self {
        Self {
            failing: kinds.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond<T: Clone>(&self, kind: &str, records: &[T]) -> Result<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(kind) {
            return Err(anyhow!("Koyeb API error: 503 Service Unavailable"));
        }
        Ok(records.to_vec())
    }
}

#[async_trait]
impl PlatformApi for StubApi {
    async fn list_apps(&self) -> Result<Vec<App>> {
        self.respond("apps", &self.apps).await
    }

    async fn list_credentials(&self) -> Result<Vec<Credential>> {
        self.respond("credentials", &self.credentials).await
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        self.respond("deployments", &self.deployments).await
    }

    async fn list_domains(&self) -> Result<Vec<Domain>> {
        self.respond("domains", &self.domains).await
    }

    async fn list_instances(&self) -> Result<Vec<Instance>> {
        self.respond("instances", &self.instances).await
    }

    async fn list_secrets(&self) -> Result<Vec<Secret>> {
        self.respond("secrets", &self.secrets).await
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        self.respond("services", &self.services).await
    }
}

/// A shutdown signal that is never raised.
pub(crate) fn no_shutdown() -> Shutdown {
    shutdown::channel().1
}

/// Liveness channel with room for every signal a test can produce.
pub(crate) fn liveness() -> (probe::StatusSender, StatusReceiver) {
    probe::channel(64)
}

/// Every status currently buffered.
pub(crate) fn drain_statuses(rx: &mut StatusReceiver) -> Vec<Status> {
    let mut statuses = Vec::new();
    while let Ok(status) = rx.try_recv() {
        statuses.push(status);
    }
    statuses
}
