mod apps;
mod credentials;
mod deployments;
mod domains;
mod exporter;
mod instances;
mod resource;
mod secrets;
mod services;
mod sink;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use prometheus::{GaugeVec, Opts};
use std::sync::Arc;

pub use apps::{Apps, AppsCollector};
pub use credentials::{Credentials, CredentialsCollector};
pub use deployments::{Deployments, DeploymentsCollector};
pub use domains::{Domains, DomainsCollector};
pub use exporter::ExporterCollector;
pub use instances::{Instances, InstancesCollector};
pub use resource::{Resource, ResourceCollector};
pub use secrets::{Secrets, SecretsCollector};
pub use services::{Services, ServicesCollector};
pub use sink::{MetricSink, Sample, SampleReceiver};

/// Prefix shared by every metric the exporter serves.
pub const NAMESPACE: &str = "koyeb";

/// Trait for all metric collectors.
///
/// A collector declares its descriptors up front and emits samples for them
/// on every scrape. The registry may run `collect` for several collectors
/// concurrently, so implementations must not assume exclusive access to
/// anything but their own descriptors.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Short name used in logs and registration errors (e.g., "apps")
    fn name(&self) -> &str;

    /// The collector's descriptors. No I/O, no side effects.
    fn describe(&self) -> Vec<Arc<Descriptor>>;

    /// Emit this scrape's samples into `sink`.
    async fn collect(&self, sink: &MetricSink);
}

/// Immutable declaration of a gauge family: name, help text and the ordered
/// label names every sample must supply values for.
#[derive(Debug, Clone)]
pub struct Descriptor {
    opts: Opts,
    label_names: &'static [&'static str],
}

impl Descriptor {
    /// `koyeb_<subsystem>_<name>`
    pub fn new(
        subsystem: &str,
        name: &str,
        help: &str,
        label_names: &'static [&'static str],
    ) -> Self {
        let opts = Opts::new(name, help)
            .namespace(NAMESPACE)
            .subsystem(subsystem);
        Self { opts, label_names }
    }

    pub fn fq_name(&self) -> String {
        self.opts.fq_name()
    }

    pub fn help(&self) -> &str {
        &self.opts.help
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        self.label_names
    }

    /// A fresh, unregistered gauge vector for one scrape's samples.
    pub(crate) fn gauge_vec(&self) -> prometheus::Result<GaugeVec> {
        GaugeVec::new(self.opts.clone(), self.label_names)
    }
}
