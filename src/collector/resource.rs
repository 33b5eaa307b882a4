//! Generic per-resource collector.
//!
//! Every resource kind follows the same scrape protocol; only the list call,
//! the descriptor and the record-to-labels mapping differ. Those live in a
//! [`Resource`] implementation, one per kind.
//!
//! # Scrape protocol
//!
//! 1. Call the kind's list operation (abandoned early once shutdown is
//!    requested).
//! 2. Failure: log the error, send `Status { healthy: false, "unable to list <Kind>" }`,
//!    emit nothing.
//! 3. Success: send `Status::ok()` first, then one gauge sample (value 1.0)
//!    per record.
//!
//! Exactly one status is sent per `collect`, on either path.

use super::{Collector, Descriptor, MetricSink};
use crate::probe::{Status, StatusSender};
use crate::shutdown::Shutdown;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::future::BoxFuture;
use koyeb_api::PlatformApi;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// A Koyeb resource kind the exporter reports presence for.
pub trait Resource: Send + Sync + 'static {
    type Record: Send;

    /// Name used in liveness messages ("unable to list <KIND>")
    const KIND: &'static str;

    /// Metric subsystem: the family is `koyeb_<SUBSYSTEM>_up`
    const SUBSYSTEM: &'static str;

    const HELP: &'static str;

    /// Label names, in the order [`Resource::labels`] returns values
    const LABELS: &'static [&'static str];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<Self::Record>>>;

    fn labels(record: &Self::Record) -> Vec<String>;
}

/// Collects `koyeb_<subsystem>_up` for one resource kind.
pub struct ResourceCollector<R: Resource> {
    api: Arc<dyn PlatformApi>,
    liveness: StatusSender,
    shutdown: Shutdown,
    up: Arc<Descriptor>,
    _kind: PhantomData<R>,
}

impl<R: Resource> ResourceCollector<R> {
    /// Build the collector and freeze its descriptor. No I/O.
    pub fn new(api: Arc<dyn PlatformApi>, liveness: StatusSender, shutdown: Shutdown) -> Self {
        Self {
            api,
            liveness,
            shutdown,
            up: Arc::new(Descriptor::new(R::SUBSYSTEM, "up", R::HELP, R::LABELS)),
            _kind: PhantomData,
        }
    }

    async fn list(&self) -> Result<Vec<R::Record>> {
        tokio::select! {
            biased;
            _ = self.shutdown.requested() => Err(anyhow!("shutdown requested")),
            records = R::list(self.api.as_ref()) => records,
        }
    }

    /// Send this scrape's single liveness signal.
    async fn report(&self, status: Status) {
        if self.liveness.send(status).await.is_err() {
            // Consumer already gone (shutdown); the signal has nowhere to go.
            debug!(collector = R::SUBSYSTEM, "Liveness consumer closed, status dropped");
        }
    }
}

#[async_trait]
impl<R: Resource> Collector for ResourceCollector<R> {
    fn name(&self) -> &str {
        R::SUBSYSTEM
    }

    fn describe(&self) -> Vec<Arc<Descriptor>> {
        vec![Arc::clone(&self.up)]
    }

    async fn collect(&self, sink: &MetricSink) {
        let records = match self.list().await {
            Ok(records) => records,
            Err(e) => {
                let message = format!("unable to list {}", R::KIND);
                warn!(collector = R::SUBSYSTEM, error = %e, "{}", message);
                self.report(Status::unhealthy(message)).await;
                return;
            }
        };

        self.report(Status::ok()).await;

        for record in &records {
            if let Err(e) = sink.gauge(&self.up, 1.0, R::labels(record)) {
                error!(collector = R::SUBSYSTEM, error = %e, "Dropped sample");
            }
        }
        debug!(collector = R::SUBSYSTEM, count = records.len(), "Collected");
    }
}
