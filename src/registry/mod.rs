// Collector registry: the single scrapeable unit behind the metrics endpoint
//
// Registration checks descriptor names once; every scrape fans out to all
// collectors concurrently and merges their samples into gauge families.

use crate::collector::{Collector, Descriptor, MetricSink, Sample};
use anyhow::{bail, Context, Result};
use futures::future::join_all;
use prometheus::core::Collector as _;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, TextEncoder};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Content type of the Prometheus text exposition format.
pub use prometheus::TEXT_FORMAT;

pub struct CollectorRegistry {
    collectors: Vec<Arc<dyn Collector>>,
    /// Fully-qualified names of every registered descriptor
    descriptors: HashSet<String>,
    scrapes: AtomicU64,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self {
            collectors: Vec::new(),
            descriptors: HashSet::new(),
            scrapes: AtomicU64::new(0),
        }
    }

    /// Register a collector.
    ///
    /// Fails, leaving the registry unchanged, if any of the collector's
    /// descriptor names is already registered or repeated within the
    /// collector itself.
    pub fn register(&mut self, collector: Arc<dyn Collector>) -> Result<()> {
        let mut names = HashSet::new();
        for descriptor in collector.describe() {
            let name = descriptor.fq_name();
            if self.descriptors.contains(&name) || !names.insert(name.clone()) {
                bail!(
                    "collector {}: descriptor {} already registered",
                    collector.name(),
                    name
                );
            }
        }

        debug!(collector = collector.name(), descriptors = ?names, "Registered collector");
        self.descriptors.extend(names);
        self.collectors.push(collector);
        Ok(())
    }

    /// Names of the registered collectors, in registration order.
    pub fn collector_names(&self) -> Vec<String> {
        self.collectors.iter().map(|c| c.name().to_string()).collect()
    }

    /// Number of scrapes served since start.
    pub fn scrape_count(&self) -> u64 {
        self.scrapes.load(Ordering::Relaxed)
    }

    /// Run one scrape.
    ///
    /// Every collector's `collect` runs concurrently; one collector failing
    /// only removes its own samples. Families are sorted by name.
    pub async fn gather(&self) -> Vec<MetricFamily> {
        self.scrapes.fetch_add(1, Ordering::Relaxed);

        let (sink, mut receiver) = MetricSink::channel();
        join_all(self.collectors.iter().map(|c| c.collect(&sink))).await;
        drop(sink);

        let samples = receiver.drain();
        debug!(samples = samples.len(), "Scrape complete");
        self.build_families(samples)
    }

    fn build_families(&self, samples: Vec<Sample>) -> Vec<MetricFamily> {
        let mut grouped: BTreeMap<String, (Arc<Descriptor>, Vec<Sample>)> = BTreeMap::new();
        for sample in samples {
            let name = sample.descriptor.fq_name();
            if !self.descriptors.contains(&name) {
                warn!(metric = %name, "Sample for unregistered descriptor dropped");
                continue;
            }
            grouped
                .entry(name)
                .or_insert_with(|| (Arc::clone(&sample.descriptor), Vec::new()))
                .1
                .push(sample);
        }

        let mut families = Vec::with_capacity(grouped.len());
        for (name, (descriptor, samples)) in grouped {
            let gauges = match descriptor.gauge_vec() {
                Ok(gauges) => gauges,
                Err(e) => {
                    warn!(metric = %name, error = %e, "Invalid descriptor");
                    continue;
                }
            };
            for sample in &samples {
                let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
                match gauges.get_metric_with_label_values(&values) {
                    Ok(gauge) => gauge.set(sample.value),
                    Err(e) => warn!(metric = %name, error = %e, "Sample dropped"),
                }
            }
            families.extend(gauges.collect());
        }
        families
    }
}

impl Default for CollectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Render families in the Prometheus text exposition format.
pub fn encode_text(families: &[MetricFamily]) -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(families, &mut buffer)
        .context("Failed to encode metrics")?;
    String::from_utf8(buffer).context("Encoded metrics are not UTF-8")
}

#[cfg(test)]
mod tests;
