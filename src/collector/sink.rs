use super::Descriptor;
use anyhow::{bail, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

/// One gauge sample: descriptor, value and label values in descriptor order.
#[derive(Debug, Clone)]
pub struct Sample {
    pub descriptor: Arc<Descriptor>,
    pub value: f64,
    pub label_values: Vec<String>,
}

impl Sample {
    /// `(label name, label value)` pairs in descriptor order.
    pub fn labels(&self) -> Vec<(&'static str, &str)> {
        self.descriptor
            .label_names()
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
            .collect()
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

/// Many-writer metric sink for one scrape.
///
/// Clones share one unbounded channel, so concurrent collectors never block
/// on emission.
#[derive(Debug, Clone)]
pub struct MetricSink {
    tx: mpsc::UnboundedSender<Sample>,
}

/// Read side of a [`MetricSink`].
pub struct SampleReceiver {
    rx: mpsc::UnboundedReceiver<Sample>,
}

impl MetricSink {
    pub fn channel() -> (MetricSink, SampleReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (MetricSink { tx }, SampleReceiver { rx })
    }

    /// Emit a gauge sample.
    ///
    /// The label tuple must match the descriptor's arity exactly; a mismatch
    /// is rejected here instead of surfacing later as an exposition failure.
    pub fn gauge(
        &self,
        descriptor: &Arc<Descriptor>,
        value: f64,
        label_values: Vec<String>,
    ) -> Result<()> {
        let expected = descriptor.label_names().len();
        if label_values.len() != expected {
            bail!(
                "{}: expected {} label values, got {}",
                descriptor.fq_name(),
                expected,
                label_values.len()
            );
        }

        // Receiver gone means the scrape was abandoned; nothing to report to.
        let _ = self.tx.send(Sample {
            descriptor: Arc::clone(descriptor),
            value,
            label_values,
        });
        Ok(())
    }
}

impl SampleReceiver {
    /// Take every sample emitted so far, in emission order.
    pub fn drain(&mut self) -> Vec<Sample> {
        let mut samples = Vec::new();
        while let Ok(sample) = self.rx.try_recv() {
            samples.push(sample);
        }
        samples
    }
}
