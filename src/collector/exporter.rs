use super::{Collector, Descriptor, MetricSink};
use crate::config::BuildInfo;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

/// Reports the exporter's own build metadata as a constant gauge.
///
/// Has no external dependency, cannot fail and takes no part in liveness.
pub struct ExporterCollector {
    label_values: Vec<String>,
    build_info: Arc<Descriptor>,
}

impl ExporterCollector {
    pub fn new(info: &BuildInfo) -> Self {
        Self {
            label_values: vec![
                info.os_version.clone(),
                info.build_version.clone(),
                info.git_commit.clone(),
                info.start_time.to_string(),
            ],
            build_info: Arc::new(Descriptor::new(
                "exporter",
                "build_info",
                "A metric with a constant '1' value labeled by OS version, build version, git commit & start time",
                &["os_version", "build_version", "git_commit", "start_time"],
            )),
        }
    }
}

#[async_trait]
impl Collector for ExporterCollector {
    fn name(&self) -> &str {
        "exporter"
    }

    fn describe(&self) -> Vec<Arc<Descriptor>> {
        vec![Arc::clone(&self.build_info)]
    }

    async fn collect(&self, sink: &MetricSink) {
        if let Err(e) = sink.gauge(&self.build_info, 1.0, self.label_values.clone()) {
            error!(collector = "exporter", error = %e, "Dropped sample");
        }
    }
}
