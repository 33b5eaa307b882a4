use chrono::{DateTime, Utc};
use serde::Serialize;

/// Static build and runtime metadata reported by the exporter collector,
/// the index page and `/varz`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Kernel release of the build host (`uname -r`)
    pub os_version: String,
    pub build_version: String,
    pub git_commit: String,
    /// Process start, UNIX epoch seconds
    pub start_time: i64,
}

impl BuildInfo {
    /// Build from compile-time values, falling back to env vars at runtime.
    ///
    /// `GIT_COMMIT` and `OS_VERSION` are expected to be set during the build;
    /// they stay empty otherwise.
    pub fn from_env() -> Self {
        Self {
            os_version: build_value(option_env!("OS_VERSION"), "OS_VERSION"),
            build_version: env!("CARGO_PKG_VERSION").to_string(),
            git_commit: build_value(option_env!("GIT_COMMIT"), "GIT_COMMIT"),
            start_time: Utc::now().timestamp(),
        }
    }

    /// Names of expected build values that were never set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.git_commit.is_empty() {
            missing.push("GIT_COMMIT");
        }
        if self.os_version.is_empty() {
            missing.push("OS_VERSION");
        }
        missing
    }

    /// Start time as RFC 3339, for display.
    pub fn start_time_formatted(&self) -> String {
        DateTime::<Utc>::from_timestamp(self.start_time, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_default()
    }
}

fn build_value(compiled: Option<&str>, var: &str) -> String {
    match compiled {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => std::env::var(var).unwrap_or_default(),
    }
}
