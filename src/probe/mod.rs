// Liveness channel and its single consumer
//
// Collectors are producers: each resource collector sends exactly one Status
// per scrape. The Probe's updater task is the only receiver and folds the
// signals into one exporter-wide liveness value ("most recent signal wins").
// The updater must be spawned before any collector is constructed; a send
// blocks while the buffer is full and nobody is receiving.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

use crate::shutdown::Shutdown;
use tracing::{debug, info, warn};

/// Default number of signals buffered between collectors and the updater.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 8;

const OK: &str = "ok";

/// Outcome of one collector's scrape.
///
/// Carries no resource identity: liveness is exporter-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub healthy: bool,
    pub message: String,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            healthy: true,
            message: OK.to_string(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}

/// Send half shared by every resource collector.
pub type StatusSender = mpsc::Sender<Status>;

/// Receive half, owned by the probe updater.
pub type StatusReceiver = mpsc::Receiver<Status>;

/// Create the liveness channel. A capacity of zero is raised to one.
pub fn channel(capacity: usize) -> (StatusSender, StatusReceiver) {
    mpsc::channel(capacity.max(1))
}

/// Folded liveness view served by `/healthz` and `/varz`.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeState {
    pub healthy: bool,
    pub message: String,
    pub last_update: Option<DateTime<Utc>>,
    /// Total signals folded since start
    pub updates: u64,
}

impl Default for ProbeState {
    fn default() -> Self {
        Self {
            healthy: true,
            message: OK.to_string(),
            last_update: None,
            updates: 0,
        }
    }
}

/// Liveness probe: consumer of the status channel.
#[derive(Clone)]
pub struct Probe {
    name: String,
    state: Arc<RwLock<ProbeState>>,
}

impl Probe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(RwLock::new(ProbeState::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current folded state.
    pub fn state(&self) -> ProbeState {
        self.state.read().expect("ProbeState lock poisoned").clone()
    }

    pub fn is_healthy(&self) -> bool {
        self.state.read().expect("ProbeState lock poisoned").healthy
    }

    /// Fold one signal into the state. The most recent signal wins.
    pub fn apply(&self, status: Status) {
        let mut state = self.state.write().expect("ProbeState lock poisoned");
        if state.healthy != status.healthy {
            if status.healthy {
                info!(probe = %self.name, "Liveness recovered");
            } else {
                warn!(probe = %self.name, message = %status.message, "Liveness degraded");
            }
        }
        state.healthy = status.healthy;
        state.message = status.message;
        state.last_update = Some(Utc::now());
        state.updates += 1;
    }

    /// Receive signals until shutdown is requested or every sender has been
    /// dropped.
    ///
    /// Never blocks a sender for longer than it takes to fold one signal.
    pub async fn run_updater(self, mut receiver: StatusReceiver, shutdown: Shutdown) {
        debug!(probe = %self.name, "Liveness updater started");
        loop {
            tokio::select! {
                _ = shutdown.requested() => {
                    debug!(probe = %self.name, "Liveness updater stopping");
                    break;
                }
                received = receiver.recv() => match received {
                    Some(status) => self.apply(status),
                    None => {
                        debug!(probe = %self.name, "All liveness senders closed");
                        break;
                    }
                },
            }
        }
    }
}
