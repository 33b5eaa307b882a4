use tokio::sync::watch;

/// Requests shutdown with `send_replace(true)`.
pub type ShutdownSender = watch::Sender<bool>;

/// Create the process-wide shutdown signal.
pub fn channel() -> (ShutdownSender, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (tx, Shutdown { rx })
}

/// Observer side of the shutdown signal, cloned into every task that must
/// stop early: the HTTP server, in-flight list calls and the probe updater.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown is requested.
    ///
    /// If the sender is dropped without requesting shutdown, this never
    /// resolves.
    pub async fn requested(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|&stop| stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
