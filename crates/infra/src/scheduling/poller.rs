//! Fixed-interval refresh poller with single-flight discipline
//!
//! At most one refresh callback is in flight at a time: a tick that lands
//! while a prior refresh is still pending is skipped, not queued, so two
//! refreshes of the same resource are never concurrent. Failures inside
//! the callback are logged and swallowed; they never stop subsequent
//! ticks. `start`/`stop` are idempotent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use horario_domain::Result;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::PollerError;

/// The work a poller performs on each tick.
#[async_trait]
pub trait RefreshTask: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

/// Configuration for a poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Tick interval.
    pub interval: Duration,
    /// How long `stop` waits for the loop to wind down.
    pub join_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(30), join_timeout: Duration::from_secs(5) }
    }
}

/// Fixed-interval poller driving a [`RefreshTask`].
pub struct Poller {
    name: &'static str,
    task: Arc<dyn RefreshTask>,
    config: PollerConfig,
    cancellation: Mutex<CancellationToken>,
    handle: Mutex<Option<JoinHandle<()>>>,
    in_flight: Arc<AtomicBool>,
}

impl Poller {
    pub fn new(name: &'static str, task: Arc<dyn RefreshTask>, config: PollerConfig) -> Self {
        Self {
            name,
            task,
            config,
            cancellation: Mutex::new(CancellationToken::new()),
            handle: Mutex::new(None),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start ticking. Idempotent: starting a running poller is a no-op.
    pub fn start(&self) {
        let mut handle = self.handle.lock();
        if handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false) {
            debug!(poller = self.name, "already running; start ignored");
            return;
        }

        let cancel = CancellationToken::new();
        *self.cancellation.lock() = cancel.clone();

        let name = self.name;
        let task = Arc::clone(&self.task);
        let interval = self.config.interval;
        let in_flight = Arc::clone(&self.in_flight);

        *handle = Some(tokio::spawn(async move {
            Self::run_loop(name, task, interval, cancel, in_flight).await;
        }));

        info!(poller = self.name, interval_secs = self.config.interval.as_secs_f64(), "poller started");
    }

    /// Stop ticking and wait for the loop to finish. Idempotent: safe to
    /// call repeatedly or when never started.
    pub async fn stop(&self) -> std::result::Result<(), PollerError> {
        self.cancellation.lock().cancel();

        let handle = self.handle.lock().take();
        let Some(handle) = handle else {
            debug!(poller = self.name, "not running; stop ignored");
            return Ok(());
        };

        match tokio::time::timeout(self.config.join_timeout, handle).await {
            Ok(Ok(())) => {
                info!(poller = self.name, "poller stopped");
                Ok(())
            }
            Ok(Err(join_err)) => Err(PollerError::JoinFailed(join_err.to_string())),
            Err(_) => Err(PollerError::ShutdownTimeout(self.config.join_timeout)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.lock().as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    async fn run_loop(
        name: &'static str,
        task: Arc<dyn RefreshTask>,
        interval: Duration,
        cancel: CancellationToken,
        in_flight: Arc<AtomicBool>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        // Ticks that land while a refresh is pending are dropped, not
        // queued: the next refresh waits for the next aligned tick.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The immediate first tick of tokio's interval would fire the
        // callback at t=0; consume it so the first refresh lands one full
        // interval after start.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(poller = name, "poll loop cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    if in_flight.swap(true, Ordering::SeqCst) {
                        debug!(poller = name, "refresh still in flight; tick skipped");
                        continue;
                    }
                    if let Err(err) = task.refresh().await {
                        warn!(poller = name, error = %err, "refresh failed; will retry on next tick");
                    }
                    in_flight.store(false, Ordering::SeqCst);
                }
            }
        }
    }
}

/// Best-effort cleanup when a running poller is dropped.
impl Drop for Poller {
    fn drop(&mut self) {
        let cancel = self.cancellation.lock();
        if !cancel.is_cancelled() && self.is_running() {
            warn!(poller = self.name, "poller dropped while running; cancelling");
            cancel.cancel();
        }
    }
}
