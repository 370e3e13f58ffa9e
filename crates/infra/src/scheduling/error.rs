//! Poller lifecycle errors

use std::time::Duration;

use thiserror::Error;

/// Failures of the poller lifecycle itself. Refresh failures are never
/// errors here; they are logged and swallowed inside the loop.
#[derive(Debug, Error)]
pub enum PollerError {
    #[error("poller task did not stop within {0:?}")]
    ShutdownTimeout(Duration),

    #[error("poller task panicked: {0}")]
    JoinFailed(String),
}
