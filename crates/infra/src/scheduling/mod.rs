//! Interval pollers with explicit lifecycle management

pub mod error;
pub mod poller;

pub use error::PollerError;
pub use poller::{Poller, PollerConfig, RefreshTask};
