//! Typed command surface
//!
//! Discrete action identifiers map to handlers through the dispatch table;
//! views never reach into behavior directly.

pub mod dashboard;
pub mod dispatch;
pub mod export;
pub mod optimize;
pub mod schedule;

pub use dispatch::{dispatch, Action, CommandOutput};
