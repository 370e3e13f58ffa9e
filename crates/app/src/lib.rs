//! # Horario App
//!
//! Application layer: the explicit application context, the typed command
//! dispatch table, and the text renderer. Everything the binary drives
//! lives here so integration tests can drive it too.

pub mod commands;
pub mod context;
pub mod render;
pub mod utils;

pub use commands::dispatch::{dispatch, Action, CommandOutput};
pub use context::AppContext;
