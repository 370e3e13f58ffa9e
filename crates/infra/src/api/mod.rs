//! Backend API adapters: authentication, client and typed commands

pub mod auth;
pub mod client;
pub mod commands;
pub mod errors;

pub use auth::{AccessTokenProvider, SessionAuthService};
pub use client::{ApiClient, ApiClientConfig};
pub use commands::ApiCommands;
pub use errors::{ApiError, ApiErrorCategory};
