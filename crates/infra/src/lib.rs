//! # Horario Infra
//!
//! Infrastructure layer: HTTP transport, backend API adapters, interval
//! pollers and configuration loading.
//!
//! This crate implements the port traits declared in `horario-core` against
//! the tenant backend. Nothing here contains business rules; it moves bytes
//! and maps failures into the domain taxonomy.

pub mod api;
pub mod config;
pub mod http;
pub mod scheduling;

pub use api::auth::{AccessTokenProvider, SessionAuthService};
pub use api::client::{ApiClient, ApiClientConfig};
pub use api::commands::ApiCommands;
pub use api::errors::{ApiError, ApiErrorCategory};
pub use http::HttpClient;
pub use scheduling::error::PollerError;
pub use scheduling::poller::{Poller, PollerConfig, RefreshTask};
