//! Role-specific dashboard composition
//!
//! The composer is pure assembly: it consumes payloads already fetched by
//! the caller and produces data-only view-models. Rendering lives with the
//! presentation layer so the view-models stay testable on their own.

pub mod composer;
pub mod ports;
pub mod viewmodel;

pub use composer::DashboardComposer;
pub use viewmodel::*;
