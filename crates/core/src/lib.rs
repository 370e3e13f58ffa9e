//! # Horario Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The calendar grid model, conflict overlay and workload classifier
//! - Time arithmetic for progress/duration/countdown displays
//! - Dashboard view-model composition
//! - The export and optimization wizard state machines
//! - Port/adapter interfaces (traits) to the backend
//!
//! ## Architecture Principles
//! - Only depends on `horario-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod dashboard;
pub mod schedule;
pub mod wizard;

// Re-export specific items to avoid ambiguity
pub use dashboard::ports::DashboardGateway;
pub use dashboard::DashboardComposer;
pub use schedule::grid::{GridCell, ScheduleGrid};
pub use schedule::overlay::{CellConflict, ConflictOverlay};
pub use schedule::ports::AssignmentGateway;
pub use schedule::workload::{classify, WorkloadAssessment, WorkloadLevel};
pub use wizard::export::{ExportArtifact, ExportStep, ExportWizard};
pub use wizard::optimize::{OptimizationWizard, OptimizeStep};
pub use wizard::ports::{ExportGateway, OptimizerGateway};
pub use wizard::progress::{PollingFrame, ProgressEstimator, SimulatedProgress};
