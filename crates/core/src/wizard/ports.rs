//! Port interfaces for the export and optimization workflows

use async_trait::async_trait;
use horario_domain::types::export::{ExportDelivery, ExportFormat, ExportRequest, ScopeCatalog};
use horario_domain::types::optimize::{
    ApplyOutcome, OptimizationOutcome, OptimizerRemoteConfig, SchedulePreview,
    StartOptimizationRequest,
};
use horario_domain::Result;

/// Backend access for the export workflow.
#[async_trait]
pub trait ExportGateway: Send + Sync {
    /// Submit an export request. The backend answers either with a JSON
    /// receipt carrying a download URL or with the file body itself.
    async fn submit_export(
        &self,
        format: ExportFormat,
        request: &ExportRequest,
    ) -> Result<ExportDelivery>;

    /// Selectable sections/teachers/subjects for scoped exports.
    async fn fetch_catalog(&self) -> Result<ScopeCatalog>;
}

/// Backend access for the optimization run lifecycle.
#[async_trait]
pub trait OptimizerGateway: Send + Sync {
    /// Server-held optimizer defaults.
    async fn fetch_config(&self) -> Result<OptimizerRemoteConfig>;

    /// Start a run. The backend performs the optimization as one blocking
    /// call; the response already carries the terminal result.
    async fn start(&self, request: &StartOptimizationRequest) -> Result<OptimizationOutcome>;

    /// Schedule preview for a completed run.
    async fn fetch_preview(&self, run_id: &str) -> Result<SchedulePreview>;

    /// Replace the active schedule with a run's result.
    async fn apply(&self, run_id: &str) -> Result<ApplyOutcome>;
}
