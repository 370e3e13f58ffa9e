//! Typed backend commands
//!
//! One method per backend endpoint, exposed to the core through its port
//! traits. This is the only place that knows URL shapes and wire quirks
//! (like the export endpoint answering JSON or a raw file body).

use std::sync::Arc;

use async_trait::async_trait;
use horario_core::dashboard::ports::DashboardGateway;
use horario_core::schedule::ports::AssignmentGateway;
use horario_core::wizard::ports::{ExportGateway, OptimizerGateway};
use horario_domain::types::conflict::ConflictSummary;
use horario_domain::types::dashboard::{AdminDashboard, TeacherDashboard};
use horario_domain::types::export::{
    CatalogItem, ExportDelivery, ExportFormat, ExportReceipt, ExportRequest, ScopeCatalog,
};
use horario_domain::types::optimize::{
    ApplyOutcome, OptimizationOutcome, OptimizerRemoteConfig, SchedulePreview,
    StartOptimizationRequest,
};
use horario_domain::types::schedule::{Assignment, NewAssignment, WeekSchedule};
use horario_domain::types::workload::WorkloadAlerts;
use horario_domain::Result;
use serde::Deserialize;
use tracing::debug;

use super::client::ApiClient;

#[derive(Debug, Deserialize)]
struct SectionsResponse {
    #[serde(default)]
    sections: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
struct TeachersResponse {
    #[serde(default)]
    teachers: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
struct SubjectsResponse {
    #[serde(default)]
    subjects: Vec<CatalogItem>,
}

/// Typed command surface over the backend API.
pub struct ApiCommands {
    client: Arc<ApiClient>,
}

impl ApiCommands {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Pull the artifact filename out of a Content-Disposition header.
    fn disposition_filename(response: &reqwest::Response) -> Option<String> {
        let header = response.headers().get("content-disposition")?.to_str().ok()?;
        header.split(';').find_map(|part| {
            let part = part.trim();
            part.strip_prefix("filename=")
                .map(|name| name.trim_matches('"').to_string())
                .filter(|name| !name.is_empty())
        })
    }

    fn is_json(response: &reqwest::Response) -> bool {
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false)
    }
}

#[async_trait]
impl DashboardGateway for ApiCommands {
    async fn fetch_teacher_dashboard(&self, user_id: i64) -> Result<TeacherDashboard> {
        Ok(self.client.get(&format!("/dashboard/{user_id}")).await?)
    }

    async fn fetch_admin_dashboard(&self, user_id: i64) -> Result<AdminDashboard> {
        Ok(self.client.get(&format!("/dashboard/{user_id}")).await?)
    }

    async fn fetch_conflicts(&self) -> Result<ConflictSummary> {
        Ok(self.client.get("/conflicts").await?)
    }

    async fn fetch_workload_alerts(&self) -> Result<WorkloadAlerts> {
        Ok(self.client.get("/workload/alerts").await?)
    }
}

#[async_trait]
impl AssignmentGateway for ApiCommands {
    async fn fetch_week(&self, section_id: i64) -> Result<WeekSchedule> {
        Ok(self.client.get(&format!("/sections/{section_id}/schedule")).await?)
    }

    async fn fetch_assignment(&self, id: i64) -> Result<Assignment> {
        Ok(self.client.get(&format!("/assignments/{id}")).await?)
    }

    async fn create_assignment(&self, request: &NewAssignment) -> Result<Assignment> {
        Ok(self.client.post("/assignments", request).await?)
    }

    async fn remove_assignment(&self, id: i64) -> Result<()> {
        self.client.delete::<serde_json::Value>(&format!("/assignments/{id}")).await?;
        Ok(())
    }
}

#[async_trait]
impl ExportGateway for ApiCommands {
    async fn submit_export(
        &self,
        format: ExportFormat,
        request: &ExportRequest,
    ) -> Result<ExportDelivery> {
        let path = format!("/export/{}", format.path_segment());
        let response = self.client.post_raw(&path, request).await?;

        if Self::is_json(&response) {
            let receipt: ExportReceipt = response.json().await.map_err(|err| {
                horario_domain::HorarioError::ServerRejection(format!(
                    "malformed export receipt: {err}"
                ))
            })?;
            let url = receipt.download_url.ok_or_else(|| {
                horario_domain::HorarioError::ServerRejection(
                    "export receipt carried no download URL".to_string(),
                )
            })?;
            debug!(%url, "export ready for download");
            Ok(ExportDelivery::Url { url, filename: receipt.filename })
        } else {
            let filename = Self::disposition_filename(&response);
            let bytes = response
                .bytes()
                .await
                .map_err(|err| horario_domain::HorarioError::Network(err.to_string()))?;
            debug!(bytes = bytes.len(), "export file received inline");
            Ok(ExportDelivery::File { bytes: bytes.to_vec(), filename })
        }
    }

    async fn fetch_catalog(&self) -> Result<ScopeCatalog> {
        let (sections, teachers, subjects) = tokio::try_join!(
            self.client.get::<SectionsResponse>("/sections"),
            self.client.get::<TeachersResponse>("/teachers"),
            self.client.get::<SubjectsResponse>("/subjects"),
        )?;

        Ok(ScopeCatalog {
            sections: sections.sections,
            teachers: teachers.teachers,
            subjects: subjects.subjects,
        })
    }
}

#[async_trait]
impl OptimizerGateway for ApiCommands {
    async fn fetch_config(&self) -> Result<OptimizerRemoteConfig> {
        Ok(self.client.get("/optimize/config").await?)
    }

    async fn start(&self, request: &StartOptimizationRequest) -> Result<OptimizationOutcome> {
        Ok(self.client.post("/optimize/start", request).await?)
    }

    async fn fetch_preview(&self, run_id: &str) -> Result<SchedulePreview> {
        Ok(self.client.get(&format!("/optimize/preview/{run_id}")).await?)
    }

    async fn apply(&self, run_id: &str) -> Result<ApplyOutcome> {
        Ok(self.client.post(&format!("/optimize/apply/{run_id}"), &serde_json::json!({})).await?)
    }
}
