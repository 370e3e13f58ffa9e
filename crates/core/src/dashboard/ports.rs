//! Port interfaces for dashboard data retrieval

use async_trait::async_trait;
use horario_domain::types::conflict::ConflictSummary;
use horario_domain::types::dashboard::{AdminDashboard, TeacherDashboard};
use horario_domain::types::workload::WorkloadAlerts;
use horario_domain::Result;

/// Backend access for role-specific dashboard payloads and the periodic
/// conflict/workload refreshes.
#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// Role-appropriate dashboard payload for a teacher.
    async fn fetch_teacher_dashboard(&self, user_id: i64) -> Result<TeacherDashboard>;

    /// Role-appropriate dashboard payload for an administrator.
    async fn fetch_admin_dashboard(&self, user_id: i64) -> Result<AdminDashboard>;

    /// Current conflict count and list.
    async fn fetch_conflicts(&self) -> Result<ConflictSummary>;

    /// Per-teacher workload alerts.
    async fn fetch_workload_alerts(&self) -> Result<WorkloadAlerts>;
}
