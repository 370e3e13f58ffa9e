//! Dashboard commands

use std::sync::Arc;

use horario_core::dashboard::DashboardComposer;
use horario_domain::Result;

use crate::context::{AppContext, DashboardSnapshot};
use crate::render;
use crate::utils::local_time_hhmm;

/// Fetch the role-appropriate payload, compose and render it.
pub async fn show_dashboard(ctx: &Arc<AppContext>) -> Result<String> {
    let snapshot = ctx.refresh_dashboard().await?;
    let now = local_time_hhmm();

    Ok(match snapshot {
        DashboardSnapshot::Teacher(payload) => {
            render::render_teacher_dashboard(&DashboardComposer::compose_teacher(&payload, &now))
        }
        DashboardSnapshot::Admin(payload) => {
            render::render_admin_dashboard(&DashboardComposer::compose_admin(&payload))
        }
    })
}

/// One manual conflict/workload refresh cycle (the poller runs the same
/// path on its own cadence).
pub async fn refresh_realtime(ctx: &Arc<AppContext>) -> Result<String> {
    ctx.refresh_realtime().await?;
    let state = ctx.schedule_state().await;
    Ok(format!(
        "{} conflictos · {} alertas activas",
        state.facts.len(),
        state.alert_count
    ))
}
