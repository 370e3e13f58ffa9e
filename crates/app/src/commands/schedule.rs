//! Schedule grid commands
//!
//! Mutations go through the backend and then trigger a refresh; nothing
//! here writes the grid directly, so the refresh path stays the single
//! writer of grid state.

use std::sync::Arc;

use horario_core::AssignmentGateway;
use horario_domain::types::schedule::NewAssignment;
use horario_domain::Result;

use crate::context::AppContext;
use crate::render;

/// Load a section's weekly schedule and render the grid with the current
/// conflict overlay.
pub async fn load_week(ctx: &Arc<AppContext>, section_id: i64) -> Result<String> {
    ctx.refresh_week(section_id).await?;

    let state = ctx.schedule_state().await;
    let grid = state.grid.as_ref().expect("grid present after refresh_week");
    Ok(render::render_grid(grid, &state.overlay))
}

/// Create an assignment, then refresh the affected week.
pub async fn create_assignment(ctx: &Arc<AppContext>, request: NewAssignment) -> Result<String> {
    let created = ctx.api.create_assignment(&request).await?;
    ctx.refresh_week(request.section_id).await?;
    Ok(format!("Asignación {} creada exitosamente", created.id))
}

/// Remove an assignment, then refresh the loaded week if any.
pub async fn delete_assignment(ctx: &Arc<AppContext>, id: i64) -> Result<String> {
    let section_id = ctx.schedule_state().await.week.as_ref().and_then(|w| w.section_id);

    ctx.api.remove_assignment(id).await?;
    if let Some(section_id) = section_id {
        ctx.refresh_week(section_id).await?;
    }
    Ok("Asignación eliminada".to_string())
}
