//! Optimization wizard commands

use std::sync::Arc;

use horario_core::wizard::optimize::format_elapsed;
use horario_core::wizard::progress::SimulatedProgress;
use horario_core::OptimizerGateway;
use horario_domain::{HorarioError, Result};
use tracing::{debug, warn};

use crate::context::{ActiveWizard, AppContext};
use crate::render;

fn no_wizard() -> HorarioError {
    HorarioError::Validation("no hay un asistente de optimización abierto".to_string())
}

/// Open the optimization wizard and overlay the server-held defaults onto
/// the draft. A missing config endpoint is not fatal.
pub async fn open(ctx: &Arc<AppContext>) -> Result<String> {
    ctx.open_optimization_wizard().await;

    match ctx.api.fetch_config().await {
        Ok(remote) => {
            let mut slot = ctx.wizard_slot().await;
            if let ActiveWizard::Optimization(wizard) = &mut *slot {
                wizard.apply_remote_config(&remote)?;
            }
        }
        Err(err) => warn!(error = %err, "optimizer config unavailable; using local defaults"),
    }

    Ok("Optimización de Horarios — configurar parámetros".to_string())
}

/// Reset parameters and constraints to the documented defaults.
pub async fn load_defaults(ctx: &Arc<AppContext>) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Optimization(wizard) = &mut *slot else { return Err(no_wizard()) };
    wizard.load_defaults()?;
    Ok("Parámetros restablecidos a los valores por defecto".to_string())
}

/// Submit the run; the polling animation plays until the response lands.
pub async fn start(ctx: &Arc<AppContext>) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Optimization(wizard) = &mut *slot else { return Err(no_wizard()) };

    let started = std::time::Instant::now();
    let mut estimator = SimulatedProgress::new();
    wizard
        .run(ctx.api.as_ref(), chrono::Utc::now(), &mut estimator, &mut |frame| {
            debug!("{}", render::render_polling_frame(frame));
        })
        .await?;

    let outcome = wizard.outcome().ok_or_else(|| {
        HorarioError::Internal("results step without an outcome".to_string())
    })?;
    let mut text = render::render_optimization_results(outcome, &wizard.preview_by_slot());
    text.push_str(&format!("Tiempo transcurrido: {}\n", format_elapsed(started.elapsed())));
    Ok(text)
}

pub async fn retry(ctx: &Arc<AppContext>) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Optimization(wizard) = &mut *slot else { return Err(no_wizard()) };
    wizard.retry()?;
    Ok("Listo para reintentar la optimización".to_string())
}

/// Apply the optimized schedule (explicit confirmation required), then
/// refresh the displayed data and close the wizard.
pub async fn apply(ctx: &Arc<AppContext>, confirmed: bool) -> Result<String> {
    {
        let mut slot = ctx.wizard_slot().await;
        let ActiveWizard::Optimization(wizard) = &mut *slot else { return Err(no_wizard()) };
        wizard.apply(ctx.api.as_ref(), confirmed).await?;
    }

    // The active schedule changed server-side; refresh rather than touch
    // the grid directly.
    let section_id = ctx.schedule_state().await.week.as_ref().and_then(|w| w.section_id);
    if let Some(section_id) = section_id {
        if let Err(err) = ctx.refresh_week(section_id).await {
            warn!(error = %err, "week refresh after apply failed");
        }
    }
    if let Err(err) = ctx.refresh_realtime().await {
        warn!(error = %err, "realtime refresh after apply failed");
    }

    ctx.close_wizard().await;
    Ok("Horario optimizado aplicado".to_string())
}

/// Drop the results and return to Configure.
pub async fn discard(ctx: &Arc<AppContext>) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Optimization(wizard) = &mut *slot else { return Err(no_wizard()) };
    wizard.discard()?;
    Ok("Resultados descartados".to_string())
}
