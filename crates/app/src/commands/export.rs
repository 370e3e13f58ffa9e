//! Export wizard commands

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use horario_core::wizard::export::{quick_export, ExportArtifact, ExportStep};
use horario_domain::constants::EXPORT_AUTO_CLOSE_DELAY_MS;
use horario_domain::types::export::{ExportDelivery, ExportFormat};
use horario_domain::{HorarioError, Result};
use tracing::info;

use crate::context::{ActiveWizard, AppContext};
use crate::utils::local_date;

fn no_wizard() -> HorarioError {
    HorarioError::Validation("no hay un asistente de exportación abierto".to_string())
}

/// Open the export wizard (closing any other wizard first).
pub async fn open(ctx: &Arc<AppContext>) -> Result<String> {
    ctx.open_export_wizard().await;
    Ok("Exportar Horarios — 1. Seleccionar Formato".to_string())
}

pub async fn select_format(ctx: &Arc<AppContext>, format: ExportFormat) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Export(wizard) = &mut *slot else { return Err(no_wizard()) };
    wizard.select_format(format)?;
    Ok(format!("Formato: {}", format.display_name()))
}

/// Advance one step. Entering Configure also loads the scope catalog.
pub async fn next(ctx: &Arc<AppContext>) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Export(wizard) = &mut *slot else { return Err(no_wizard()) };

    wizard.next()?;
    if wizard.step() == ExportStep::Configure {
        wizard.load_catalog(ctx.api.as_ref()).await;
    }
    Ok(step_heading(wizard.step()).to_string())
}

pub async fn back(ctx: &Arc<AppContext>) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Export(wizard) = &mut *slot else { return Err(no_wizard()) };
    wizard.back()?;
    Ok(step_heading(wizard.step()).to_string())
}

/// Submit from Preview and execute the export. On success the artifact is
/// delivered and the wizard auto-closes after a short delay.
pub async fn submit_and_run(ctx: &Arc<AppContext>) -> Result<String> {
    let (artifact, log) = {
        let mut slot = ctx.wizard_slot().await;
        let ActiveWizard::Export(wizard) = &mut *slot else { return Err(no_wizard()) };

        wizard.submit()?;
        let mut log = String::new();
        let result = wizard
            .run(ctx.api.as_ref(), local_date(), &mut |pct, message| {
                let _ = writeln!(log, "{pct:>3}% {message}");
            })
            .await;

        match result {
            Ok(artifact) => (artifact, log),
            // The wizard stays on Progress with a retry path; surface the
            // inline error to the caller.
            Err(err) => return Err(err),
        }
    };

    let delivered = deliver(&artifact)?;

    // Auto-close shortly after a successful download
    tokio::time::sleep(Duration::from_millis(EXPORT_AUTO_CLOSE_DELAY_MS)).await;
    ctx.close_wizard().await;

    Ok(format!("{log}{delivered}"))
}

pub async fn retry(ctx: &Arc<AppContext>) -> Result<String> {
    let mut slot = ctx.wizard_slot().await;
    let ActiveWizard::Export(wizard) = &mut *slot else { return Err(no_wizard()) };
    wizard.retry()?;
    Ok(step_heading(wizard.step()).to_string())
}

/// One-shot export with defaults, no wizard session involved.
pub async fn quick(ctx: &Arc<AppContext>, format: ExportFormat) -> Result<String> {
    let artifact = quick_export(
        ctx.api.as_ref(),
        format,
        &ctx.config.tenant.institution_name,
        local_date(),
    )
    .await?;
    deliver(&artifact)
}

/// Hand a finished export to the user: report the download URL, or write
/// an inline file body next to the system temp directory.
fn deliver(artifact: &ExportArtifact) -> Result<String> {
    match &artifact.delivery {
        ExportDelivery::Url { url, .. } => {
            info!(%url, filename = %artifact.filename, "export ready at download URL");
            Ok(format!("Descarga disponible: {url}"))
        }
        ExportDelivery::File { bytes, .. } => {
            let path = std::env::temp_dir().join(&artifact.filename);
            std::fs::write(&path, bytes).map_err(|err| {
                HorarioError::Internal(format!(
                    "no se pudo guardar {}: {err}",
                    path.display()
                ))
            })?;
            info!(path = %path.display(), "export saved to disk");
            Ok(format!("Archivo guardado en {}", path.display()))
        }
    }
}

fn step_heading(step: ExportStep) -> &'static str {
    match step {
        ExportStep::FormatSelect => "1. Seleccionar Formato",
        ExportStep::Configure => "2. Configurar Exportación",
        ExportStep::Preview => "3. Vista Previa",
        ExportStep::Progress => "4. Generando Reporte",
    }
}
