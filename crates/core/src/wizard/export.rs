//! Export wizard state machine
//!
//! FormatSelect → Configure → Preview → Progress, terminal on success or
//! explicit cancel. Forward moves require the current step's precondition;
//! backward moves are allowed from Configure and Preview only. An in-flight
//! or completed export is not revocable through back-navigation.

use std::time::Duration;

use chrono::NaiveDate;
use horario_domain::constants::EXPORT_MILESTONE_DELAY_MS;
use horario_domain::types::export::{
    ExportConfig, ExportDelivery, ExportFormat, ExportRequest, ScopeCatalog,
};
use horario_domain::{HorarioError, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ports::ExportGateway;

/// Scripted progress milestones shown before the request completes. This is
/// illustrative progress, not measured server progress.
const MILESTONES: [(u8, &str); 5] = [
    (20, "Consultando datos del horario..."),
    (40, "Procesando asignaciones..."),
    (60, "Generando formato de salida..."),
    (80, "Aplicando formato venezolano..."),
    (95, "Finalizando reporte..."),
];

/// Wizard steps as tagged variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStep {
    FormatSelect,
    Configure,
    Preview,
    Progress,
}

/// State of the Progress step.
#[derive(Debug, Clone, PartialEq)]
enum RunState {
    Pending,
    Running,
    Completed,
    Failed(String),
}

/// A completed export, ready to hand to the download path.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub delivery: ExportDelivery,
    pub filename: String,
}

/// The export wizard. One instance per session; discarded on close.
pub struct ExportWizard {
    step: ExportStep,
    format: Option<ExportFormat>,
    config: Option<ExportConfig>,
    catalog: Option<ScopeCatalog>,
    run_state: RunState,
    institution_name: String,
    milestone_delay: Duration,
}

impl ExportWizard {
    pub fn new(institution_name: &str) -> Self {
        Self {
            step: ExportStep::FormatSelect,
            format: None,
            config: None,
            catalog: None,
            run_state: RunState::Pending,
            institution_name: institution_name.to_string(),
            milestone_delay: Duration::from_millis(EXPORT_MILESTONE_DELAY_MS),
        }
    }

    /// Shorten the scripted milestone delay (tests).
    pub fn with_milestone_delay(mut self, delay: Duration) -> Self {
        self.milestone_delay = delay;
        self
    }

    pub fn step(&self) -> ExportStep {
        self.step
    }

    pub fn selected_format(&self) -> Option<ExportFormat> {
        self.format
    }

    /// Choose a format. Only meaningful while on the first step.
    pub fn select_format(&mut self, format: ExportFormat) -> Result<()> {
        if self.step != ExportStep::FormatSelect {
            return Err(HorarioError::Validation(
                "el formato solo puede elegirse en el primer paso".to_string(),
            ));
        }
        debug!(format = format.path_segment(), "export format selected");
        self.format = Some(format);
        Ok(())
    }

    /// Advance one step. FormatSelect requires a chosen format; Preview
    /// advances only through [`Self::submit`].
    pub fn next(&mut self) -> Result<()> {
        self.step = match self.step {
            ExportStep::FormatSelect => {
                let format = self.format.ok_or_else(|| {
                    HorarioError::Validation("seleccione un formato para continuar".to_string())
                })?;
                // Entering Configure (re)seeds defaults for the chosen format
                if self.config.as_ref().map(|c| c.format) != Some(format) {
                    self.config = Some(ExportConfig::for_format(format, &self.institution_name));
                }
                ExportStep::Configure
            }
            ExportStep::Configure => ExportStep::Preview,
            ExportStep::Preview => {
                return Err(HorarioError::Validation(
                    "la exportación se inicia con una confirmación explícita".to_string(),
                ));
            }
            ExportStep::Progress => {
                return Err(HorarioError::Validation(
                    "no hay paso siguiente durante la exportación".to_string(),
                ));
            }
        };
        Ok(())
    }

    /// Go back one step. Allowed from Configure and Preview, never from
    /// Progress.
    pub fn back(&mut self) -> Result<()> {
        self.step = match self.step {
            ExportStep::Configure => ExportStep::FormatSelect,
            ExportStep::Preview => ExportStep::Configure,
            ExportStep::FormatSelect => {
                return Err(HorarioError::Validation(
                    "ya está en el primer paso".to_string(),
                ));
            }
            ExportStep::Progress => {
                return Err(HorarioError::Validation(
                    "una exportación en curso no puede revertirse".to_string(),
                ));
            }
        };
        Ok(())
    }

    /// Explicit submit from the read-only Preview step.
    pub fn submit(&mut self) -> Result<()> {
        if self.step != ExportStep::Preview {
            return Err(HorarioError::Validation(
                "confirme desde la vista previa".to_string(),
            ));
        }
        self.step = ExportStep::Progress;
        self.run_state = RunState::Pending;
        Ok(())
    }

    /// After a failure, return to Configure for another attempt.
    pub fn retry(&mut self) -> Result<()> {
        match (&self.step, &self.run_state) {
            (ExportStep::Progress, RunState::Failed(_)) => {
                self.step = ExportStep::Configure;
                self.run_state = RunState::Pending;
                Ok(())
            }
            _ => Err(HorarioError::Validation(
                "solo puede reintentarse una exportación fallida".to_string(),
            )),
        }
    }

    pub fn config(&self) -> Option<&ExportConfig> {
        self.config.as_ref()
    }

    /// Editable configuration, available on the Configure step only.
    pub fn config_mut(&mut self) -> Result<&mut ExportConfig> {
        if self.step != ExportStep::Configure {
            return Err(HorarioError::Validation(
                "la configuración solo es editable en el paso 2".to_string(),
            ));
        }
        self.config.as_mut().ok_or_else(|| {
            HorarioError::Internal("configure step without configuration".to_string())
        })
    }

    /// Load the selectable scope items for the Configure step. A failure is
    /// logged and leaves the catalog empty; scoped selection simply has
    /// nothing to offer.
    pub async fn load_catalog(&mut self, gateway: &dyn ExportGateway) {
        match gateway.fetch_catalog().await {
            Ok(catalog) => self.catalog = Some(catalog),
            Err(err) => warn!(error = %err, "failed to load export scope catalog"),
        }
    }

    pub fn catalog(&self) -> Option<&ScopeCatalog> {
        self.catalog.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        match &self.run_state {
            RunState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.run_state == RunState::Completed
    }

    /// Execute the export. Valid only on the Progress step; reports the
    /// scripted milestones through `on_progress`, then issues the request.
    /// On failure the wizard stays on Progress with a retry path back to
    /// Configure.
    pub async fn run(
        &mut self,
        gateway: &dyn ExportGateway,
        today: NaiveDate,
        on_progress: &mut dyn FnMut(u8, &str),
    ) -> Result<ExportArtifact> {
        if self.step != ExportStep::Progress || self.run_state != RunState::Pending {
            return Err(HorarioError::Validation(
                "no hay exportación pendiente de ejecutar".to_string(),
            ));
        }
        let config = self
            .config
            .clone()
            .ok_or_else(|| HorarioError::Internal("progress step without configuration".into()))?;

        self.run_state = RunState::Running;
        on_progress(0, "Preparando exportación...");

        for (pct, message) in MILESTONES {
            if !self.milestone_delay.is_zero() {
                tokio::time::sleep(self.milestone_delay).await;
            }
            on_progress(pct, message);
        }

        let request = Self::build_request(&config);
        match gateway.submit_export(config.format, &request).await {
            Ok(delivery) => {
                on_progress(100, "Exportación completada");
                info!(format = config.format.path_segment(), "export completed");
                let filename = delivery
                    .filename()
                    .map(str::to_string)
                    .unwrap_or_else(|| Self::derive_filename(&config, today));
                self.run_state = RunState::Completed;
                Ok(ExportArtifact { delivery, filename })
            }
            Err(err) => {
                warn!(error = %err, "export request failed");
                self.run_state = RunState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn build_request(config: &ExportConfig) -> ExportRequest {
        ExportRequest {
            academic_year: config.academic_year.clone(),
            scope: config.scope,
            include_conflicts: config.include_conflicts,
            include_workload: config.include_workload,
            report_title: config.report_title.clone(),
            institution_name: config.institution_name.clone(),
            export_id: format!("export_{}", Uuid::new_v4()),
            selected_items: (config.scope != horario_domain::types::export::ExportScope::All)
                .then(|| config.selected_items.clone()),
        }
    }

    /// `<sanitized title>_<YYYY-MM-DD>.<extension>` fallback when the
    /// backend supplies no filename.
    pub fn derive_filename(config: &ExportConfig, today: NaiveDate) -> String {
        let base: String = config
            .report_title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        let base = if base.is_empty() { "horario_export".to_string() } else { base };
        format!("{}_{}.{}", base, today.format("%Y-%m-%d"), config.format.extension())
    }
}

/// One-shot export with default configuration, bypassing the wizard UI but
/// sharing the request and download path.
pub async fn quick_export(
    gateway: &dyn ExportGateway,
    format: ExportFormat,
    institution_name: &str,
    today: NaiveDate,
) -> Result<ExportArtifact> {
    let mut config = ExportConfig::for_format(format, institution_name);
    config.report_title = format.display_name().to_string();

    let request = ExportWizard::build_request(&config);
    let delivery = gateway.submit_export(format, &request).await?;
    let filename = delivery
        .filename()
        .map(str::to_string)
        .unwrap_or_else(|| ExportWizard::derive_filename(&config, today));
    Ok(ExportArtifact { delivery, filename })
}
