//! Action → handler dispatch table

use std::sync::Arc;
use std::time::Instant;

use horario_domain::types::export::ExportFormat;
use horario_domain::types::schedule::NewAssignment;
use horario_domain::Result;

use super::{dashboard, export, optimize, schedule};
use crate::context::AppContext;
use crate::utils::log_command_execution;

/// Every user-facing action, as a discrete identifier.
#[derive(Debug, Clone)]
pub enum Action {
    // Dashboard
    ShowDashboard,
    RefreshRealtime,

    // Schedule grid
    LoadWeek { section_id: i64 },
    CreateAssignment(NewAssignment),
    DeleteAssignment { id: i64 },

    // Export wizard
    OpenExportWizard,
    ExportSelectFormat(ExportFormat),
    ExportNext,
    ExportBack,
    ExportSubmit,
    ExportRetry,
    QuickExport(ExportFormat),

    // Optimization wizard
    OpenOptimizationWizard,
    OptimizeLoadDefaults,
    OptimizeStart,
    OptimizeRetry,
    OptimizeApply { confirmed: bool },
    OptimizeDiscard,

    // Shared
    CloseWizard,
}

impl Action {
    /// Stable identifier for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowDashboard => "dashboard::show",
            Self::RefreshRealtime => "dashboard::refresh_realtime",
            Self::LoadWeek { .. } => "schedule::load_week",
            Self::CreateAssignment(_) => "schedule::create_assignment",
            Self::DeleteAssignment { .. } => "schedule::delete_assignment",
            Self::OpenExportWizard => "export::open",
            Self::ExportSelectFormat(_) => "export::select_format",
            Self::ExportNext => "export::next",
            Self::ExportBack => "export::back",
            Self::ExportSubmit => "export::submit",
            Self::ExportRetry => "export::retry",
            Self::QuickExport(_) => "export::quick",
            Self::OpenOptimizationWizard => "optimize::open",
            Self::OptimizeLoadDefaults => "optimize::load_defaults",
            Self::OptimizeStart => "optimize::start",
            Self::OptimizeRetry => "optimize::retry",
            Self::OptimizeApply { .. } => "optimize::apply",
            Self::OptimizeDiscard => "optimize::discard",
            Self::CloseWizard => "wizard::close",
        }
    }
}

/// What a command hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Text(String),
    Silent,
}

/// Execute one action against the context. Failures are logged here and,
/// when they force logout, tear the session down before propagating.
pub async fn dispatch(ctx: &Arc<AppContext>, action: Action) -> Result<CommandOutput> {
    let name = action.name();
    let started = Instant::now();

    let result = run(ctx, action).await;

    log_command_execution(name, started.elapsed(), result.is_ok());
    if let Err(err) = &result {
        ctx.handle_failure(err).await;
    }
    result
}

async fn run(ctx: &Arc<AppContext>, action: Action) -> Result<CommandOutput> {
    let text = match action {
        Action::ShowDashboard => dashboard::show_dashboard(ctx).await?,
        Action::RefreshRealtime => dashboard::refresh_realtime(ctx).await?,
        Action::LoadWeek { section_id } => schedule::load_week(ctx, section_id).await?,
        Action::CreateAssignment(request) => schedule::create_assignment(ctx, request).await?,
        Action::DeleteAssignment { id } => schedule::delete_assignment(ctx, id).await?,
        Action::OpenExportWizard => export::open(ctx).await?,
        Action::ExportSelectFormat(format) => export::select_format(ctx, format).await?,
        Action::ExportNext => export::next(ctx).await?,
        Action::ExportBack => export::back(ctx).await?,
        Action::ExportSubmit => export::submit_and_run(ctx).await?,
        Action::ExportRetry => export::retry(ctx).await?,
        Action::QuickExport(format) => export::quick(ctx, format).await?,
        Action::OpenOptimizationWizard => optimize::open(ctx).await?,
        Action::OptimizeLoadDefaults => optimize::load_defaults(ctx).await?,
        Action::OptimizeStart => optimize::start(ctx).await?,
        Action::OptimizeRetry => optimize::retry(ctx).await?,
        Action::OptimizeApply { confirmed } => optimize::apply(ctx, confirmed).await?,
        Action::OptimizeDiscard => optimize::discard(ctx).await?,
        Action::CloseWizard => {
            ctx.close_wizard().await;
            return Ok(CommandOutput::Silent);
        }
    };
    Ok(CommandOutput::Text(text))
}
