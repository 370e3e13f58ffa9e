//! Application context - dependency injection container
//!
//! One explicit context object holds the configuration, session, backend
//! commands and pollers; every command receives it as an argument. Nothing
//! reads ambient global state.

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use horario_core::schedule::grid::ScheduleGrid;
use horario_core::schedule::overlay::ConflictOverlay;
use horario_core::schedule::time as time_arith;
use horario_core::wizard::export::ExportWizard;
use horario_core::wizard::optimize::OptimizationWizard;
use horario_core::{AssignmentGateway, DashboardGateway};
use horario_domain::types::conflict::ConflictFact;
use horario_domain::types::dashboard::{AdminDashboard, TeacherDashboard};
use horario_domain::types::schedule::WeekSchedule;
use horario_domain::types::session::{LoginRequest, UserProfile, UserRole};
use horario_domain::{Config, HorarioError, Result};
use horario_infra::{
    ApiClient, ApiClientConfig, ApiCommands, HttpClient, Poller, PollerConfig, RefreshTask,
    SessionAuthService,
};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::utils::local_time_hhmm;

/// Last dashboard payload fetched for the signed-in role.
#[derive(Debug, Clone)]
pub enum DashboardSnapshot {
    Teacher(TeacherDashboard),
    Admin(AdminDashboard),
}

/// Grid, overlay and dashboard state. Mutated only by the refresh path;
/// wizards and editors trigger refreshes instead of writing here.
#[derive(Default)]
pub struct ScheduleState {
    pub week: Option<WeekSchedule>,
    pub grid: Option<ScheduleGrid>,
    pub overlay: ConflictOverlay,
    pub facts: Vec<ConflictFact>,
    pub dashboard: Option<DashboardSnapshot>,
    pub alert_count: usize,
    pub class_progress: Option<f64>,
}

/// At most one wizard is open at a time; opening a second closes the first.
pub enum ActiveWizard {
    None,
    Export(ExportWizard),
    Optimization(OptimizationWizard),
}

impl ActiveWizard {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Export(_) => "export",
            Self::Optimization(_) => "optimization",
        }
    }
}

/// Application context - holds all services and dependencies.
pub struct AppContext {
    pub config: Config,
    pub auth: Arc<SessionAuthService>,
    pub api: Arc<ApiCommands>,
    session: RwLock<Option<UserProfile>>,
    schedule: RwLock<ScheduleState>,
    wizards: Mutex<ActiveWizard>,
    realtime_poller: Poller,
    progress_poller: Poller,
}

impl AppContext {
    /// Wire up the full context from configuration.
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;
        let auth = Arc::new(SessionAuthService::new(http, config.api.base_url.clone()));
        let client = ApiClient::new(ApiClientConfig::from_config(&config), auth.clone())
            .map_err(HorarioError::from)?;
        let api = Arc::new(ApiCommands::new(Arc::new(client)));

        let realtime_interval = Duration::from_secs(config.refresh.dashboard_interval_secs.max(1));
        let progress_interval =
            Duration::from_secs(config.refresh.class_progress_interval_secs.max(1));

        Ok(Arc::new_cyclic(|weak: &Weak<AppContext>| Self {
            config,
            auth,
            api,
            session: RwLock::new(None),
            schedule: RwLock::new(ScheduleState::default()),
            wizards: Mutex::new(ActiveWizard::None),
            realtime_poller: Poller::new(
                "realtime-dashboard",
                Arc::new(RealtimeRefreshTask { ctx: weak.clone() }),
                PollerConfig { interval: realtime_interval, ..Default::default() },
            ),
            progress_poller: Poller::new(
                "class-progress",
                Arc::new(ClassProgressTask { ctx: weak.clone() }),
                PollerConfig { interval: progress_interval, ..Default::default() },
            ),
        }))
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.session.read().await.clone()
    }

    /// Authenticate and start the background refresh loops.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            tenant_id: Some(self.config.tenant.tenant_id.clone()),
        };
        let user = self.auth.login(&request).await.map_err(HorarioError::from)?;
        *self.session.write().await = Some(user.clone());
        self.start_pollers();
        Ok(user)
    }

    /// Tear the session down: stop polling, clear tokens and cached state,
    /// close any open wizard.
    pub async fn logout(&self) {
        self.stop_pollers().await;
        self.auth.logout().await;
        *self.session.write().await = None;
        *self.schedule.write().await = ScheduleState::default();
        *self.wizards.lock().await = ActiveWizard::None;
        info!("session ended; returning to unauthenticated view");
    }

    /// React to a command failure. Auth expiry is the only failure that
    /// forces global navigation; everything else stays local to its view.
    pub async fn handle_failure(&self, err: &HorarioError) {
        if err.forces_logout() {
            warn!(error = %err, "session expired; forcing logout");
            self.logout().await;
        }
    }

    pub fn start_pollers(&self) {
        self.realtime_poller.start();
        self.progress_poller.start();
    }

    pub async fn stop_pollers(&self) {
        if let Err(err) = self.realtime_poller.stop().await {
            warn!(error = %err, "realtime poller did not stop cleanly");
        }
        if let Err(err) = self.progress_poller.stop().await {
            warn!(error = %err, "progress poller did not stop cleanly");
        }
    }

    // ------------------------------------------------------------------
    // Refresh path (sole writer of grid/overlay state)
    // ------------------------------------------------------------------

    pub async fn schedule_state(&self) -> tokio::sync::RwLockReadGuard<'_, ScheduleState> {
        self.schedule.read().await
    }

    /// Fetch the role-appropriate dashboard payload and cache it.
    pub async fn refresh_dashboard(&self) -> Result<DashboardSnapshot> {
        let user = self
            .current_user()
            .await
            .ok_or_else(|| HorarioError::AuthExpired("no hay sesión activa".to_string()))?;

        let snapshot = if user.role == UserRole::Teacher {
            DashboardSnapshot::Teacher(self.api.fetch_teacher_dashboard(user.id).await?)
        } else {
            DashboardSnapshot::Admin(self.api.fetch_admin_dashboard(user.id).await?)
        };

        let mut state = self.schedule.write().await;
        state.dashboard = Some(snapshot.clone());
        Self::update_progress_locked(&mut state);
        Ok(snapshot)
    }

    /// Periodic refresh: conflicts plus workload alerts. The overlay is
    /// replaced atomically; a failure leaves the prior state displayed.
    pub async fn refresh_realtime(&self) -> Result<()> {
        let conflicts = self.api.fetch_conflicts().await?;
        let alerts = self.api.fetch_workload_alerts().await?;

        let mut state = self.schedule.write().await;
        state.overlay = match &state.grid {
            Some(grid) => ConflictOverlay::compute(grid, &conflicts.conflicts),
            None => ConflictOverlay::default(),
        };
        state.facts = conflicts.conflicts;
        state.alert_count = alerts.alerts.len();
        debug!(
            conflicts = state.facts.len(),
            alerts = state.alert_count,
            "realtime data refreshed"
        );
        Ok(())
    }

    /// Rebuild the grid wholesale from a fresh weekly payload.
    pub async fn refresh_week(&self, section_id: i64) -> Result<()> {
        let week = self.api.fetch_week(section_id).await?;

        let mut state = self.schedule.write().await;
        let grid = ScheduleGrid::from_week(&week);
        state.overlay = ConflictOverlay::compute(&grid, &state.facts);
        state.grid = Some(grid);
        state.week = Some(week);
        Ok(())
    }

    /// Recompute the current-class progress readout from cached data.
    pub async fn refresh_class_progress(&self) {
        let mut state = self.schedule.write().await;
        Self::update_progress_locked(&mut state);
    }

    fn update_progress_locked(state: &mut ScheduleState) {
        state.class_progress = match &state.dashboard {
            Some(DashboardSnapshot::Teacher(dashboard)) => {
                dashboard.current_class.as_ref().and_then(|slot| {
                    time_arith::progress(&slot.start_time, &slot.end_time, &local_time_hhmm())
                        .ok()
                })
            }
            _ => None,
        };
    }

    // ------------------------------------------------------------------
    // Wizard exclusivity
    // ------------------------------------------------------------------

    /// The single wizard slot. Opening a wizard while another is active
    /// forcibly closes the first.
    pub async fn wizard_slot(&self) -> tokio::sync::MutexGuard<'_, ActiveWizard> {
        self.wizards.lock().await
    }

    pub async fn open_export_wizard(&self) {
        let mut slot = self.wizards.lock().await;
        if !matches!(*slot, ActiveWizard::None) {
            info!(closing = slot.name(), "closing previous wizard before opening export");
        }
        *slot = ActiveWizard::Export(ExportWizard::new(&self.config.tenant.institution_name));
    }

    pub async fn open_optimization_wizard(&self) {
        let mut slot = self.wizards.lock().await;
        if !matches!(*slot, ActiveWizard::None) {
            info!(closing = slot.name(), "closing previous wizard before opening optimization");
        }
        *slot = ActiveWizard::Optimization(OptimizationWizard::new());
    }

    /// Close whatever wizard is open, discarding its logical progress. Any
    /// in-flight response is dropped on arrival with the wizard instance.
    pub async fn close_wizard(&self) {
        let mut slot = self.wizards.lock().await;
        if !matches!(*slot, ActiveWizard::None) {
            debug!(wizard = slot.name(), "wizard closed");
        }
        *slot = ActiveWizard::None;
    }
}

/// Periodic conflict/workload refresh, driven by the realtime poller.
struct RealtimeRefreshTask {
    ctx: Weak<AppContext>,
}

#[async_trait]
impl RefreshTask for RealtimeRefreshTask {
    async fn refresh(&self) -> Result<()> {
        let Some(ctx) = self.ctx.upgrade() else { return Ok(()) };
        ctx.refresh_realtime().await
    }
}

/// Fast-cadence current-class progress recomputation.
struct ClassProgressTask {
    ctx: Weak<AppContext>,
}

#[async_trait]
impl RefreshTask for ClassProgressTask {
    async fn refresh(&self) -> Result<()> {
        let Some(ctx) = self.ctx.upgrade() else { return Ok(()) };
        ctx.refresh_class_progress().await;
        Ok(())
    }
}
