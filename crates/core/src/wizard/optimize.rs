//! Optimization wizard state machine
//!
//! Configure → Submitting → Polling(simulated) → Results → Apply | Discard.
//! The backend performs the run as one blocking call; Polling animates a
//! local estimate until that call resolves. Start and apply failures are
//! surfaced inline and never corrupt the Configure draft, so an immediate
//! retry is always possible.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use horario_domain::constants::POLLING_FRAME_INTERVAL_MS;
use horario_domain::types::optimize::{
    AlgorithmParameters, OptimizationDraft, OptimizationOutcome, OptimizationRun,
    OptimizerRemoteConfig, PreviewAssignment, RunStatus, SchedulePreview,
    StartOptimizationRequest,
};
use horario_domain::{HorarioError, Result};
use tracing::{info, warn};

use super::ports::OptimizerGateway;
use super::progress::{PollingFrame, ProgressEstimator};

/// Wizard steps as tagged variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeStep {
    Configure,
    Submitting,
    Polling,
    Results,
    Failed,
}

/// The optimization wizard. One instance per session; discarded on close.
pub struct OptimizationWizard {
    step: OptimizeStep,
    draft: OptimizationDraft,
    outcome: Option<OptimizationOutcome>,
    preview: Option<SchedulePreview>,
    run: Option<OptimizationRun>,
    error: Option<String>,
    frame_interval: Duration,
}

impl Default for OptimizationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimizationWizard {
    pub fn new() -> Self {
        Self {
            step: OptimizeStep::Configure,
            draft: OptimizationDraft::default(),
            outcome: None,
            preview: None,
            run: None,
            error: None,
            frame_interval: Duration::from_millis(POLLING_FRAME_INTERVAL_MS),
        }
    }

    /// Shorten the animation frame interval (tests).
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn step(&self) -> OptimizeStep {
        self.step
    }

    pub fn draft(&self) -> &OptimizationDraft {
        &self.draft
    }

    /// Editable draft, available while configuring only.
    pub fn draft_mut(&mut self) -> Result<&mut OptimizationDraft> {
        if self.step != OptimizeStep::Configure {
            return Err(HorarioError::Validation(
                "los parámetros solo son editables antes de iniciar".to_string(),
            ));
        }
        Ok(&mut self.draft)
    }

    /// Reset parameters and constraints to the documented fixed defaults.
    pub fn load_defaults(&mut self) -> Result<()> {
        if self.step != OptimizeStep::Configure {
            return Err(HorarioError::Validation(
                "los valores por defecto solo aplican al configurar".to_string(),
            ));
        }
        self.draft = OptimizationDraft::default();
        Ok(())
    }

    /// Overlay server-held defaults from the config endpoint onto the draft.
    pub fn apply_remote_config(&mut self, config: &OptimizerRemoteConfig) -> Result<()> {
        let draft = self.draft_mut()?;
        if let Some(weights) = &config.weights {
            draft.weights = weights.clone();
        }
        if let Some(constraints) = &config.constraints {
            draft.constraints = constraints.clone();
        }
        Ok(())
    }

    /// Build the start request, carrying only the parameter blocks the
    /// chosen algorithm uses.
    pub fn start_request(&self) -> StartOptimizationRequest {
        let algorithm = self.draft.algorithm;
        StartOptimizationRequest {
            algorithm,
            parameters: AlgorithmParameters {
                genetic: algorithm.uses_genetic_params().then(|| self.draft.genetic.clone()),
                constraint: algorithm
                    .uses_constraint_params()
                    .then(|| self.draft.constraint.clone()),
            },
            constraints: self.draft.constraints.clone(),
        }
    }

    pub fn outcome(&self) -> Option<&OptimizationOutcome> {
        self.outcome.as_ref()
    }

    pub fn preview(&self) -> Option<&SchedulePreview> {
        self.preview.as_ref()
    }

    /// The run record for the last completed attempt.
    pub fn current_run(&self) -> Option<&OptimizationRun> {
        self.run.as_ref()
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run.as_ref().map(|run| run.id.as_str())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the run and animate the Polling state until the response
    /// arrives. On success the wizard lands on Results; on any failure it
    /// lands on Failed with the Configure draft intact. `started_at` is
    /// injected so the elapsed readout stays testable.
    pub async fn run(
        &mut self,
        gateway: &dyn OptimizerGateway,
        started_at: DateTime<Utc>,
        estimator: &mut dyn ProgressEstimator,
        on_frame: &mut dyn FnMut(&PollingFrame),
    ) -> Result<()> {
        if self.step != OptimizeStep::Configure {
            return Err(HorarioError::Validation(
                "ya hay una optimización en curso".to_string(),
            ));
        }

        let request = self.start_request();
        self.step = OptimizeStep::Submitting;
        info!(algorithm = ?request.algorithm, "starting optimization run");

        // The start call blocks until the optimizer finishes; animate a
        // local estimate while awaiting. A real progress channel would
        // replace the estimator without reshaping this loop.
        self.step = OptimizeStep::Polling;
        let start_future = gateway.start(&request);
        tokio::pin!(start_future);
        let result = loop {
            tokio::select! {
                result = &mut start_future => break result,
                _ = tokio::time::sleep(self.frame_interval) => {
                    let frame = estimator.tick();
                    on_frame(&frame);
                }
            }
        };

        match result {
            Ok(outcome) if outcome.success => {
                if let Some(run_id) = &outcome.optimization_id {
                    self.run = Some(OptimizationRun {
                        id: run_id.clone(),
                        algorithm: self.draft.algorithm,
                        status: RunStatus::Completed,
                        fitness_score: outcome.fitness_score,
                        violations: outcome.violations.clone(),
                        started_at,
                    });
                    match gateway.fetch_preview(run_id).await {
                        Ok(preview) => self.preview = Some(preview),
                        Err(err) => {
                            warn!(error = %err, run_id = %run_id, "schedule preview unavailable");
                        }
                    }
                }
                info!(
                    fitness = outcome.fitness_score,
                    assignments = outcome.schedule_count,
                    "optimization completed"
                );
                self.outcome = Some(outcome);
                self.error = None;
                self.step = OptimizeStep::Results;
                Ok(())
            }
            Ok(outcome) => {
                let message =
                    outcome.error.clone().unwrap_or_else(|| "error desconocido".to_string());
                self.error = Some(message.clone());
                self.step = OptimizeStep::Failed;
                Err(HorarioError::OptimizationFailed(message))
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.step = OptimizeStep::Failed;
                Err(err)
            }
        }
    }

    /// After a failure, return to Configure for an immediate retry.
    pub fn retry(&mut self) -> Result<()> {
        if self.step != OptimizeStep::Failed {
            return Err(HorarioError::Validation(
                "solo puede reintentarse una optimización fallida".to_string(),
            ));
        }
        self.error = None;
        self.step = OptimizeStep::Configure;
        Ok(())
    }

    /// Drop the result and return to Configure without side effects.
    pub fn discard(&mut self) -> Result<()> {
        if self.step != OptimizeStep::Results {
            return Err(HorarioError::Validation(
                "no hay resultados que descartar".to_string(),
            ));
        }
        self.outcome = None;
        self.preview = None;
        self.run = None;
        self.step = OptimizeStep::Configure;
        Ok(())
    }

    /// Replace the active schedule with the run's result. Requires explicit
    /// confirmation; a rejected apply keeps the wizard on Results so the
    /// user can retry or discard.
    pub async fn apply(&mut self, gateway: &dyn OptimizerGateway, confirmed: bool) -> Result<()> {
        if self.step != OptimizeStep::Results {
            return Err(HorarioError::Validation(
                "no hay resultados que aplicar".to_string(),
            ));
        }
        if !confirmed {
            return Err(HorarioError::Validation(
                "aplicar el horario requiere confirmación explícita".to_string(),
            ));
        }
        let run_id = self
            .run_id()
            .map(str::to_string)
            .ok_or_else(|| HorarioError::Internal("results step without run id".to_string()))?;

        let outcome = gateway.apply(&run_id).await?;
        if outcome.success {
            info!(run_id = %run_id, "optimized schedule applied");
            Ok(())
        } else {
            let message = outcome.error.unwrap_or_else(|| "error desconocido".to_string());
            Err(HorarioError::ServerRejection(message))
        }
    }

    /// Preview assignments grouped by (period, day) for the results grid.
    pub fn preview_by_slot(&self) -> BTreeMap<(String, String), Vec<&PreviewAssignment>> {
        let mut grouped: BTreeMap<(String, String), Vec<&PreviewAssignment>> = BTreeMap::new();
        if let Some(preview) = &self.preview {
            for assignment in &preview.assignments {
                grouped
                    .entry((assignment.time_period.clone(), assignment.day.clone()))
                    .or_default()
                    .push(assignment);
            }
        }
        grouped
    }
}

/// Elapsed run time as shown next to the progress bar.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use horario_domain::types::optimize::{Algorithm, ApplyOutcome, ObjectiveWeights};

    use super::*;
    use crate::wizard::progress::SimulatedProgress;

    struct StubOptimizer {
        start_calls: AtomicUsize,
        outcome: Mutex<Option<OptimizationOutcome>>,
        start_error: Option<HorarioError>,
        apply_success: bool,
        start_delay: Duration,
    }

    impl StubOptimizer {
        fn completing() -> Self {
            Self {
                start_calls: AtomicUsize::new(0),
                outcome: Mutex::new(Some(OptimizationOutcome {
                    success: true,
                    optimization_id: Some("run-7".to_string()),
                    fitness_score: 0.87,
                    schedule_count: 54,
                    violations: vec![],
                    error: None,
                })),
                start_error: None,
                apply_success: true,
                start_delay: Duration::from_millis(0),
            }
        }

        fn failing_run() -> Self {
            let mut stub = Self::completing();
            stub.outcome = Mutex::new(Some(OptimizationOutcome {
                success: false,
                error: Some("no feasible schedule".to_string()),
                ..Default::default()
            }));
            stub
        }

        fn transport_error() -> Self {
            let mut stub = Self::completing();
            stub.start_error = Some(HorarioError::Network("connection reset".to_string()));
            stub
        }
    }

    #[async_trait]
    impl OptimizerGateway for StubOptimizer {
        async fn fetch_config(&self) -> Result<OptimizerRemoteConfig> {
            Ok(OptimizerRemoteConfig::default())
        }

        async fn start(
            &self,
            _request: &StartOptimizationRequest,
        ) -> Result<OptimizationOutcome> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            if !self.start_delay.is_zero() {
                tokio::time::sleep(self.start_delay).await;
            }
            if let Some(err) = &self.start_error {
                return Err(err.clone());
            }
            Ok(self.outcome.lock().unwrap().clone().unwrap())
        }

        async fn fetch_preview(&self, _run_id: &str) -> Result<SchedulePreview> {
            Ok(SchedulePreview {
                assignments: vec![PreviewAssignment {
                    subject: "MATEMÁTICAS".to_string(),
                    teacher: "MARIA NIETO".to_string(),
                    section: "1er Año A".to_string(),
                    classroom: "Aula 1".to_string(),
                    day: "Monday".to_string(),
                    time_period: "Period 1".to_string(),
                }],
            })
        }

        async fn apply(&self, _run_id: &str) -> Result<ApplyOutcome> {
            if self.apply_success {
                Ok(ApplyOutcome { success: true, error: None })
            } else {
                Ok(ApplyOutcome {
                    success: false,
                    error: Some("horario bloqueado".to_string()),
                })
            }
        }
    }

    fn started() -> DateTime<Utc> {
        DateTime::from_timestamp(1_757_900_000, 0).unwrap()
    }

    #[test]
    fn load_defaults_reproduces_documented_values() {
        let mut wizard = OptimizationWizard::new();
        {
            let draft = wizard.draft_mut().unwrap();
            draft.genetic.population_size = 9;
            draft.constraints.max_weekly_hours_teacher = 99;
            draft.weights = ObjectiveWeights {
                preferences: 1.0,
                workload: 0.0,
                conflicts: 0.0,
                continuity: 0.0,
            };
        }
        wizard.load_defaults().unwrap();

        let request = wizard.start_request();
        let genetic = request.parameters.genetic.unwrap();
        assert_eq!(genetic.population_size, 100);
        assert_eq!(genetic.generations, 500);
        assert_eq!(genetic.mutation_rate, 0.02);
        assert_eq!(genetic.crossover_rate, 0.8);
        assert_eq!(genetic.elitism_rate, 0.1);
        assert_eq!(request.constraints.max_daily_hours_teacher, 6);
        assert_eq!(request.constraints.max_weekly_hours_teacher, 30);
        assert_eq!(request.constraints.max_consecutive_hours, 3);
        assert_eq!(request.constraints.max_daily_hours_section, 8);
        assert_eq!(wizard.draft().constraint.iterations, 100);
        assert_eq!(wizard.draft().constraint.backtrack_limit, 10_000);
    }

    #[test]
    fn start_request_subsets_parameters_by_algorithm() {
        let mut wizard = OptimizationWizard::new();

        wizard.draft_mut().unwrap().algorithm = Algorithm::Genetic;
        let request = wizard.start_request();
        assert!(request.parameters.genetic.is_some());
        assert!(request.parameters.constraint.is_none());

        wizard.draft_mut().unwrap().algorithm = Algorithm::Constraint;
        let request = wizard.start_request();
        assert!(request.parameters.genetic.is_none());
        assert!(request.parameters.constraint.is_some());

        wizard.draft_mut().unwrap().algorithm = Algorithm::Hybrid;
        let request = wizard.start_request();
        assert!(request.parameters.genetic.is_some());
        assert!(request.parameters.constraint.is_some());
    }

    #[tokio::test]
    async fn successful_run_lands_on_results_with_preview() {
        let gateway = StubOptimizer::completing();
        let mut wizard = OptimizationWizard::new();
        let mut estimator = SimulatedProgress::with_seed(3);

        wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap();

        assert_eq!(wizard.step(), OptimizeStep::Results);
        assert_eq!(wizard.run_id(), Some("run-7"));

        let run = wizard.current_run().unwrap();
        assert_eq!(run.status, RunStatus::Completed);
        assert_eq!(run.algorithm, wizard.draft().algorithm);
        assert_eq!(run.started_at, started());
        assert_eq!(wizard.outcome().unwrap().schedule_count, 54);
        assert!(wizard.outcome().unwrap().violations.is_empty());

        let grouped = wizard.preview_by_slot();
        let cell = grouped
            .get(&("Period 1".to_string(), "Monday".to_string()))
            .expect("preview grouped by period and day");
        assert_eq!(cell[0].subject, "MATEMÁTICAS");
    }

    #[tokio::test]
    async fn polling_animates_while_awaiting_the_response() {
        let mut gateway = StubOptimizer::completing();
        gateway.start_delay = Duration::from_millis(50);
        let mut wizard =
            OptimizationWizard::new().with_frame_interval(Duration::from_millis(5));
        let mut estimator = SimulatedProgress::with_seed(9);

        let mut frames: Vec<PollingFrame> = Vec::new();
        wizard
            .run(&gateway, started(), &mut estimator, &mut |frame| frames.push(*frame))
            .await
            .unwrap();

        assert!(!frames.is_empty(), "expected animation frames during the await");
        for pair in frames.windows(2) {
            assert!(pair[1].progress >= pair[0].progress);
        }
        assert!(frames.iter().all(|f| f.progress < 100.0));
        assert_eq!(wizard.step(), OptimizeStep::Results);
    }

    #[tokio::test]
    async fn unsuccessful_outcome_fails_without_corrupting_the_draft() {
        let gateway = StubOptimizer::failing_run();
        let mut wizard = OptimizationWizard::new();
        wizard.draft_mut().unwrap().genetic.population_size = 250;
        let mut estimator = SimulatedProgress::with_seed(1);

        let err = wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap_err();
        assert!(matches!(err, HorarioError::OptimizationFailed(_)));
        assert_eq!(wizard.step(), OptimizeStep::Failed);
        assert_eq!(wizard.last_error(), Some("no feasible schedule"));

        wizard.retry().unwrap();
        assert_eq!(wizard.step(), OptimizeStep::Configure);
        assert_eq!(wizard.draft().genetic.population_size, 250);
    }

    #[tokio::test]
    async fn transport_error_also_lands_on_failed() {
        let gateway = StubOptimizer::transport_error();
        let mut wizard = OptimizationWizard::new();
        let mut estimator = SimulatedProgress::with_seed(1);

        let err = wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap_err();
        assert!(matches!(err, HorarioError::Network(_)));
        assert_eq!(wizard.step(), OptimizeStep::Failed);
    }

    #[tokio::test]
    async fn apply_requires_explicit_confirmation() {
        let gateway = StubOptimizer::completing();
        let mut wizard = OptimizationWizard::new();
        let mut estimator = SimulatedProgress::with_seed(1);
        wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap();

        let err = wizard.apply(&gateway, false).await.unwrap_err();
        assert!(matches!(err, HorarioError::Validation(_)));
        assert_eq!(wizard.step(), OptimizeStep::Results);

        wizard.apply(&gateway, true).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_apply_keeps_results_for_retry() {
        let mut gateway = StubOptimizer::completing();
        gateway.apply_success = false;
        let mut wizard = OptimizationWizard::new();
        let mut estimator = SimulatedProgress::with_seed(1);
        wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap();

        let err = wizard.apply(&gateway, true).await.unwrap_err();
        assert!(matches!(err, HorarioError::ServerRejection(_)));
        assert_eq!(wizard.step(), OptimizeStep::Results);
        assert!(wizard.outcome().is_some());
    }

    #[tokio::test]
    async fn discard_returns_to_configure_without_side_effects() {
        let gateway = StubOptimizer::completing();
        let mut wizard = OptimizationWizard::new();
        let mut estimator = SimulatedProgress::with_seed(1);
        wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap();

        wizard.discard().unwrap();
        assert_eq!(wizard.step(), OptimizeStep::Configure);
        assert!(wizard.outcome().is_none());
        assert!(wizard.run_id().is_none());
        assert!(wizard.preview().is_none());
    }

    #[tokio::test]
    async fn second_run_rejected_while_not_configuring() {
        let gateway = StubOptimizer::completing();
        let mut wizard = OptimizationWizard::new();
        let mut estimator = SimulatedProgress::with_seed(1);
        wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap();

        // Results step: a duplicate run must be rejected
        let err = wizard.run(&gateway, started(), &mut estimator, &mut |_| {}).await.unwrap_err();
        assert!(matches!(err, HorarioError::Validation(_)));
        assert_eq!(gateway.start_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn elapsed_formats_as_minutes_and_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "01:05");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10:00");
    }
}
