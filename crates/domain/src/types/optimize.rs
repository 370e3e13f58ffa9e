//! Schedule optimization run types
//!
//! The optimizer itself runs server-side; these types cover the submit /
//! poll / preview / apply lifecycle the client drives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optimization algorithm selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Genetic,
    Constraint,
    Hybrid,
}

impl Algorithm {
    pub fn description(self) -> &'static str {
        match self {
            Self::Genetic => "Evolutionary optimization using natural selection principles",
            Self::Constraint => "CSP solver with backtracking and local search optimization",
            Self::Hybrid => "Combines genetic algorithm with constraint solving for best results",
        }
    }

    /// Whether the genetic parameter block applies to this algorithm.
    pub fn uses_genetic_params(self) -> bool {
        matches!(self, Self::Genetic | Self::Hybrid)
    }

    /// Whether the constraint solver parameter block applies.
    pub fn uses_constraint_params(self) -> bool {
        matches!(self, Self::Constraint | Self::Hybrid)
    }
}

/// Genetic algorithm parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticParams {
    pub population_size: u32,
    pub generations: u32,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elitism_rate: f64,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.02,
            crossover_rate: 0.8,
            elitism_rate: 0.1,
        }
    }
}

/// Constraint solver parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintParams {
    pub iterations: u32,
    pub backtrack_limit: u32,
}

impl Default for ConstraintParams {
    fn default() -> Self {
        Self { iterations: 100, backtrack_limit: 10_000 }
    }
}

/// Objective weighting, expressed as fractions summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub preferences: f64,
    pub workload: f64,
    pub conflicts: f64,
    pub continuity: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self { preferences: 0.4, workload: 0.2, conflicts: 0.3, continuity: 0.1 }
    }
}

/// Hard hour caps the optimizer must honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConstraints {
    pub max_daily_hours_teacher: u32,
    pub max_weekly_hours_teacher: u32,
    pub max_consecutive_hours: u32,
    pub max_daily_hours_section: u32,
}

impl Default for ScheduleConstraints {
    fn default() -> Self {
        Self {
            max_daily_hours_teacher: 6,
            max_weekly_hours_teacher: 30,
            max_consecutive_hours: 3,
            max_daily_hours_section: 8,
        }
    }
}

/// Everything the Configure step edits. Holds both parameter blocks; only
/// the blocks relevant to the chosen algorithm ride in the start request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationDraft {
    pub algorithm: Algorithm,
    pub genetic: GeneticParams,
    pub constraint: ConstraintParams,
    pub weights: ObjectiveWeights,
    pub constraints: ScheduleConstraints,
}

/// Per-algorithm parameter subset as flattened into the wire request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmParameters {
    #[serde(flatten)]
    pub genetic: Option<GeneticParams>,
    #[serde(flatten)]
    pub constraint: Option<ConstraintParams>,
}

/// Wire request body for starting an optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartOptimizationRequest {
    pub algorithm: Algorithm,
    pub parameters: AlgorithmParameters,
    pub constraints: ScheduleConstraints,
}

/// Response of the start endpoint. The backend performs the run as one
/// blocking call, so a successful response already carries the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub optimization_id: Option<String>,
    #[serde(default)]
    pub fitness_score: f64,
    #[serde(default)]
    pub schedule_count: u32,
    #[serde(default)]
    pub violations: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Lifecycle status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One execution attempt of the server-side optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRun {
    pub id: String,
    pub algorithm: Algorithm,
    pub status: RunStatus,
    pub fitness_score: f64,
    pub violations: Vec<String>,
    pub started_at: DateTime<Utc>,
}

/// One proposed assignment in a run's schedule preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewAssignment {
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub classroom: String,
    pub day: String,
    pub time_period: String,
}

/// Response of the preview endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulePreview {
    #[serde(default)]
    pub assignments: Vec<PreviewAssignment>,
}

/// Server-held optimizer defaults served by the config endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizerRemoteConfig {
    #[serde(default)]
    pub weights: Option<ObjectiveWeights>,
    #[serde(default)]
    pub constraints: Option<ScheduleConstraints>,
}

/// Response of the apply endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
