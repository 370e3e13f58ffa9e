//! Workload classification against the institutional hour cap

use horario_domain::constants::{
    DEFAULT_MAX_WEEKLY_HOURS, OVERLOAD_THRESHOLD_PCT, UNDERLOAD_THRESHOLD_PCT,
    WARNING_THRESHOLD_PCT,
};

/// Workload status categories, from the fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadLevel {
    Overload,
    Warning,
    Underload,
    Normal,
}

impl WorkloadLevel {
    /// Spanish display label used on the workload card.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overload => "Sobrecargado",
            Self::Warning => "Cerca del límite",
            Self::Underload => "Subutilizado",
            Self::Normal => "Normal",
        }
    }
}

/// Result of classifying an hour total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkloadAssessment {
    /// current / max × 100, unclamped so overload reads above 100.
    pub percentage: f64,
    pub level: WorkloadLevel,
}

/// Classify weekly hours against the cap. A missing or non-positive cap
/// falls back to the configured default (40) instead of failing.
pub fn classify(current_hours: f64, max_hours: Option<f64>) -> WorkloadAssessment {
    let max = match max_hours {
        Some(max) if max > 0.0 => max,
        _ => DEFAULT_MAX_WEEKLY_HOURS,
    };

    let percentage = current_hours / max * 100.0;
    let level = if percentage > OVERLOAD_THRESHOLD_PCT {
        WorkloadLevel::Overload
    } else if percentage > WARNING_THRESHOLD_PCT {
        WorkloadLevel::Warning
    } else if percentage < UNDERLOAD_THRESHOLD_PCT {
        WorkloadLevel::Underload
    } else {
        WorkloadLevel::Normal
    };

    WorkloadAssessment { percentage, level }
}
