//! Data-only dashboard view-models

use chrono::{DateTime, Utc};
use horario_domain::types::conflict::Severity;

use crate::schedule::workload::WorkloadLevel;

/// A dashboard card: either composed data or an explicit no-data placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView<T> {
    Present(T),
    Placeholder(&'static str),
}

impl<T> CardView<T> {
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(card) => Some(card),
            Self::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// The class happening right now, with live elapsed progress.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentClassCard {
    pub subject: String,
    pub section: String,
    pub classroom: String,
    pub time_range: String,
    pub progress_pct: f64,
    pub ending_soon: bool,
}

/// The next class of the day, with countdown to its start.
#[derive(Debug, Clone, PartialEq)]
pub struct NextClassCard {
    pub subject: String,
    pub section: String,
    pub classroom: String,
    pub time_range: String,
    pub time_until: String,
}

/// Completion status of one schedule item relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Current,
    Completed,
    Upcoming,
}

/// One row of the today-schedule timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayItem {
    pub start_time: String,
    pub subject: String,
    pub section: String,
    pub classroom: String,
    pub duration: String,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodayScheduleCard {
    pub items: Vec<TodayItem>,
    pub class_count: usize,
}

/// Weekly hour totals with the derived classification.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadCard {
    pub current_hours: f64,
    pub max_hours: f64,
    pub percentage: f64,
    pub level: WorkloadLevel,
    pub status_label: &'static str,
    pub weekly_classes: u32,
    pub subjects_count: u32,
    pub sections_count: u32,
}

/// One translated conflict line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictLine {
    pub label: String,
    pub description: String,
    pub detected_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictsCard {
    pub total: usize,
    pub critical: Vec<ConflictLine>,
    pub warnings: Vec<ConflictLine>,
}

/// The teacher dashboard, fully composed.
#[derive(Debug, Clone)]
pub struct TeacherDashboardView {
    pub teacher_name: String,
    pub current_class: CardView<CurrentClassCard>,
    pub next_class: CardView<NextClassCard>,
    pub today: CardView<TodayScheduleCard>,
    pub workload: CardView<WorkloadCard>,
    pub conflicts: CardView<ConflictsCard>,
}

/// Platform-wide counters for administrators.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewCard {
    pub total_assignments: u32,
    pub total_conflicts: u32,
    pub critical_conflicts: u32,
    pub conflict_rate: f64,
}

/// One per-teacher workload alert line.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertLine {
    pub teacher_name: String,
    pub alert_label: String,
    pub current_hours: f64,
    pub max_hours: f64,
    pub excess_hours: Option<f64>,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherAlertsCard {
    pub alerts: Vec<AlertLine>,
}

/// Completion bucket for a section's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionBand {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionItem {
    pub section_name: String,
    pub assignments_count: u32,
    pub percentage: f64,
    pub band: CompletionBand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCard {
    pub sections: Vec<CompletionItem>,
}

/// The administrator dashboard, fully composed.
#[derive(Debug, Clone)]
pub struct AdminDashboardView {
    pub admin_name: String,
    pub overview: CardView<OverviewCard>,
    pub critical_conflicts: CardView<ConflictsCard>,
    pub teacher_alerts: CardView<TeacherAlertsCard>,
    pub completion: CardView<CompletionCard>,
}
