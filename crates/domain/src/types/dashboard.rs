//! Role-specific dashboard payloads
//!
//! These mirror the backend's dashboard endpoint responses. Every section is
//! optional: the composer turns missing sections into explicit placeholders
//! rather than failing.

use serde::{Deserialize, Serialize};

use super::conflict::ConflictFact;
use super::workload::{TeacherAlert, WorkloadStatus};

/// One class occurrence in a teacher's day, with "HH:MM" boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSlot {
    #[serde(default, alias = "id")]
    pub assignment_id: Option<i64>,
    pub subject: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub classroom: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
}

/// Payload for the teacher role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherDashboard {
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub current_class: Option<ClassSlot>,
    #[serde(default)]
    pub next_class: Option<ClassSlot>,
    #[serde(default)]
    pub today_schedule: Option<Vec<ClassSlot>>,
    #[serde(default)]
    pub workload_status: Option<WorkloadStatus>,
    #[serde(default)]
    pub conflicts: Option<Vec<ConflictFact>>,
}

/// Platform-wide counters for the administrator overview card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformOverview {
    #[serde(default)]
    pub total_assignments: u32,
    #[serde(default)]
    pub total_conflicts: u32,
    #[serde(default)]
    pub critical_conflicts: u32,
    #[serde(default)]
    pub conflict_rate: f64,
}

/// Per-section schedule completion statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCompletion {
    pub section_name: String,
    #[serde(default)]
    pub assignments_count: u32,
    #[serde(default)]
    pub completion_percentage: f64,
}

/// Payload for the administrator roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminDashboard {
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub platform_overview: Option<PlatformOverview>,
    #[serde(default)]
    pub critical_conflicts: Option<Vec<ConflictFact>>,
    #[serde(default)]
    pub teacher_alerts: Option<Vec<TeacherAlert>>,
    #[serde(default)]
    pub schedule_completion: Option<Vec<SectionCompletion>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_all_placeholders() {
        let dashboard: TeacherDashboard = serde_json::from_str("{}").unwrap();
        assert!(dashboard.current_class.is_none());
        assert!(dashboard.today_schedule.is_none());
        assert!(dashboard.workload_status.is_none());
    }

    #[test]
    fn class_slot_accepts_id_alias() {
        let raw = r#"{"id": 9, "subject": "QUÍMICA", "start_time": "07:00", "end_time": "07:40"}"#;
        let slot: ClassSlot = serde_json::from_str(raw).unwrap();
        assert_eq!(slot.assignment_id, Some(9));
        assert!(!slot.is_current);
    }
}
