//! Teacher workload reporting types

use serde::{Deserialize, Serialize};

use super::conflict::Severity;

/// Aggregate weekly teaching hours for a teacher, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadStatus {
    #[serde(default)]
    pub current_hours: f64,
    #[serde(default)]
    pub max_hours: Option<f64>,
    #[serde(default)]
    pub weekly_classes: u32,
    #[serde(default)]
    pub subjects_count: u32,
    #[serde(default)]
    pub sections_count: u32,
    #[serde(default)]
    pub is_valid: Option<bool>,
}

/// Known workload alert categories; unknown ones are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertType {
    Overloaded,
    Underutilized,
    MissingQualification,
    ScheduleGap,
    Other(String),
}

impl AlertType {
    pub fn key(&self) -> &str {
        match self {
            Self::Overloaded => "overloaded",
            Self::Underutilized => "underutilized",
            Self::MissingQualification => "missing_qualification",
            Self::ScheduleGap => "schedule_gap",
            Self::Other(key) => key,
        }
    }

    /// Fixed Spanish display label; unknown categories pass through verbatim.
    pub fn label(&self) -> &str {
        match self {
            Self::Overloaded => "Sobrecargado",
            Self::Underutilized => "Subutilizado",
            Self::MissingQualification => "Falta Calificación",
            Self::ScheduleGap => "Hueco en Horario",
            Self::Other(key) => key,
        }
    }
}

impl From<String> for AlertType {
    fn from(key: String) -> Self {
        match key.as_str() {
            "overloaded" => Self::Overloaded,
            "underutilized" => Self::Underutilized,
            "missing_qualification" => Self::MissingQualification,
            "schedule_gap" => Self::ScheduleGap,
            _ => Self::Other(key),
        }
    }
}

impl From<AlertType> for String {
    fn from(kind: AlertType) -> Self {
        kind.key().to_string()
    }
}

/// A per-teacher workload alert shown on the administrator dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherAlert {
    pub teacher_id: i64,
    pub teacher_name: String,
    pub alert_type: AlertType,
    #[serde(default)]
    pub current_hours: f64,
    #[serde(default)]
    pub max_hours: f64,
    #[serde(default)]
    pub excess_hours: Option<f64>,
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Response payload of the workload alerts endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadAlerts {
    #[serde(default)]
    pub alerts: Vec<TeacherAlert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_labels_translate() {
        assert_eq!(AlertType::Overloaded.label(), "Sobrecargado");
        assert_eq!(AlertType::ScheduleGap.label(), "Hueco en Horario");
        assert_eq!(AlertType::from("night_shift".to_string()).label(), "night_shift");
    }

    #[test]
    fn workload_status_tolerates_sparse_payload() {
        let status: WorkloadStatus = serde_json::from_str(r#"{"current_hours": 42}"#).unwrap();
        assert_eq!(status.current_hours, 42.0);
        assert_eq!(status.max_hours, None);
        assert_eq!(status.weekly_classes, 0);
    }
}
