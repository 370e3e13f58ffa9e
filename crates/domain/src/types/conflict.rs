//! Server-detected scheduling conflicts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Known conflict categories reported by the backend.
///
/// Unknown categories are preserved verbatim so a newer backend never breaks
/// deserialization on this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConflictType {
    TeacherDoubleBooking,
    ClassroomConflict,
    SectionOverlap,
    WorkloadViolation,
    TeacherSubjectMismatch,
    TimeConflict,
    ResourceUnavailable,
    Other(String),
}

impl ConflictType {
    /// Wire key of this conflict category.
    pub fn key(&self) -> &str {
        match self {
            Self::TeacherDoubleBooking => "teacher_double_booking",
            Self::ClassroomConflict => "classroom_conflict",
            Self::SectionOverlap => "section_overlap",
            Self::WorkloadViolation => "workload_violation",
            Self::TeacherSubjectMismatch => "teacher_subject_mismatch",
            Self::TimeConflict => "time_conflict",
            Self::ResourceUnavailable => "resource_unavailable",
            Self::Other(key) => key,
        }
    }

    /// Fixed Spanish display label; unknown categories pass through verbatim.
    pub fn label(&self) -> &str {
        match self {
            Self::TeacherDoubleBooking => "Profesor Duplicado",
            Self::ClassroomConflict => "Conflicto de Aula",
            Self::SectionOverlap => "Solapamiento de Sección",
            Self::WorkloadViolation => "Violación de Carga",
            Self::TeacherSubjectMismatch => "Materia Incorrecta",
            Self::TimeConflict => "Conflicto de Horario",
            Self::ResourceUnavailable => "Recurso No Disponible",
            Self::Other(key) => key,
        }
    }
}

impl From<String> for ConflictType {
    fn from(key: String) -> Self {
        match key.as_str() {
            "teacher_double_booking" => Self::TeacherDoubleBooking,
            "classroom_conflict" => Self::ClassroomConflict,
            "section_overlap" => Self::SectionOverlap,
            "workload_violation" => Self::WorkloadViolation,
            "teacher_subject_mismatch" => Self::TeacherSubjectMismatch,
            "time_conflict" => Self::TimeConflict,
            "resource_unavailable" => Self::ResourceUnavailable,
            _ => Self::Other(key),
        }
    }
}

impl From<ConflictType> for String {
    fn from(kind: ConflictType) -> Self {
        kind.key().to_string()
    }
}

/// Conflict severity as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

/// A single server-detected scheduling violation, optionally attached to an
/// assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictFact {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: ConflictType,
    pub severity: Severity,
    pub description: String,
    #[serde(default)]
    pub assignment_id: Option<i64>,
    #[serde(default)]
    pub detected_at: Option<DateTime<Utc>>,
}

/// Response payload of the conflicts endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictSummary {
    #[serde(default)]
    pub total_conflicts: u32,
    #[serde(default)]
    pub conflicts: Vec<ConflictFact>,
}
