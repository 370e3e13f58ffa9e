//! Weekly schedule taxonomy and assignment records
//!
//! The teaching week is fixed: five weekdays, twelve daily slots (ten
//! teaching periods plus two breaks). The taxonomy is data, not
//! configuration; every grid consumer indexes against these constants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Weekday keys of the fixed five-day teaching week, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
}

impl Weekday {
    pub const ALL: [Weekday; 5] =
        [Weekday::Lunes, Weekday::Martes, Weekday::Miercoles, Weekday::Jueves, Weekday::Viernes];

    /// Wire key, as used in backend payload maps.
    pub fn key(self) -> &'static str {
        match self {
            Self::Lunes => "lunes",
            Self::Martes => "martes",
            Self::Miercoles => "miercoles",
            Self::Jueves => "jueves",
            Self::Viernes => "viernes",
        }
    }

    /// Human-readable Spanish label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Lunes => "Lunes",
            Self::Martes => "Martes",
            Self::Miercoles => "Miércoles",
            Self::Jueves => "Jueves",
            Self::Viernes => "Viernes",
        }
    }

    /// Parse a wire key back into a weekday.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    /// Position within the teaching week (0-based).
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One slot of the fixed daily timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub key: &'static str,
    pub label: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub is_break: bool,
}

/// The twelve daily slots: ten 40-minute teaching periods and two breaks.
pub const PERIODS: [Period; 12] = [
    Period { key: "P1", label: "P1", start: "07:00", end: "07:40", is_break: false },
    Period { key: "P2", label: "P2", start: "07:40", end: "08:20", is_break: false },
    Period { key: "P3", label: "P3", start: "08:20", end: "09:00", is_break: false },
    Period { key: "REC1", label: "RECREO", start: "09:00", end: "09:20", is_break: true },
    Period { key: "P4", label: "P4", start: "09:20", end: "10:00", is_break: false },
    Period { key: "P5", label: "P5", start: "10:00", end: "10:40", is_break: false },
    Period { key: "P6", label: "P6", start: "10:40", end: "11:20", is_break: false },
    Period { key: "REC2", label: "RECREO", start: "11:20", end: "11:40", is_break: true },
    Period { key: "P7", label: "P7", start: "11:40", end: "12:20", is_break: false },
    Period { key: "P8", label: "P8", start: "12:20", end: "13:00", is_break: false },
    Period { key: "P9", label: "P9", start: "13:00", end: "13:40", is_break: false },
    Period { key: "P10", label: "P10", start: "13:40", end: "14:20", is_break: false },
];

impl Period {
    /// Look up a period slot by its wire key.
    pub fn from_key(key: &str) -> Option<&'static Period> {
        PERIODS.iter().find(|p| p.key == key)
    }

    /// Position within the daily timetable (0-based).
    pub fn index(&self) -> usize {
        PERIODS.iter().position(|p| p.key == self.key).unwrap_or(0)
    }
}

fn default_active() -> bool {
    true
}

/// A binding of subject, teacher, section and classroom to one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(alias = "assignment_id")]
    pub id: i64,
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub classroom: String,
    #[serde(default)]
    pub day_of_week: Option<Weekday>,
    #[serde(default)]
    pub time_period: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Raw weekly schedule payload as served by the backend, keyed by day then
/// period. Cells absent from the map are free slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekSchedule {
    #[serde(default)]
    pub schedule: BTreeMap<String, BTreeMap<String, Assignment>>,
    #[serde(default)]
    pub section_id: Option<i64>,
    #[serde(default)]
    pub section_name: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
}

/// Request body for creating a grid assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignment {
    pub teacher_id: i64,
    pub subject_id: i64,
    pub section_id: i64,
    pub classroom_id: i64,
    pub day_of_week: Weekday,
    pub time_period: String,
    pub validate_conflicts: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_has_five_days_twelve_slots() {
        assert_eq!(Weekday::ALL.len(), 5);
        assert_eq!(PERIODS.len(), 12);
        assert_eq!(PERIODS.iter().filter(|p| !p.is_break).count(), 10);
        assert_eq!(PERIODS.iter().filter(|p| p.is_break).count(), 2);
    }

    #[test]
    fn weekday_keys_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_key(day.key()), Some(day));
        }
        assert_eq!(Weekday::from_key("domingo"), None);
    }

    #[test]
    fn weekday_serializes_to_wire_key() {
        let json = serde_json::to_string(&Weekday::Miercoles).unwrap();
        assert_eq!(json, "\"miercoles\"");
    }

    #[test]
    fn period_lookup_by_key() {
        let rec = Period::from_key("REC1").unwrap();
        assert!(rec.is_break);
        assert_eq!(rec.start, "09:00");
        assert_eq!(Period::from_key("P10").unwrap().end, "14:20");
        assert!(Period::from_key("P11").is_none());
    }

    #[test]
    fn assignment_accepts_assignment_id_alias() {
        let raw = r#"{"assignment_id": 7, "subject": "MATEMÁTICAS"}"#;
        let assignment: Assignment = serde_json::from_str(raw).unwrap();
        assert_eq!(assignment.id, 7);
        assert!(assignment.is_active);
        assert!(assignment.teacher.is_empty());
    }
}
