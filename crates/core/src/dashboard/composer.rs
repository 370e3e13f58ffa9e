//! Assembles role-specific dashboard view-models from fetched payloads

use horario_domain::constants::{COMPLETION_LOW_PCT, COMPLETION_MEDIUM_PCT};
use horario_domain::types::conflict::{ConflictFact, Severity};
use horario_domain::types::dashboard::{AdminDashboard, ClassSlot, TeacherDashboard};

use super::viewmodel::*;
use crate::schedule::time;
use crate::schedule::workload;

/// Pure assembly of dashboard view-models. No network access; missing
/// payload sections become explicit placeholders.
pub struct DashboardComposer;

impl DashboardComposer {
    /// Compose the teacher view. `now` is an "HH:MM" label so tests can
    /// inject any instant.
    pub fn compose_teacher(payload: &TeacherDashboard, now: &str) -> TeacherDashboardView {
        TeacherDashboardView {
            teacher_name: payload.teacher_name.clone().unwrap_or_else(|| "Docente".to_string()),
            current_class: match &payload.current_class {
                Some(slot) => CardView::Present(Self::current_class_card(slot, now)),
                None => CardView::Placeholder("No hay clase en este momento"),
            },
            next_class: match &payload.next_class {
                Some(slot) => CardView::Present(Self::next_class_card(slot, now)),
                None => CardView::Placeholder("No hay más clases hoy"),
            },
            today: match &payload.today_schedule {
                Some(slots) => CardView::Present(Self::today_card(slots, now)),
                None => CardView::Placeholder("Sin datos de horario"),
            },
            workload: match &payload.workload_status {
                Some(status) => {
                    let assessment = workload::classify(status.current_hours, status.max_hours);
                    CardView::Present(WorkloadCard {
                        current_hours: status.current_hours,
                        max_hours: status.max_hours.filter(|m| *m > 0.0).unwrap_or(
                            horario_domain::constants::DEFAULT_MAX_WEEKLY_HOURS,
                        ),
                        percentage: assessment.percentage,
                        level: assessment.level,
                        status_label: assessment.level.label(),
                        weekly_classes: status.weekly_classes,
                        subjects_count: status.subjects_count,
                        sections_count: status.sections_count,
                    })
                }
                None => CardView::Placeholder("Sin datos de carga horaria"),
            },
            conflicts: match &payload.conflicts {
                Some(facts) => CardView::Present(Self::conflicts_card(facts)),
                None => CardView::Placeholder("Sin datos de conflictos"),
            },
        }
    }

    /// Compose the administrator view.
    pub fn compose_admin(payload: &AdminDashboard) -> AdminDashboardView {
        AdminDashboardView {
            admin_name: payload.admin_name.clone().unwrap_or_else(|| "Administrador".to_string()),
            overview: match &payload.platform_overview {
                Some(overview) => CardView::Present(OverviewCard {
                    total_assignments: overview.total_assignments,
                    total_conflicts: overview.total_conflicts,
                    critical_conflicts: overview.critical_conflicts,
                    conflict_rate: overview.conflict_rate,
                }),
                None => CardView::Placeholder("Sin datos de resumen"),
            },
            critical_conflicts: match &payload.critical_conflicts {
                Some(facts) => CardView::Present(Self::conflicts_card(facts)),
                None => CardView::Placeholder("Sin datos de conflictos"),
            },
            teacher_alerts: match &payload.teacher_alerts {
                Some(alerts) => CardView::Present(TeacherAlertsCard {
                    alerts: alerts
                        .iter()
                        .map(|alert| AlertLine {
                            teacher_name: alert.teacher_name.clone(),
                            alert_label: alert.alert_type.label().to_string(),
                            current_hours: alert.current_hours,
                            max_hours: alert.max_hours,
                            excess_hours: alert.excess_hours,
                            severity: alert.severity,
                        })
                        .collect(),
                }),
                None => CardView::Placeholder("Sin datos de alertas"),
            },
            completion: match &payload.schedule_completion {
                Some(sections) => CardView::Present(CompletionCard {
                    sections: sections
                        .iter()
                        .map(|section| CompletionItem {
                            section_name: section.section_name.clone(),
                            assignments_count: section.assignments_count,
                            percentage: section.completion_percentage,
                            band: Self::completion_band(section.completion_percentage),
                        })
                        .collect(),
                }),
                None => CardView::Placeholder("Sin datos de completitud"),
            },
        }
    }

    fn current_class_card(slot: &ClassSlot, now: &str) -> CurrentClassCard {
        let progress_pct =
            time::progress(&slot.start_time, &slot.end_time, now).unwrap_or(0.0);
        CurrentClassCard {
            subject: slot.subject.clone(),
            section: slot.section.clone(),
            classroom: slot.classroom.clone(),
            time_range: format!("{} - {}", slot.start_time, slot.end_time),
            progress_pct,
            ending_soon: time::is_ending_soon(progress_pct),
        }
    }

    fn next_class_card(slot: &ClassSlot, now: &str) -> NextClassCard {
        NextClassCard {
            subject: slot.subject.clone(),
            section: slot.section.clone(),
            classroom: slot.classroom.clone(),
            time_range: format!("{} - {}", slot.start_time, slot.end_time),
            time_until: time::time_until(&slot.start_time, now)
                .unwrap_or_else(|_| "—".to_string()),
        }
    }

    fn today_card(slots: &[ClassSlot], now: &str) -> TodayScheduleCard {
        let items = slots
            .iter()
            .map(|slot| TodayItem {
                start_time: slot.start_time.clone(),
                subject: slot.subject.clone(),
                section: slot.section.clone(),
                classroom: slot.classroom.clone(),
                duration: time::format_duration(&slot.start_time, &slot.end_time)
                    .unwrap_or_else(|_| "—".to_string()),
                status: Self::slot_status(slot, now),
            })
            .collect::<Vec<_>>();
        TodayScheduleCard { class_count: items.len(), items }
    }

    fn slot_status(slot: &ClassSlot, now: &str) -> SlotStatus {
        if slot.is_current {
            return SlotStatus::Current;
        }
        let (Ok(now_m), Ok(start_m), Ok(end_m)) = (
            time::to_minutes(now),
            time::to_minutes(&slot.start_time),
            time::to_minutes(&slot.end_time),
        ) else {
            return SlotStatus::Upcoming;
        };
        if now_m > end_m {
            SlotStatus::Completed
        } else if now_m < start_m {
            SlotStatus::Upcoming
        } else {
            SlotStatus::Current
        }
    }

    fn conflicts_card(facts: &[ConflictFact]) -> ConflictsCard {
        let line = |fact: &ConflictFact| ConflictLine {
            label: fact.kind.label().to_string(),
            description: fact.description.clone(),
            detected_at: fact.detected_at,
        };
        ConflictsCard {
            total: facts.len(),
            critical: facts
                .iter()
                .filter(|f| f.severity == Severity::Critical)
                .map(line)
                .collect(),
            warnings: facts
                .iter()
                .filter(|f| f.severity == Severity::Warning)
                .map(line)
                .collect(),
        }
    }

    fn completion_band(percentage: f64) -> CompletionBand {
        if percentage < COMPLETION_LOW_PCT {
            CompletionBand::Low
        } else if percentage < COMPLETION_MEDIUM_PCT {
            CompletionBand::Medium
        } else {
            CompletionBand::High
        }
    }
}

#[cfg(test)]
mod tests {
    use horario_domain::types::conflict::ConflictType;
    use horario_domain::types::dashboard::{PlatformOverview, SectionCompletion};
    use horario_domain::types::workload::{AlertType, TeacherAlert, WorkloadStatus};

    use super::*;

    fn slot(subject: &str, start: &str, end: &str) -> ClassSlot {
        ClassSlot {
            assignment_id: Some(1),
            subject: subject.to_string(),
            section: "1er Año A".to_string(),
            classroom: "Aula 1".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            is_current: false,
            is_next: false,
        }
    }

    #[test]
    fn empty_payload_renders_placeholders_everywhere() {
        let view = DashboardComposer::compose_teacher(&TeacherDashboard::default(), "10:00");
        assert!(view.current_class.is_placeholder());
        assert!(view.next_class.is_placeholder());
        assert!(view.today.is_placeholder());
        assert!(view.workload.is_placeholder());
        assert!(view.conflicts.is_placeholder());
        assert_eq!(view.teacher_name, "Docente");
    }

    #[test]
    fn current_class_progress_and_ending_soon() {
        let payload = TeacherDashboard {
            current_class: Some(slot("MATEMÁTICAS", "07:00", "07:40")),
            ..Default::default()
        };
        let view = DashboardComposer::compose_teacher(&payload, "07:38");
        let card = view.current_class.as_present().unwrap();
        assert!(card.progress_pct > 90.0);
        assert!(card.ending_soon);
        assert_eq!(card.time_range, "07:00 - 07:40");
    }

    #[test]
    fn next_class_countdown() {
        let payload = TeacherDashboard {
            next_class: Some(slot("QUÍMICA", "09:20", "10:00")),
            ..Default::default()
        };
        let view = DashboardComposer::compose_teacher(&payload, "09:05");
        let card = view.next_class.as_present().unwrap();
        assert_eq!(card.time_until, "15 min");
    }

    #[test]
    fn today_items_carry_status_relative_to_now() {
        let payload = TeacherDashboard {
            today_schedule: Some(vec![
                slot("MATEMÁTICAS", "07:00", "07:40"),
                slot("QUÍMICA", "07:40", "08:20"),
                slot("FÍSICA", "09:20", "10:00"),
            ]),
            ..Default::default()
        };
        let view = DashboardComposer::compose_teacher(&payload, "08:00");
        let card = view.today.as_present().unwrap();
        assert_eq!(card.class_count, 3);
        assert_eq!(card.items[0].status, SlotStatus::Completed);
        assert_eq!(card.items[1].status, SlotStatus::Current);
        assert_eq!(card.items[2].status, SlotStatus::Upcoming);
        assert_eq!(card.items[0].duration, "40 min");
    }

    #[test]
    fn workload_card_classifies_hours() {
        let payload = TeacherDashboard {
            workload_status: Some(WorkloadStatus {
                current_hours: 42.0,
                max_hours: Some(40.0),
                weekly_classes: 21,
                subjects_count: 3,
                sections_count: 4,
                is_valid: Some(false),
            }),
            ..Default::default()
        };
        let view = DashboardComposer::compose_teacher(&payload, "10:00");
        let card = view.workload.as_present().unwrap();
        assert_eq!(card.percentage, 105.0);
        assert_eq!(card.status_label, "Sobrecargado");
        assert_eq!(card.weekly_classes, 21);
    }

    #[test]
    fn conflicts_split_by_severity_with_translated_labels() {
        let facts = vec![
            ConflictFact {
                id: None,
                kind: ConflictType::TeacherDoubleBooking,
                severity: Severity::Critical,
                description: "doble".to_string(),
                assignment_id: None,
                detected_at: None,
            },
            ConflictFact {
                id: None,
                kind: ConflictType::WorkloadViolation,
                severity: Severity::Warning,
                description: "carga".to_string(),
                assignment_id: None,
                detected_at: None,
            },
        ];
        let payload = TeacherDashboard { conflicts: Some(facts), ..Default::default() };
        let view = DashboardComposer::compose_teacher(&payload, "10:00");
        let card = view.conflicts.as_present().unwrap();
        assert_eq!(card.total, 2);
        assert_eq!(card.critical[0].label, "Profesor Duplicado");
        assert_eq!(card.warnings[0].label, "Violación de Carga");
    }

    #[test]
    fn admin_view_composes_overview_and_completion_bands() {
        let payload = AdminDashboard {
            platform_overview: Some(PlatformOverview {
                total_assignments: 120,
                total_conflicts: 6,
                critical_conflicts: 2,
                conflict_rate: 5.0,
            }),
            schedule_completion: Some(vec![
                SectionCompletion {
                    section_name: "1er Año A".to_string(),
                    assignments_count: 12,
                    completion_percentage: 30.0,
                },
                SectionCompletion {
                    section_name: "2do Año B".to_string(),
                    assignments_count: 38,
                    completion_percentage: 95.0,
                },
            ]),
            teacher_alerts: Some(vec![TeacherAlert {
                teacher_id: 1,
                teacher_name: "MARIA NIETO".to_string(),
                alert_type: AlertType::Overloaded,
                current_hours: 44.0,
                max_hours: 40.0,
                excess_hours: Some(4.0),
                severity: Some(Severity::Critical),
            }]),
            ..Default::default()
        };

        let view = DashboardComposer::compose_admin(&payload);
        let overview = view.overview.as_present().unwrap();
        assert_eq!(overview.total_assignments, 120);

        let completion = view.completion.as_present().unwrap();
        assert_eq!(completion.sections[0].band, CompletionBand::Low);
        assert_eq!(completion.sections[1].band, CompletionBand::High);

        let alerts = view.teacher_alerts.as_present().unwrap();
        assert_eq!(alerts.alerts[0].alert_label, "Sobrecargado");
        assert!(view.critical_conflicts.is_placeholder());
    }
}
