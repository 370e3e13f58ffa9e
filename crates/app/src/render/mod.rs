//! Text renderer
//!
//! Pure functions from view-models to presentation strings. The composers
//! produce data; this module is the only place that turns it into text, so
//! the view-models stay testable without any rendering environment.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use horario_core::dashboard::viewmodel::{
    AdminDashboardView, CardView, CompletionBand, SlotStatus, TeacherDashboardView,
};
use horario_core::schedule::grid::ScheduleGrid;
use horario_core::schedule::overlay::ConflictOverlay;
use horario_core::wizard::progress::PollingFrame;
use horario_domain::types::optimize::{OptimizationOutcome, PreviewAssignment};
use horario_domain::types::schedule::{Weekday, PERIODS};

fn card_body<T>(card: &CardView<T>, mut present: impl FnMut(&T) -> String) -> String {
    match card {
        CardView::Present(data) => present(data),
        CardView::Placeholder(message) => format!("  {message}\n"),
    }
}

/// Render the teacher dashboard.
pub fn render_teacher_dashboard(view: &TeacherDashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Panel del Docente — {}", view.teacher_name);

    out.push_str("\nClase Actual\n");
    out.push_str(&card_body(&view.current_class, |card| {
        let ending = if card.ending_soon { "  [por terminar]" } else { "" };
        format!(
            "  {} · {} · {} ({})\n  progreso {:.0}%{}\n",
            card.subject, card.section, card.classroom, card.time_range, card.progress_pct, ending
        )
    }));

    out.push_str("\nPróxima Clase\n");
    out.push_str(&card_body(&view.next_class, |card| {
        format!(
            "  {} · {} · {} ({})\n  comienza en {}\n",
            card.subject, card.section, card.classroom, card.time_range, card.time_until
        )
    }));

    out.push_str("\nHorario de Hoy\n");
    out.push_str(&card_body(&view.today, |card| {
        if card.items.is_empty() {
            return "  No hay clases programadas para hoy\n".to_string();
        }
        let mut body = String::new();
        for item in &card.items {
            let marker = match item.status {
                SlotStatus::Current => ">",
                SlotStatus::Completed => "x",
                SlotStatus::Upcoming => " ",
            };
            let _ = writeln!(
                body,
                "  {marker} {} {} · {} · {} ({})",
                item.start_time, item.subject, item.section, item.classroom, item.duration
            );
        }
        body
    }));

    out.push_str("\nCarga Horaria\n");
    out.push_str(&card_body(&view.workload, |card| {
        format!(
            "  {:.0}/{:.0} horas ({:.1}%) — {}\n  clases {} · materias {} · secciones {}\n",
            card.current_hours,
            card.max_hours,
            card.percentage,
            card.status_label,
            card.weekly_classes,
            card.subjects_count,
            card.sections_count
        )
    }));

    out.push_str("\nConflictos\n");
    out.push_str(&card_body(&view.conflicts, |card| {
        if card.total == 0 {
            return "  Sin conflictos detectados\n".to_string();
        }
        let mut body = String::new();
        for line in &card.critical {
            let _ = writeln!(body, "  [crítico] {}: {}", line.label, line.description);
        }
        for line in &card.warnings {
            let _ = writeln!(body, "  [aviso] {}: {}", line.label, line.description);
        }
        body
    }));

    out
}

/// Render the administrator dashboard.
pub fn render_admin_dashboard(view: &AdminDashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Panel Administrativo — {}", view.admin_name);

    out.push_str("\nResumen General\n");
    out.push_str(&card_body(&view.overview, |card| {
        format!(
            "  asignaciones {} · conflictos {} · críticos {} · tasa {:.1}%\n",
            card.total_assignments,
            card.total_conflicts,
            card.critical_conflicts,
            card.conflict_rate
        )
    }));

    out.push_str("\nConflictos Críticos\n");
    out.push_str(&card_body(&view.critical_conflicts, |card| {
        if card.critical.is_empty() {
            return "  No hay conflictos críticos\n".to_string();
        }
        let mut body = String::new();
        for line in &card.critical {
            let _ = writeln!(body, "  {}: {}", line.label, line.description);
        }
        body
    }));

    out.push_str("\nAlertas de Profesores\n");
    out.push_str(&card_body(&view.teacher_alerts, |card| {
        if card.alerts.is_empty() {
            return "  Todos los profesores dentro de límites normales\n".to_string();
        }
        let mut body = String::new();
        for alert in &card.alerts {
            let excess = alert
                .excess_hours
                .map(|h| format!(" (+{h:.0}h)"))
                .unwrap_or_default();
            let _ = writeln!(
                body,
                "  {} — {} {:.0}/{:.0}h{}",
                alert.teacher_name, alert.alert_label, alert.current_hours, alert.max_hours, excess
            );
        }
        body
    }));

    out.push_str("\nCompletitud de Horarios\n");
    out.push_str(&card_body(&view.completion, |card| {
        let mut body = String::new();
        for section in &card.sections {
            let band = match section.band {
                CompletionBand::Low => "baja",
                CompletionBand::Medium => "media",
                CompletionBand::High => "alta",
            };
            let _ = writeln!(
                body,
                "  {} — {} asignaciones · {:.0}% ({band})",
                section.section_name, section.assignments_count, section.percentage
            );
        }
        body
    }));

    out
}

/// Render the weekly grid as a text table, with conflict markers from the
/// overlay.
pub fn render_grid(grid: &ScheduleGrid, overlay: &ConflictOverlay) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<14}", "HORA");
    for day in Weekday::ALL {
        let _ = write!(out, "{:<24}", day.label().to_uppercase());
    }
    out.push('\n');

    for period in &PERIODS {
        let _ = write!(out, "{:<6}{:<8}", period.label, format!("{}-{}", period.start, period.end));
        if period.is_break {
            for _ in Weekday::ALL {
                let _ = write!(out, "{:<24}", "· RECREO ·");
            }
        } else {
            for day in Weekday::ALL {
                let cell = match grid.cell_at(day, period) {
                    Some(assignment) => {
                        let marker =
                            if overlay.has_conflict(assignment.id) { " (!)" } else { "" };
                        format!("{}{}", assignment.subject, marker)
                    }
                    None => "—".to_string(),
                };
                let _ = write!(out, "{:<24}", cell);
            }
        }
        out.push('\n');
    }

    out
}

/// One line of the polling animation.
pub fn render_polling_frame(frame: &PollingFrame) -> String {
    format!(
        "optimizando… {:.0}% · generación {} · mejor aptitud {:.3}",
        frame.progress, frame.generation, frame.best_fitness
    )
}

/// Render optimization results: summary, violations and the period×day
/// preview grid.
pub fn render_optimization_results(
    outcome: &OptimizationOutcome,
    preview: &BTreeMap<(String, String), Vec<&PreviewAssignment>>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Resultado: aptitud {:.3} · {} asignaciones",
        outcome.fitness_score, outcome.schedule_count
    );

    if outcome.violations.is_empty() {
        out.push_str("Sin violaciones — horario perfecto\n");
    } else {
        out.push_str("Violaciones:\n");
        for violation in &outcome.violations {
            let _ = writeln!(out, "  - {violation}");
        }
    }

    if !preview.is_empty() {
        out.push_str("\nVista previa (período × día):\n");
        for ((period, day), assignments) in preview {
            for assignment in assignments {
                let _ = writeln!(
                    out,
                    "  {period} / {day}: {} · {} · {} ({})",
                    assignment.subject, assignment.teacher, assignment.section,
                    assignment.classroom
                );
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use horario_core::dashboard::DashboardComposer;
    use horario_domain::types::dashboard::{ClassSlot, TeacherDashboard};

    use super::*;

    #[test]
    fn teacher_dashboard_renders_placeholders() {
        let view = DashboardComposer::compose_teacher(&TeacherDashboard::default(), "10:00");
        let text = render_teacher_dashboard(&view);
        assert!(text.contains("No hay clase en este momento"));
        assert!(text.contains("No hay más clases hoy"));
        assert!(text.contains("Sin datos de carga horaria"));
    }

    #[test]
    fn teacher_dashboard_renders_current_class_progress() {
        let payload = TeacherDashboard {
            teacher_name: Some("María".to_string()),
            current_class: Some(ClassSlot {
                assignment_id: Some(1),
                subject: "MATEMÁTICAS".to_string(),
                section: "1er Año A".to_string(),
                classroom: "Aula 1".to_string(),
                start_time: "07:00".to_string(),
                end_time: "07:40".to_string(),
                is_current: true,
                is_next: false,
            }),
            ..Default::default()
        };
        let view = DashboardComposer::compose_teacher(&payload, "07:20");
        let text = render_teacher_dashboard(&view);
        assert!(text.contains("Panel del Docente — María"));
        assert!(text.contains("MATEMÁTICAS"));
        assert!(text.contains("progreso 50%"));
    }

    #[test]
    fn grid_renders_breaks_and_conflict_markers() {
        use horario_domain::types::conflict::{ConflictFact, ConflictType, Severity};
        use horario_domain::types::schedule::{Assignment, WeekSchedule};

        let mut by_period = BTreeMap::new();
        by_period.insert(
            "P1".to_string(),
            Assignment {
                id: 42,
                subject: "MATEMÁTICAS".to_string(),
                teacher: String::new(),
                section: String::new(),
                classroom: String::new(),
                day_of_week: None,
                time_period: None,
                is_active: true,
            },
        );
        let mut schedule = BTreeMap::new();
        schedule.insert("lunes".to_string(), by_period);
        let grid = ScheduleGrid::from_week(&WeekSchedule { schedule, ..Default::default() });

        let overlay = ConflictOverlay::compute(
            &grid,
            &[ConflictFact {
                id: None,
                kind: ConflictType::TeacherDoubleBooking,
                severity: Severity::Critical,
                description: "doble".to_string(),
                assignment_id: Some(42),
                detected_at: None,
            }],
        );

        let text = render_grid(&grid, &overlay);
        assert!(text.contains("MATEMÁTICAS (!)"));
        assert!(text.contains("RECREO"));
        assert!(text.contains("LUNES"));
        assert!(text.contains("MIÉRCOLES"));
    }

    #[test]
    fn results_render_success_message_for_empty_violations() {
        let outcome = OptimizationOutcome {
            success: true,
            fitness_score: 0.91,
            schedule_count: 48,
            ..Default::default()
        };
        let text = render_optimization_results(&outcome, &BTreeMap::new());
        assert!(text.contains("aptitud 0.910"));
        assert!(text.contains("Sin violaciones"));
    }
}
