//! Conflict overlay over the weekly grid
//!
//! The overlay is recomputed in full on each refresh and replaces the prior
//! one atomically; it never merges incrementally, so stale facts cannot
//! leak across poll cycles.

use std::collections::{HashMap, HashSet};

use horario_domain::types::conflict::{ConflictFact, ConflictType, Severity};

use super::grid::ScheduleGrid;

/// Conflict marker attached to a single grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellConflict {
    pub kind: ConflictType,
    pub severity: Severity,
    pub description: String,
}

/// Per-cell conflict flags plus the dashboard-level remainder.
#[derive(Debug, Clone, Default)]
pub struct ConflictOverlay {
    by_assignment: HashMap<i64, CellConflict>,
    global: Vec<ConflictFact>,
    unresolved: Vec<ConflictFact>,
    total: usize,
}

impl ConflictOverlay {
    /// Merge conflict facts onto the grid.
    ///
    /// When several facts target the same assignment the first one in array
    /// order wins. Facts referencing assignments not on the grid are held as
    /// unresolved until the next refresh; unattached facts surface only at
    /// the summary level.
    pub fn compute(grid: &ScheduleGrid, facts: &[ConflictFact]) -> Self {
        let placed: HashSet<i64> = grid.assignment_ids().collect();

        let mut overlay = Self { total: facts.len(), ..Default::default() };
        for fact in facts {
            match fact.assignment_id {
                Some(id) if placed.contains(&id) => {
                    overlay.by_assignment.entry(id).or_insert_with(|| CellConflict {
                        kind: fact.kind.clone(),
                        severity: fact.severity,
                        description: fact.description.clone(),
                    });
                }
                Some(_) => overlay.unresolved.push(fact.clone()),
                None => overlay.global.push(fact.clone()),
            }
        }

        overlay
    }

    /// The conflict attached to an assignment's cell, if any.
    pub fn cell_conflict(&self, assignment_id: i64) -> Option<&CellConflict> {
        self.by_assignment.get(&assignment_id)
    }

    pub fn has_conflict(&self, assignment_id: i64) -> bool {
        self.by_assignment.contains_key(&assignment_id)
    }

    /// Facts with no assignment reference, for the dashboard summary.
    pub fn global_facts(&self) -> &[ConflictFact] {
        &self.global
    }

    /// Facts whose assignment reference was not found on the current grid.
    pub fn unresolved_facts(&self) -> &[ConflictFact] {
        &self.unresolved
    }

    /// Total facts received in the last refresh, attached or not.
    pub fn total_facts(&self) -> usize {
        self.total
    }

    /// Number of cells currently flagged.
    pub fn flagged_cells(&self) -> usize {
        self.by_assignment.len()
    }
}
