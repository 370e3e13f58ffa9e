//! The canonical day × period grid and its payload mapping
//!
//! The grid is rebuilt wholesale from every refresh payload; there is no
//! incremental patching. Break slots never hold an assignment, even when a
//! payload erroneously supplies one.

use horario_domain::types::schedule::{Assignment, Period, WeekSchedule, Weekday, PERIODS};
use tracing::debug;

const SLOT_COUNT: usize = Weekday::ALL.len() * PERIODS.len();

/// One (day, period, assignment) triple produced by [`ScheduleGrid::cells`].
#[derive(Debug, Clone, Copy)]
pub struct GridCell<'a> {
    pub day: Weekday,
    pub period: &'static Period,
    pub assignment: Option<&'a Assignment>,
}

/// The 5 × 12 weekly grid with at most one active assignment per cell.
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    cells: Vec<Option<Assignment>>,
}

impl Default for ScheduleGrid {
    fn default() -> Self {
        Self { cells: (0..SLOT_COUNT).map(|_| None).collect() }
    }
}

impl ScheduleGrid {
    /// Build the grid from a raw backend payload keyed by day then period.
    ///
    /// Unknown day or period keys and inactive assignments are skipped;
    /// entries on break slots are ignored.
    pub fn from_week(week: &WeekSchedule) -> Self {
        let mut grid = Self::default();

        for (day_key, by_period) in &week.schedule {
            let Some(day) = Weekday::from_key(day_key) else {
                debug!(day = %day_key, "ignoring unknown day key in schedule payload");
                continue;
            };

            for (period_key, assignment) in by_period {
                let Some(period) = Period::from_key(period_key) else {
                    debug!(period = %period_key, "ignoring unknown period key in schedule payload");
                    continue;
                };
                if period.is_break {
                    debug!(period = %period_key, "ignoring assignment on break slot");
                    continue;
                }
                if !assignment.is_active {
                    continue;
                }

                grid.cells[Self::slot_index(day, period)] = Some(assignment.clone());
            }
        }

        grid
    }

    /// The active assignment at (day, period), if any. Break slots are
    /// always empty.
    pub fn cell_at(&self, day: Weekday, period: &Period) -> Option<&Assignment> {
        if period.is_break {
            return None;
        }
        self.cells[Self::slot_index(day, period)].as_ref()
    }

    /// Like [`Self::cell_at`] but addressed by period key.
    pub fn cell_at_key(&self, day: Weekday, period_key: &str) -> Option<&Assignment> {
        Period::from_key(period_key).and_then(|period| self.cell_at(day, period))
    }

    /// All 60 cells in fixed day-then-period order. The iterator is lazy,
    /// finite and restartable: call again for a fresh pass.
    pub fn cells(&self) -> impl Iterator<Item = GridCell<'_>> + '_ {
        Weekday::ALL.into_iter().flat_map(move |day| {
            PERIODS.iter().map(move |period| GridCell {
                day,
                period,
                assignment: self.cell_at(day, period),
            })
        })
    }

    /// Number of occupied cells.
    pub fn assignment_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment_count() == 0
    }

    /// Ids of every active assignment currently placed on the grid.
    pub fn assignment_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.cells.iter().flatten().map(|a| a.id)
    }

    fn slot_index(day: Weekday, period: &Period) -> usize {
        day.index() * PERIODS.len() + period.index()
    }
}
