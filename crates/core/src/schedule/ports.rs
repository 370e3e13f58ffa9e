//! Port interfaces for schedule mutation and retrieval
//!
//! These traits define the boundaries between core business logic and the
//! backend adapters. Mutations never write the grid directly; callers
//! trigger a refresh after a successful mutation.

use async_trait::async_trait;
use horario_domain::types::schedule::{Assignment, NewAssignment, WeekSchedule};
use horario_domain::Result;

/// Backend access for weekly schedules and grid assignments.
#[async_trait]
pub trait AssignmentGateway: Send + Sync {
    /// Fetch the raw weekly payload for a section.
    async fn fetch_week(&self, section_id: i64) -> Result<WeekSchedule>;

    /// Fetch a single assignment by id.
    async fn fetch_assignment(&self, id: i64) -> Result<Assignment>;

    /// Create an assignment, optionally with server-side conflict validation.
    async fn create_assignment(&self, request: &NewAssignment) -> Result<Assignment>;

    /// Remove an assignment.
    async fn remove_assignment(&self, id: i64) -> Result<()>;
}
