//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Workload classification
pub const DEFAULT_MAX_WEEKLY_HOURS: f64 = 40.0;
pub const OVERLOAD_THRESHOLD_PCT: f64 = 100.0;
pub const WARNING_THRESHOLD_PCT: f64 = 90.0;
pub const UNDERLOAD_THRESHOLD_PCT: f64 = 50.0;

// A class past this elapsed percentage is flagged as ending soon
pub const ENDING_SOON_PCT: f64 = 90.0;

// Refresh cadence
pub const DASHBOARD_REFRESH_SECS: u64 = 30;
pub const CLASS_PROGRESS_REFRESH_SECS: u64 = 5;

// Export wizard
pub const EXPORT_MILESTONE_DELAY_MS: u64 = 500;
pub const EXPORT_AUTO_CLOSE_DELAY_MS: u64 = 2000;
pub const DEFAULT_ACADEMIC_YEAR: &str = "2025-2026";

// Optimization progress animation
pub const POLLING_FRAME_INTERVAL_MS: u64 = 500;
pub const POLLING_PROGRESS_CAP_PCT: f64 = 95.0;

// Section completion buckets
pub const COMPLETION_LOW_PCT: f64 = 50.0;
pub const COMPLETION_MEDIUM_PCT: f64 = 80.0;
