//! Application utilities

pub mod logging;

pub use logging::{init_tracing, log_command_execution};

use chrono::Utc;
use chrono_tz::America::Caracas;

/// Current wall-clock time in the fixed local convention, as an "HH:MM"
/// label. The only place the system clock enters the time arithmetic.
pub fn local_time_hhmm() -> String {
    Utc::now().with_timezone(&Caracas).format("%H:%M").to_string()
}

/// Today's date in the fixed local convention.
pub fn local_date() -> chrono::NaiveDate {
    Utc::now().with_timezone(&Caracas).date_naive()
}
