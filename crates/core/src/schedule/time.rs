//! Time arithmetic for "HH:MM" wall-clock labels
//!
//! All functions are pure and take the current time as an argument, so tests
//! can inject any instant. Labels follow the fixed 24-hour local convention
//! (America/Caracas); nothing here touches the system clock.

use horario_domain::constants::ENDING_SOON_PCT;
use horario_domain::{HorarioError, Result};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Convert an "HH:MM" label to minutes since midnight.
pub fn to_minutes(time: &str) -> Result<i64> {
    let (hours, minutes) = time
        .split_once(':')
        .ok_or_else(|| HorarioError::InvalidInput(format!("malformed time label: {time}")))?;

    let hours: i64 = hours
        .parse()
        .map_err(|_| HorarioError::InvalidInput(format!("malformed time label: {time}")))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|_| HorarioError::InvalidInput(format!("malformed time label: {time}")))?;

    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(HorarioError::InvalidInput(format!("time label out of range: {time}")));
    }

    Ok(hours * 60 + minutes)
}

/// Minutes between two labels on the same day. Negative when `end` precedes
/// `start`.
pub fn duration_minutes(start: &str, end: &str) -> Result<i64> {
    Ok(to_minutes(end)? - to_minutes(start)?)
}

/// Render a minute count the way the dashboard shows durations:
/// `"40 min"`, `"1h"`, `"1h 20m"`.
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// Human-readable duration between two labels.
pub fn format_duration(start: &str, end: &str) -> Result<String> {
    Ok(format_minutes(duration_minutes(start, end)?.max(0)))
}

/// Elapsed percentage of a class at `now`, clamped to [0, 100].
///
/// Returns 0 whenever `now` falls outside [start, end].
pub fn progress(start: &str, end: &str, now: &str) -> Result<f64> {
    let start_m = to_minutes(start)?;
    let end_m = to_minutes(end)?;
    let now_m = to_minutes(now)?;

    if now_m < start_m || now_m > end_m {
        return Ok(0.0);
    }
    if end_m == start_m {
        return Ok(100.0);
    }

    let elapsed = (now_m - start_m) as f64;
    let total = (end_m - start_m) as f64;
    Ok((elapsed / total * 100.0).clamp(0.0, 100.0))
}

/// A class past 90% elapsed is flagged so the view can pulse it.
pub fn is_ending_soon(progress_pct: f64) -> bool {
    progress_pct > ENDING_SOON_PCT
}

/// Countdown from `now` to `target`, rolling to the next day when the target
/// already passed. Under an hour renders as `"N min"`, otherwise `"Hh Mm"`.
pub fn time_until(target: &str, now: &str) -> Result<String> {
    let target_m = to_minutes(target)?;
    let now_m = to_minutes(now)?;

    let mut diff = target_m - now_m;
    if diff < 0 {
        diff += MINUTES_PER_DAY;
    }

    if diff < 60 {
        Ok(format!("{diff} min"))
    } else {
        Ok(format!("{}h {}m", diff / 60, diff % 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_minutes_parses_labels() {
        assert_eq!(to_minutes("07:00").unwrap(), 420);
        assert_eq!(to_minutes("14:20").unwrap(), 860);
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
    }

    #[test]
    fn to_minutes_rejects_garbage() {
        assert!(to_minutes("0700").is_err());
        assert!(to_minutes("25:00").is_err());
        assert!(to_minutes("07:61").is_err());
        assert!(to_minutes("siete").is_err());
    }

    #[test]
    fn duration_of_a_teaching_period() {
        assert_eq!(duration_minutes("07:00", "07:40").unwrap(), 40);
        assert_eq!(format_duration("07:00", "07:40").unwrap(), "40 min");
        assert_eq!(format_duration("07:00", "08:00").unwrap(), "1h");
        assert_eq!(format_duration("07:00", "08:20").unwrap(), "1h 20m");
    }

    #[test]
    fn progress_zero_outside_range() {
        assert_eq!(progress("07:00", "07:40", "06:59").unwrap(), 0.0);
        assert_eq!(progress("07:00", "07:40", "07:41").unwrap(), 0.0);
    }

    #[test]
    fn progress_monotonic_within_range() {
        let mut last = -1.0;
        for minute in 0..=40 {
            let now = format!("07:{minute:02}");
            let p = progress("07:00", "07:40", &now).unwrap();
            assert!(p >= last, "progress regressed at {now}");
            last = p;
        }
        assert_eq!(progress("07:00", "07:40", "07:00").unwrap(), 0.0);
        assert_eq!(progress("07:00", "07:40", "07:20").unwrap(), 50.0);
        assert_eq!(progress("07:00", "07:40", "07:40").unwrap(), 100.0);
    }

    #[test]
    fn ending_soon_past_ninety_percent() {
        assert!(!is_ending_soon(90.0));
        assert!(is_ending_soon(90.1));
        let p = progress("07:00", "07:40", "07:37").unwrap();
        assert!(is_ending_soon(p));
    }

    #[test]
    fn time_until_same_day() {
        assert_eq!(time_until("07:00", "06:45").unwrap(), "15 min");
        assert_eq!(time_until("09:20", "07:00").unwrap(), "2h 20m");
    }

    #[test]
    fn time_until_rolls_past_target_to_next_day() {
        // 07:15 -> next day's 07:00 is 23h45m away
        assert_eq!(time_until("07:00", "07:15").unwrap(), "23h 45m");
        assert_eq!(time_until("07:00", "07:00").unwrap(), "0 min");
    }
}
