//! Time formatting and clamping helpers shared by the builders and the
//! dashboard aggregator.

use chrono::{DateTime, Utc};

/// Format a minute count as "<h>h <m>m", omitting the hour component
/// when it would be zero.
pub fn format_minutes(min: i64) -> String {
    let h = min / 60;
    let m = min % 60;
    if h > 0 {
        format!("{}h {}m", h, m)
    } else {
        format!("{}m", m)
    }
}

/// Clock-face rendering used in derived titles, e.g. "9:00 AM".
pub fn format_clock(t: DateTime<Utc>) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Coerce a user-entered timestamp down to `now` so future events can
/// never be logged.
pub fn clamp_to_now(t: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if t > now {
        now
    } else {
        t
    }
}

/// Whole minutes between two instants, rounded to nearest.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    ((end - start).num_milliseconds() as f64 / 60_000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_minutes_omits_zero_hours() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(135), "2h 15m");
    }

    #[test]
    fn test_clamp_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 19, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2025, 6, 19, 9, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2025, 6, 19, 15, 0, 0).unwrap();
        assert_eq!(clamp_to_now(past, now), past);
        assert_eq!(clamp_to_now(future, now), now);
    }

    #[test]
    fn test_minutes_between_rounds() {
        let start = Utc.with_ymd_and_hms(2025, 6, 19, 9, 0, 0).unwrap();
        let end = start + chrono::Duration::seconds(30 * 60 + 29);
        assert_eq!(minutes_between(start, end), 30);
        let end = start + chrono::Duration::seconds(30 * 60 + 31);
        assert_eq!(minutes_between(start, end), 31);
    }
}
