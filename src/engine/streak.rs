use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreakUpdate {
    pub days: u32,
    pub best: u32,
    /// True when this observation moved the streak counter (first entry of
    /// a new day). Repeat completions on the same day leave it false.
    pub extended: bool,
}

/// Fold one practice day into the streak counters.
///
/// Same day: no change. Day after the last entry: streak grows by one.
/// Any gap (or a clock that went backwards): streak resets to 1.
pub fn observe(
    last_day: Option<NaiveDate>,
    days: u32,
    best: u32,
    today: NaiveDate,
) -> StreakUpdate {
    let (new_days, extended) = match last_day {
        Some(last) if last == today => (days, false),
        Some(last) if (today - last).num_days() == 1 => (days + 1, true),
        _ => (1, true),
    };
    StreakUpdate {
        days: new_days,
        best: best.max(new_days),
        extended,
    }
}

/// Parse the stored `YYYY-MM-DD` practice date, ignoring garbage.
pub fn parse_day(stored: Option<&str>) -> Option<NaiveDate> {
    stored.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_first_completion_starts_streak() {
        let up = observe(None, 0, 0, d("2026-03-01"));
        assert_eq!(up.days, 1);
        assert_eq!(up.best, 1);
        assert!(up.extended);
    }

    #[test]
    fn test_same_day_does_not_advance() {
        let up = observe(Some(d("2026-03-01")), 3, 5, d("2026-03-01"));
        assert_eq!(up.days, 3);
        assert_eq!(up.best, 5);
        assert!(!up.extended);
    }

    #[test]
    fn test_next_day_extends() {
        let up = observe(Some(d("2026-03-01")), 3, 3, d("2026-03-02"));
        assert_eq!(up.days, 4);
        assert_eq!(up.best, 4);
        assert!(up.extended);
    }

    #[test]
    fn test_gap_resets_but_keeps_best() {
        let up = observe(Some(d("2026-03-01")), 9, 9, d("2026-03-05"));
        assert_eq!(up.days, 1);
        assert_eq!(up.best, 9);
    }

    #[test]
    fn test_month_boundary_counts_as_consecutive() {
        let up = observe(Some(d("2026-02-28")), 1, 1, d("2026-03-01"));
        assert_eq!(up.days, 2);
    }

    #[test]
    fn test_clock_gone_backwards_resets() {
        let up = observe(Some(d("2026-03-05")), 6, 6, d("2026-03-01"));
        assert_eq!(up.days, 1);
        assert_eq!(up.best, 6);
    }

    #[test]
    fn test_parse_day_round_trip() {
        let day = d("2026-08-07");
        assert_eq!(parse_day(Some(&format_day(day))), Some(day));
        assert_eq!(parse_day(Some("not-a-date")), None);
        assert_eq!(parse_day(None), None);
    }
}
