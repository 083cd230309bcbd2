//! Clock-face formatting and the break-duration rule.

/// Work-to-break ratio of the Flowmodoro technique.
pub const BREAK_RATIO: u64 = 5;

/// Shortest break ever granted, in milliseconds.
pub const MIN_BREAK_MS: u64 = 1000;

/// Break earned by `work_ms` of work: one fifth, floored, at least one second.
pub const fn break_duration_for(work_ms: u64) -> u64 {
    let earned = work_ms / BREAK_RATIO;
    if earned < MIN_BREAK_MS {
        MIN_BREAK_MS
    } else {
        earned
    }
}

/// `MM:SS` under one hour, `HH:MM:SS` from one hour on. Floors to whole seconds.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Parse a string produced by [`format_clock`] back into milliseconds.
///
/// Accepts `MM:SS` and `HH:MM:SS`. Minutes and seconds above 59 are rejected
/// in the three-part form; the two-part form allows any minute count.
pub fn parse_clock(s: &str) -> Option<u64> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    let nums: Vec<u64> = parts
        .iter()
        .map(|p| {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                p.parse::<u64>().ok()
            }
        })
        .collect::<Option<_>>()?;

    let secs = match nums.as_slice() {
        [m, s] if *s < 60 => m.checked_mul(60)?.checked_add(*s)?,
        [h, m, s] if *m < 60 && *s < 60 => h
            .checked_mul(3600)?
            .checked_add(m * 60)?
            .checked_add(*s)?,
        _ => return None,
    };
    secs.checked_mul(1000)
}

/// Fraction of a countdown still left, clamped to `0.0..=1.0`.
pub fn progress_ratio(remaining_ms: u64, total_ms: u64) -> f64 {
    if total_ms == 0 {
        return 0.0;
    }
    (remaining_ms as f64 / total_ms as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_rule_examples() {
        assert_eq!(break_duration_for(4000), 1000);
        assert_eq!(break_duration_for(6000), 1200);
        assert_eq!(break_duration_for(500), 1000);
        assert_eq!(break_duration_for(0), 1000);
        assert_eq!(break_duration_for(25 * 60 * 1000), 5 * 60 * 1000);
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(999), "00:00");
        assert_eq!(format_clock(61_000), "01:01");
        assert_eq!(format_clock(3_599_999), "59:59");
        assert_eq!(format_clock(3_600_000), "01:00:00");
        assert_eq!(format_clock(3_661_000), "01:01:01");
    }

    #[test]
    fn parses_both_forms() {
        assert_eq!(parse_clock("00:00"), Some(0));
        assert_eq!(parse_clock("01:01"), Some(61_000));
        assert_eq!(parse_clock("01:01:01"), Some(3_661_000));
        assert_eq!(parse_clock(" 05:00 "), Some(300_000));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("5"), None);
        assert_eq!(parse_clock("aa:bb"), None);
        assert_eq!(parse_clock("01:60"), None);
        assert_eq!(parse_clock("1:2:3:4"), None);
        assert_eq!(parse_clock("-1:00"), None);
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(progress_ratio(1000, 1000), 1.0);
        assert_eq!(progress_ratio(500, 1000), 0.5);
        assert_eq!(progress_ratio(0, 1000), 0.0);
        assert_eq!(progress_ratio(2000, 1000), 1.0);
        assert_eq!(progress_ratio(10, 0), 0.0);
    }
}
