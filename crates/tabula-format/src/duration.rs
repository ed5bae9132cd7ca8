const SECONDS_PER_DAY: i64 = 86_400;

/// Render a duration in seconds as `HH:MM`, or `{days}d HH:MM` from 24 hours on.
///
/// Seconds below a full minute are truncated. Negative durations render as an empty string.
pub fn format_duration(seconds: i64) -> String {
    if seconds < 0 {
        return String::new();
    }

    let days = seconds / SECONDS_PER_DAY;
    let rest = seconds % SECONDS_PER_DAY;
    let hours = rest / 3600;
    let minutes = (rest % 3600) / 60;

    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}")
    } else {
        format!("{hours:02}:{minutes:02}")
    }
}

/// Whole minutes in a duration, truncated. `None` for negative durations.
pub fn duration_minutes(seconds: i64) -> Option<i64> {
    (seconds >= 0).then_some(seconds / 60)
}
