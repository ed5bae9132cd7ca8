use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{formatter_fn, Cell, FormatterConfig, SharedFormatter, UserContext, Value};

const ISO_DATE: &str = "%Y-%m-%d";
const ISO_DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar dates: locale pattern for display, `YYYY-MM-DD` for export.
///
/// Timestamps are shifted into the user's timezone before taking the date.
pub fn date(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, ctx| {
        let Some(date) = to_local_date(value, ctx) else {
            return Cell::empty();
        };
        let pattern = if channel.is_display() {
            ctx.locale.date_pattern()
        } else {
            ISO_DATE
        };
        Cell::Text(date.format(pattern).to_string())
    })
}

/// Timestamps in the user's timezone: `{locale date} HH:MM` for display,
/// `YYYY-MM-DD HH:MM:SS` for export.
pub fn date_time(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, ctx| {
        let Some(local) = to_local_date_time(value, ctx) else {
            return Cell::empty();
        };
        let rendered = if channel.is_display() {
            let pattern = format!("{} %H:%M", ctx.locale.date_pattern());
            local.format(&pattern).to_string()
        } else {
            local.format(ISO_DATE_TIME).to_string()
        };
        Cell::Text(rendered)
    })
}

fn to_local_date(value: &Value, ctx: &UserContext) -> Option<NaiveDate> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Text(s) => NaiveDate::parse_from_str(s.trim(), ISO_DATE)
            .ok()
            .or_else(|| to_local_date_time(value, ctx).map(|dt| dt.date())),
        _ => to_local_date_time(value, ctx).map(|dt| dt.date()),
    }
}

fn to_local_date_time(value: &Value, ctx: &UserContext) -> Option<NaiveDateTime> {
    let instant = match value {
        Value::DateTime(dt) => *dt,
        Value::Int(seconds) => DateTime::from_timestamp(*seconds, 0)?,
        Value::Text(s) => parse_instant(s.trim())?,
        // A bare date has no instant to shift; it is local midnight already.
        Value::Date(date) => return date.and_hms_opt(0, 0, 0),
        _ => return None,
    };
    Some(ctx.timezone.localize(instant).naive_local())
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` taken as UTC.
fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, ISO_DATE_TIME)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc())
}
