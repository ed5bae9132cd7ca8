use tabula_format::format_integer;

use crate::{formatter_fn, Cell, FormatterConfig, SharedFormatter, UserContext, Value};

/// Separator between the two values of a two-line field on export channels.
pub const SECONDARY_SEPARATOR: &str = " - ";

/// Join a two-line field for export: `primary - secondary`, or just `primary` when the
/// secondary is empty.
pub fn join_secondary(primary: &str, secondary: &str) -> String {
    if secondary.is_empty() {
        primary.to_string()
    } else {
        format!("{primary}{SECONDARY_SEPARATOR}{secondary}")
    }
}

/// Two text lines. The raw value must be a pair; anything else is the empty pair.
pub fn text2(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, _ctx| {
        let Some((first, second)) = value.as_pair() else {
            return empty_two_line(channel.is_display());
        };
        let (first, second) = (first.as_text(), second.as_text());
        if channel.is_display() {
            Cell::Pair(first, second)
        } else {
            Cell::Text(join_secondary(&first, &second))
        }
    })
}

/// A text line over an integer line. A zero integer is dropped on export.
pub fn text2_int(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, ctx| {
        let Some((first, second)) = value.as_pair() else {
            return empty_two_line(channel.is_display());
        };
        let primary = first.as_text();
        if channel.is_display() {
            Cell::Pair(primary, display_int(second, ctx))
        } else {
            Cell::Text(join_secondary(&primary, &export_int(second)))
        }
    })
}

/// Two integer lines. A zero secondary is dropped on export.
pub fn int2(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, ctx| {
        let Some((first, second)) = value.as_pair() else {
            return empty_two_line(channel.is_display());
        };
        if channel.is_display() {
            Cell::Pair(display_int(first, ctx), display_int(second, ctx))
        } else {
            let primary = if first.is_null() {
                String::new()
            } else {
                first.as_i64().to_string()
            };
            Cell::Text(join_secondary(&primary, &export_int(second)))
        }
    })
}

/// Any number of text lines. A single text value is one line; other shapes are no lines.
pub fn text_n(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, _channel, _ctx| match value {
        Value::List(items) => Cell::Lines(items.iter().map(Value::as_text).collect()),
        Value::Text(s) => Cell::Lines(vec![s.clone()]),
        _ => Cell::Lines(Vec::new()),
    })
}

fn empty_two_line(display: bool) -> Cell {
    if display {
        Cell::empty_pair()
    } else {
        Cell::empty()
    }
}

fn display_int(value: &Value, ctx: &UserContext) -> String {
    if value.is_null() {
        String::new()
    } else {
        format_integer(value.as_i64(), ctx.locale)
    }
}

/// Zero is the "no secondary" sentinel for integer lines.
fn export_int(value: &Value) -> String {
    match value.as_i64() {
        0 => String::new(),
        n => n.to_string(),
    }
}
