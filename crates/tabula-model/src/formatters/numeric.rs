use tabula_format::{
    duration_minutes, format_duration, format_integer, format_number, format_plain, DistanceUnit,
};

use crate::{formatter_fn, Cell, FormatterConfig, OutputChannel, SharedFormatter, UserContext};

pub fn id(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, _channel, _ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        Cell::Text(value.as_i64().to_string())
    })
}

pub fn integer(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        let n = value.as_i64();
        if channel.is_display() {
            Cell::Text(format_integer(n, ctx.locale))
        } else {
            Cell::Text(n.to_string())
        }
    })
}

pub fn float(config: &FormatterConfig) -> SharedFormatter {
    let decimals = config.decimals;
    formatter_fn(move |value, _row, channel, ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        Cell::Text(render(value.as_f64(), decimals, channel, ctx, None))
    })
}

/// Values are already in percent units (`12.5` renders as `12.5 %`).
pub fn percent(config: &FormatterConfig) -> SharedFormatter {
    let decimals = config.decimals;
    formatter_fn(move |value, _row, channel, ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        Cell::Text(render(value.as_f64(), decimals, channel, ctx, Some("%")))
    })
}

/// Seconds as `HH:MM` for display, whole minutes for export.
pub fn duration(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, _ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        let seconds = value.as_i64();
        if channel.is_display() {
            Cell::Text(format_duration(seconds))
        } else {
            Cell::Text(
                duration_minutes(seconds)
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
            )
        }
    })
}

/// Kilometers converted to the user's distance unit.
///
/// With `unit_field` set, a parseable unit in that field of the same row wins over the user
/// preference.
pub fn distance(config: &FormatterConfig) -> SharedFormatter {
    let decimals = config.decimals;
    let unit_field = config.unit_field.clone();
    formatter_fn(move |value, row, channel, ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        let unit = unit_field
            .as_deref()
            .and_then(|field| {
                let name = row.get_text(field);
                let parsed = DistanceUnit::parse(&name);
                if parsed.is_none() && !name.is_empty() {
                    log::debug!("ignoring unknown distance unit override {name:?}");
                }
                parsed
            })
            .unwrap_or(ctx.distance_unit);
        let converted = unit.convert(value.as_f64());
        Cell::Text(render(converted, decimals, channel, ctx, Some(unit.suffix())))
    })
}

/// km/h converted to the user's speed unit.
pub fn speed(config: &FormatterConfig) -> SharedFormatter {
    let decimals = config.decimals;
    formatter_fn(move |value, _row, channel, ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        let unit = ctx.speed_unit;
        let converted = unit.convert(value.as_f64());
        Cell::Text(render(converted, decimals, channel, ctx, Some(unit.suffix())))
    })
}

/// Bar converted to the user's pressure unit.
pub fn pressure(config: &FormatterConfig) -> SharedFormatter {
    let decimals = config.decimals;
    formatter_fn(move |value, _row, channel, ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        let unit = ctx.pressure_unit;
        let converted = unit.convert(value.as_f64());
        Cell::Text(render(converted, decimals, channel, ctx, Some(unit.suffix())))
    })
}

/// Display channels: grouped, localized, suffixed. Export channels: plain fixed decimals.
fn render(
    value: f64,
    decimals: usize,
    channel: OutputChannel,
    ctx: &UserContext,
    suffix: Option<&str>,
) -> String {
    if !channel.is_display() {
        return format_plain(value, decimals);
    }
    let number = format_number(value, decimals, ctx.locale);
    match suffix {
        Some(suffix) => format!("{number} {suffix}"),
        None => number,
    }
}
