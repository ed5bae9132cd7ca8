use std::sync::OnceLock;

use regex::Regex;

use crate::{formatter_fn, Cell, FormatterConfig, OutputChannel, SharedFormatter, Value};

pub fn text(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, _channel, _ctx| Cell::Text(value.as_text()))
}

/// Translated `true`/`false` labels on every channel.
pub fn boolean(config: &FormatterConfig) -> SharedFormatter {
    let true_label = config.true_label.clone();
    let false_label = config.false_label.clone();
    formatter_fn(move |value, _row, _channel, ctx| {
        if value.is_null() {
            return Cell::empty();
        }
        let key = if value.as_bool() {
            &true_label
        } else {
            &false_label
        };
        Cell::Text(ctx.translate(key))
    })
}

/// `(display, url)` for the Interactive channel, display text everywhere else.
///
/// A plain text value is both the display text and the target.
pub fn link(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, _ctx| {
        let (display, target) = match value {
            Value::Null => (String::new(), String::new()),
            Value::Pair(display, target) => (display.as_text(), target.as_text()),
            Value::Text(s) => (s.clone(), s.clone()),
            other => (other.as_text(), String::new()),
        };
        if channel == OutputChannel::Interactive {
            Cell::Pair(display, target)
        } else {
            Cell::Text(display)
        }
    })
}

/// The icon key for the Interactive channel (the UI maps it through the field descriptor);
/// the translated icon label, or the key, elsewhere.
pub fn icon(config: &FormatterConfig) -> SharedFormatter {
    let labels = config.icon_labels.clone();
    formatter_fn(move |value, _row, channel, ctx| {
        let key = value.as_text();
        if channel == OutputChannel::Interactive {
            return Cell::Text(key);
        }
        match labels.get(&key) {
            Some(label) => Cell::Text(ctx.translate(label)),
            None => Cell::Text(key),
        }
    })
}

pub fn buttons(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, _channel, _ctx| Cell::Text(value.as_text()))
}

/// Markup passes through to display channels and is stripped for export.
pub fn html(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, channel, _ctx| {
        let markup = value.as_text();
        if channel.is_export() {
            Cell::Text(strip_tags(&markup))
        } else {
            Cell::Text(markup)
        }
    })
}

pub fn input(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|value, _row, _channel, _ctx| Cell::Text(value.as_text()))
}

/// Group headers carry no per-row value.
pub fn header(_: &FormatterConfig) -> SharedFormatter {
    formatter_fn(|_value, _row, _channel, _ctx| Cell::empty())
}

fn strip_tags(markup: &str) -> String {
    static TAG: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(tag) = TAG.get_or_init(|| Regex::new(r"<[^>]*>").ok()) else {
        return markup.to_string();
    };
    let text = tag.replace_all(markup, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
