use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::{OutputChannel, Row, UserContext, Value};

/// Replaces an empty per-row menu entry so the UI hides that item.
pub const HIDDEN_MENU_ITEM: &str = "hidden";

/// A rendered value.
///
/// Serialized untagged: scalars stay scalars, `Pair`/`Lines`/`Sortable` become JSON arrays.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Int(i64),
    /// Two ordered display values: two-line fields and `(display, url)` links.
    Pair(String, String),
    /// N-line values. Export serializers expand these into numbered columns.
    Lines(Vec<String>),
    /// `[display, raw]` so the UI can sort by the raw value.
    Sortable(String, Value),
    Buttons(ButtonsCell),
}

/// Row representation of a buttons field carrying per-row menus.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ButtonsCell {
    pub value: String,
    /// Menu items keyed by button slot.
    pub menus: BTreeMap<usize, Vec<String>>,
}

impl Cell {
    pub fn empty() -> Cell {
        Cell::Text(String::new())
    }

    pub fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }

    pub fn empty_pair() -> Cell {
        Cell::Pair(String::new(), String::new())
    }

    /// Unformatted rendering of a raw value.
    pub fn from_raw(value: &Value) -> Cell {
        match value {
            Value::Int(n) => Cell::Int(*n),
            Value::Float(f) => Cell::Number(*f),
            other => Cell::Text(other.as_text()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Text(s) => s.is_empty(),
            Cell::Pair(a, b) => a.is_empty() && b.is_empty(),
            Cell::Lines(lines) => lines.iter().all(String::is_empty),
            Cell::Sortable(display, _) => display.is_empty(),
            Cell::Buttons(buttons) => buttons.value.is_empty() && buttons.menus.is_empty(),
            Cell::Number(_) | Cell::Int(_) => false,
        }
    }

    /// Flatten to one string: multi-valued cells collapse to their first (display) element.
    pub fn display_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(f) => f.to_string(),
            Cell::Int(n) => n.to_string(),
            Cell::Pair(first, _) => first.clone(),
            Cell::Lines(lines) => lines.first().cloned().unwrap_or_default(),
            Cell::Sortable(display, _) => display.clone(),
            Cell::Buttons(buttons) => buttons.value.clone(),
        }
    }

    pub fn as_lines(&self) -> Option<&[String]> {
        match self {
            Cell::Lines(lines) => Some(lines),
            _ => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// Renders one raw value for one channel.
///
/// Implementations must be pure: the same inputs always give the same cell. `row` gives access
/// to the other fields of the same record.
pub trait Formatter: Send + Sync {
    fn format(&self, value: &Value, row: &Row<'_>, channel: OutputChannel, ctx: &UserContext)
        -> Cell;
}

impl<F> Formatter for F
where
    F: Fn(&Value, &Row<'_>, OutputChannel, &UserContext) -> Cell + Send + Sync,
{
    fn format(
        &self,
        value: &Value,
        row: &Row<'_>,
        channel: OutputChannel,
        ctx: &UserContext,
    ) -> Cell {
        self(value, row, channel, ctx)
    }
}

pub type SharedFormatter = Arc<dyn Formatter>;

/// Box a closure as a [`SharedFormatter`].
pub fn formatter_fn<F>(f: F) -> SharedFormatter
where
    F: Fn(&Value, &Row<'_>, OutputChannel, &UserContext) -> Cell + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Field settings a formatter constructor may close over.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormatterConfig {
    pub decimals: usize,
    /// Translation keys for boolean fields.
    pub true_label: String,
    pub false_label: String,
    /// Field whose per-row value overrides the user's unit preference (distance fields).
    pub unit_field: Option<String>,
    /// Icon value -> label translation key.
    pub icon_labels: BTreeMap<String, String>,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}
