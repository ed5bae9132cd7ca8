//! Column expansion shared by the export encoders.
//!
//! N-line cells ([`Cell::Lines`]) become one physical column per line. With rows of 1, 3 and 2
//! lines for field `x` the layout has columns `x`, `x_2`, `x_3`, and shorter rows are padded
//! with empty strings.

use std::borrow::Cow;

use tabula_model::{Cell, Column, FormattedRow, FormattedTable};

use crate::ExportOptions;

/// Rows flattened to strings under the expanded column set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandedLayout {
    pub columns: Vec<Column>,
    /// One string per expanded column, in column order.
    pub rows: Vec<Vec<String>>,
    slots: Vec<Slot>,
}

/// Where an expanded column reads from: a source field and a line index.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    source: String,
    line: usize,
}

impl ExpandedLayout {
    /// Expand `rows` under `columns`.
    ///
    /// Without column metadata the columns are the keys of the first row, labelled by id.
    pub fn new(rows: &[FormattedRow], columns: &[Column]) -> Self {
        let columns: Cow<'_, [Column]> = if columns.is_empty() {
            Cow::Owned(fallback_columns(rows))
        } else {
            Cow::Borrowed(columns)
        };

        let mut expanded = Vec::with_capacity(columns.len());
        let mut slots = Vec::with_capacity(columns.len());
        for column in columns.iter() {
            for line in 0..line_count(rows, &column.id) {
                expanded.push(numbered(column, line));
                slots.push(Slot {
                    source: column.id.clone(),
                    line,
                });
            }
        }

        let mut layout = Self {
            columns: expanded,
            rows: Vec::with_capacity(rows.len()),
            slots,
        };
        for row in rows {
            layout.push_row(row);
        }
        layout
    }

    /// Expand a formatted table, appending its footer when `options.include_footer` is set and
    /// some field aggregates.
    pub fn from_table(table: &FormattedTable, columns: &[Column], options: &ExportOptions) -> Self {
        let mut layout = Self::new(&table.rows, columns);
        if options.include_footer && !table.footer.is_empty() {
            layout.push_row(&table.footer);
        }
        layout
    }

    /// Flatten one more row under the existing columns. Extra lines beyond the expanded
    /// width are dropped.
    pub fn push_row(&mut self, row: &FormattedRow) {
        let values = self
            .slots
            .iter()
            .map(|slot| cell_line(row.get(&slot.source), slot.line))
            .collect();
        self.rows.push(values);
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn fallback_columns(rows: &[FormattedRow]) -> Vec<Column> {
    log::debug!("no column metadata; using the keys of the first row");
    rows.first()
        .map(|row| {
            row.keys()
                .map(|key| Column::new(key.clone(), key.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// Widest N-line value of `id` across all rows; at least one column.
fn line_count(rows: &[FormattedRow], id: &str) -> usize {
    rows.iter()
        .filter_map(|row| row.get(id).and_then(Cell::as_lines))
        .map(<[String]>::len)
        .max()
        .unwrap_or(1)
        .max(1)
}

fn numbered(column: &Column, line: usize) -> Column {
    if line == 0 {
        return column.clone();
    }
    let n = line + 1;
    Column {
        id: format!("{}_{n}", column.id),
        label: format!("{} {n}", column.label),
        numeric: column.numeric,
    }
}

fn cell_line(cell: Option<&Cell>, line: usize) -> String {
    match cell {
        Some(Cell::Lines(lines)) => lines.get(line).cloned().unwrap_or_default(),
        Some(other) if line == 0 => other.display_text(),
        _ => String::new(),
    }
}
