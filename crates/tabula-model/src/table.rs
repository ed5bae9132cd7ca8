use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tabula_format::format_integer;

use crate::{
    Aggregation, ButtonsCell, Cell, Field, FieldBuilder, FieldKind, OutputChannel, Row,
    RowAccessor, StructuralType, UserContext, Value, HIDDEN_MENU_ITEM,
};

/// One record rendered for one channel: output key -> cell.
///
/// Keys are field ids, plus `<id>Link` for links and `<id>Hint` for icon hints on the
/// Interactive channel.
pub type FormattedRow = BTreeMap<String, Cell>;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FormattedTable {
    pub rows: Vec<FormattedRow>,
    /// Aggregated fields only; empty when no field aggregates.
    pub footer: FormattedRow,
}

/// Column metadata handed to export serializers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: String,
    /// Translated title.
    pub label: String,
    /// Numeric structural type; spreadsheets write parseable cells as numbers.
    pub numeric: bool,
}

impl Column {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            numeric: false,
        }
    }
}

/// An immutable set of fields over records of type `R`.
pub struct Table<R> {
    fields: Vec<Field<R>>,
    accessors: RowAccessor<R>,
}

pub struct TableBuilder<R> {
    fields: Vec<Field<R>>,
}

impl<R> TableBuilder<R> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    #[must_use]
    pub fn field(mut self, field: FieldBuilder<R>) -> Self {
        self.fields.push(field.build());
        self
    }

    pub fn build(self) -> Table<R> {
        let mut accessors = RowAccessor::new();
        for field in &self.fields {
            accessors.register(field.id(), field.accessor().clone());
        }
        Table {
            fields: self.fields,
            accessors,
        }
    }
}

impl<R> Default for TableBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Table<R> {
    pub fn builder() -> TableBuilder<R> {
        TableBuilder::new()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&Field<R>> {
        self.fields.iter().find(|field| field.id() == id)
    }

    /// Show or hide a field after the table is built. Returns `false` for unknown ids.
    pub fn set_visible(&self, id: &str, visible: bool) -> bool {
        match self.field(id) {
            Some(field) => {
                field.set_visible(visible);
                true
            }
            None => false,
        }
    }

    /// Columns emitted on `channel`, in declaration order, with translated labels.
    pub fn columns(&self, channel: OutputChannel, ctx: &UserContext) -> Vec<Column> {
        self.fields
            .iter()
            .filter(|field| field.emits_on(channel))
            .map(|field| Column {
                id: field.id().to_string(),
                label: ctx.translate(field.title()),
                numeric: field.structural() == StructuralType::Number,
            })
            .collect()
    }

    pub fn format(
        &self,
        records: &[R],
        channel: OutputChannel,
        ctx: &UserContext,
    ) -> FormattedTable {
        FormattedTable {
            rows: self.format_rows(records, channel, ctx),
            footer: self.footer(records, channel, ctx),
        }
    }

    pub fn format_rows(
        &self,
        records: &[R],
        channel: OutputChannel,
        ctx: &UserContext,
    ) -> Vec<FormattedRow> {
        records
            .iter()
            .map(|record| self.format_record(record, channel, ctx))
            .collect()
    }

    /// Render every field of `record` that is visible (and export-eligible on export channels).
    pub fn format_record(
        &self,
        record: &R,
        channel: OutputChannel,
        ctx: &UserContext,
    ) -> FormattedRow {
        let bound = self.accessors.bind(record);
        let row = Row::new(&bound);
        let interactive = channel == OutputChannel::Interactive;
        let mut out = FormattedRow::new();

        for field in self.fields.iter().filter(|field| field.emits_on(channel)) {
            let id = field.id();
            let raw = field.raw(record);
            let cell = field.formatter_for(channel).format(&raw, &row, channel, ctx);
            place(&mut out, field, cell, raw, channel);

            if interactive && field.has_hint() {
                let hint = field.hint_for(record);
                if !hint.is_empty() {
                    out.insert(format!("{id}Hint"), Cell::Text(hint));
                }
            }

            if interactive && field.has_menus() {
                let value = out
                    .remove(id)
                    .map(|cell| cell.display_text())
                    .unwrap_or_default();
                out.insert(id.to_string(), Cell::Buttons(menus_for(field, record, value)));
            }
        }

        out
    }

    /// Aggregate every field with a footer policy over all `records`, then format the total once.
    ///
    /// Sums go through the field's formatter with the first record as row context, so
    /// cross-field formatters (e.g. a per-row unit override) see record zero's settings. Counts
    /// are plain integers whatever the field measures. Both follow the same Interactive output
    /// rules as rows. With no records the raw aggregate is emitted unformatted.
    pub fn footer(&self, records: &[R], channel: OutputChannel, ctx: &UserContext) -> FormattedRow {
        let mut out = FormattedRow::new();
        let aggregated = self
            .fields
            .iter()
            .filter(|field| field.aggregation() != Aggregation::None && field.emits_on(channel));

        for field in aggregated {
            let total = aggregate(field, records);
            let Some(first) = records.first() else {
                log::debug!("footer for `{}` has no rows; emitting raw aggregate", field.id());
                out.insert(field.id().to_string(), Cell::from_raw(&total));
                continue;
            };
            let cell = match field.aggregation() {
                Aggregation::Count => count_cell(total.as_i64(), channel, ctx),
                _ => {
                    let bound = self.accessors.bind(first);
                    let row = Row::new(&bound);
                    field.formatter_for(channel).format(&total, &row, channel, ctx)
                }
            };
            place(&mut out, field, cell, total, channel);
        }

        out
    }
}

/// Store a formatted cell under the field's output keys.
///
/// On Interactive a link splits into `<id>` and `<id>Link`, and numeric fields carry
/// `[display, raw]` so the client can sort on the raw value.
fn place<R>(
    out: &mut FormattedRow,
    field: &Field<R>,
    cell: Cell,
    raw: Value,
    channel: OutputChannel,
) {
    let id = field.id();
    if channel != OutputChannel::Interactive {
        out.insert(id.to_string(), cell);
        return;
    }

    if field.kind() == FieldKind::Link {
        let (display, target) = match cell {
            Cell::Pair(display, target) => (display, target),
            other => (other.display_text(), String::new()),
        };
        out.insert(id.to_string(), Cell::Text(display));
        out.insert(format!("{id}Link"), Cell::Text(target));
    } else if field.structural() == StructuralType::Number {
        let cell = match cell {
            sortable @ Cell::Sortable(..) => sortable,
            other => Cell::Sortable(other.display_text(), raw),
        };
        out.insert(id.to_string(), cell);
    } else {
        out.insert(id.to_string(), cell);
    }
}

fn count_cell(count: i64, channel: OutputChannel, ctx: &UserContext) -> Cell {
    if channel.is_display() {
        Cell::Text(format_integer(count, ctx.locale))
    } else {
        Cell::Text(count.to_string())
    }
}

fn aggregate<R>(field: &Field<R>, records: &[R]) -> Value {
    match field.aggregation() {
        Aggregation::None => Value::Null,
        Aggregation::Sum => match field.kind() {
            FieldKind::Integer | FieldKind::Id | FieldKind::Duration => Value::Int(
                records
                    .iter()
                    .fold(0_i64, |acc, r| acc.saturating_add(field.raw(r).as_i64())),
            ),
            _ => Value::Float(records.iter().map(|r| field.raw(r).as_f64()).sum()),
        },
        Aggregation::Count => {
            let count = records.iter().filter(|r| !field.raw(r).is_blank()).count();
            Value::Int(i64::try_from(count).unwrap_or(i64::MAX))
        }
    }
}

/// Inject per-row menus for every visible button slot; empty items become the hidden sentinel.
fn menus_for<R>(field: &Field<R>, record: &R, value: String) -> ButtonsCell {
    let mut menus = BTreeMap::new();
    for (slot, items) in field.menus() {
        if field.buttons().get(*slot).is_some_and(|button| button.hidden) {
            continue;
        }
        let items = items(record)
            .into_iter()
            .map(|item| {
                if item.is_empty() {
                    HIDDEN_MENU_ITEM.to_string()
                } else {
                    item
                }
            })
            .collect();
        menus.insert(*slot, items);
    }
    ButtonsCell { value, menus }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<R> fmt::Debug for TableBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBuilder")
            .field("fields", &self.fields)
            .finish()
    }
}
