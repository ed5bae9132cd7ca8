//! `tabula-model` turns typed records into channel-specific cell values.
//!
//! The pipeline is:
//! - a [`FieldKind`] (type hint) resolves to [`FieldDefaults`] through the registry,
//! - a [`Field`] pairs those defaults with an accessor and a [`Formatter`],
//! - a [`Table`] runs every visible field's formatter over each record for one
//!   [`OutputChannel`] and computes footer aggregates.
//!
//! Formatting never fails: values that do not match a field's expected shape degrade to the
//! field's empty-equivalent [`Cell`].

mod channel;
mod context;
mod field;
mod formatter;
pub mod formatters;
mod registry;
mod row;
mod table;
mod value;

pub use channel::OutputChannel;
pub use context::{Catalog, UserContext};
pub use field::{
    Aggregation, ButtonSlot, Field, FieldBuilder, IconSpec, InputSpec, MenuAccessor,
    TextAccessor,
};
pub use formatter::{
    formatter_fn, ButtonsCell, Cell, Formatter, FormatterConfig, SharedFormatter,
    HIDDEN_MENU_ITEM,
};
pub use registry::{
    resolve_defaults, resolve_tag, Alignment, FieldDefaults, FieldKind, FormatterFactory,
    StructuralType,
};
pub use row::{Accessor, BoundRecord, FieldLookup, Record, Row, RowAccessor};
pub use table::{Column, FormattedRow, FormattedTable, Table, TableBuilder};
pub use value::Value;
