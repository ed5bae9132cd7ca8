//! Export serializers for formatted tables.
//!
//! [`serialize`] is the single entry point: delimited text and spreadsheets go through the
//! N-line column expansion in [`ExpandedLayout`], the display channels get the formatted rows
//! as JSON. Field descriptors for the interactive table live in [`descriptor`].

pub mod descriptor;

mod delimited;
mod error;
mod layout;
mod options;
mod spreadsheet;

pub use delimited::{to_delimited_text, try_to_delimited_text, EXPORT_ERROR_PREFIX};
pub use descriptor::{
    describe_field, describe_fields, descriptors_to_json, ButtonDescriptor, FieldDescriptor,
    IconDescriptor, InputDescriptor,
};
pub use error::ExportError;
pub use layout::ExpandedLayout;
pub use options::ExportOptions;
pub use spreadsheet::{column_widths, to_spreadsheet, try_to_spreadsheet};

use tabula_model::{Column, FormattedTable, OutputChannel};

/// Encoded output of one channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Bytes(bytes) => bytes,
        }
    }
}

/// Encode `table` for `channel`. Never fails: see [`to_delimited_text`] and [`to_spreadsheet`]
/// for how encoder errors degrade.
///
/// `columns` is the field metadata in declaration order (usually `Table::columns`). When it is
/// empty the first row's keys are used instead.
pub fn serialize(
    table: &FormattedTable,
    columns: &[Column],
    channel: OutputChannel,
    options: &ExportOptions,
) -> Payload {
    match channel {
        OutputChannel::DelimitedText => {
            let layout = ExpandedLayout::from_table(table, columns, options);
            Payload::Text(to_delimited_text(&layout, options))
        }
        OutputChannel::Spreadsheet => {
            let layout = ExpandedLayout::from_table(table, columns, options);
            Payload::Bytes(to_spreadsheet(&layout, options))
        }
        OutputChannel::Interactive | OutputChannel::Print => Payload::Text(to_json(table)),
    }
}

/// `{"rows": [...], "footer": {...}}` for the display channels.
pub fn try_to_json(table: &FormattedTable) -> Result<String, ExportError> {
    Ok(serde_json::to_string(table)?)
}

pub fn to_json(table: &FormattedTable) -> String {
    try_to_json(table).unwrap_or_else(|err| {
        log::warn!("JSON export failed: {err}");
        format!("{EXPORT_ERROR_PREFIX}{err}")
    })
}
