use crate::{ExpandedLayout, ExportError, ExportOptions};

/// Prefix of the inline message returned in place of delimited text when encoding fails.
pub const EXPORT_ERROR_PREFIX: &str = "export error: ";

/// Encode `layout` as delimited text: an optional header row of labels, then one record per row.
///
/// Quoting follows the `csv` writer defaults. A layout without columns encodes as an empty
/// string.
pub fn try_to_delimited_text(
    layout: &ExpandedLayout,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    if layout.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::new());

    if options.include_header {
        writer.write_record(layout.columns.iter().map(|column| column.label.as_str()))?;
    }
    for row in &layout.rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Best-effort variant of [`try_to_delimited_text`]: failures become an inline error message.
pub fn to_delimited_text(layout: &ExpandedLayout, options: &ExportOptions) -> String {
    try_to_delimited_text(layout, options).unwrap_or_else(|err| {
        log::warn!("delimited text export failed: {err}");
        format!("{EXPORT_ERROR_PREFIX}{err}")
    })
}
