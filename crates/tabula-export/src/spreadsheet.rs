use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};

use crate::{ExpandedLayout, ExportError, ExportOptions};

/// Encode `layout` as a single-worksheet `.xlsx` workbook.
///
/// The header row is bold. Cells of numeric columns that parse as finite numbers are written
/// as numbers, everything else as strings; empty cells are left blank.
pub fn try_to_spreadsheet(
    layout: &ExpandedLayout,
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(options.sheet_name.as_str())?;

    let mut first_data_row = 0;
    if options.include_header {
        for (index, column) in layout.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col_num(index)?, column.label.as_str(), &bold)?;
        }
        first_data_row = 1;
    }

    for (offset, row) in layout.rows.iter().enumerate() {
        let row_index = row_num(first_data_row + offset)?;
        for (index, (column, text)) in layout.columns.iter().zip(row).enumerate() {
            if text.is_empty() {
                continue;
            }
            let col = col_num(index)?;
            match parse_number(column.numeric, text) {
                Some(number) => {
                    worksheet.write_number(row_index, col, number)?;
                }
                None => {
                    worksheet.write_string(row_index, col, text.as_str())?;
                }
            }
        }
    }

    for (index, width) in column_widths(layout, options).into_iter().enumerate() {
        worksheet.set_column_width(col_num(index)?, width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Best-effort variant of [`try_to_spreadsheet`]: failures yield an empty byte vector.
pub fn to_spreadsheet(layout: &ExpandedLayout, options: &ExportOptions) -> Vec<u8> {
    try_to_spreadsheet(layout, options).unwrap_or_else(|err| {
        log::warn!("spreadsheet export failed: {err}");
        Vec::new()
    })
}

/// Longest label or cell text per column plus padding, clamped to the configured bounds.
pub fn column_widths(layout: &ExpandedLayout, options: &ExportOptions) -> Vec<usize> {
    let floor = options.min_column_width;
    let cap = options.max_column_width.max(floor);
    layout
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let header = if options.include_header {
                column.label.chars().count()
            } else {
                0
            };
            let longest = layout
                .rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|text| text.chars().count())
                .fold(header, usize::max);
            (longest + 2).clamp(floor, cap)
        })
        .collect()
}

fn parse_number(numeric: bool, text: &str) -> Option<f64> {
    if !numeric {
        return None;
    }
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn col_num(index: usize) -> Result<ColNum, ExportError> {
    ColNum::try_from(index).map_err(|_| ExportError::ColumnOutOfRange(index))
}

fn row_num(index: usize) -> Result<RowNum, ExportError> {
    RowNum::try_from(index).map_err(|_| ExportError::RowOutOfRange(index))
}
