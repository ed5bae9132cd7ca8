/// Settings shared by the delimited text and spreadsheet encoders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field separator for delimited text.
    pub delimiter: u8,
    /// Write a row of translated column labels first.
    pub include_header: bool,
    /// Append the footer aggregates as the last row.
    pub include_footer: bool,
    /// Spreadsheet column width bounds, in characters.
    pub min_column_width: usize,
    pub max_column_width: usize,
    pub sheet_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            // Spreadsheet apps in comma-decimal locales split on `;`.
            delimiter: b';',
            include_header: true,
            include_footer: false,
            min_column_width: 8,
            max_column_width: 60,
            sheet_name: "Export".to_string(),
        }
    }
}
