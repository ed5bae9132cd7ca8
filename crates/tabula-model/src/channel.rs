use serde::{Deserialize, Serialize};

/// Where formatted rows are headed. Every formatting decision branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputChannel {
    /// The web table.
    Interactive,
    /// Delimited text (CSV).
    DelimitedText,
    /// Print layout (PDF).
    Print,
    /// Spreadsheet workbook.
    Spreadsheet,
}

impl OutputChannel {
    pub const ALL: [OutputChannel; 4] = [
        OutputChannel::Interactive,
        OutputChannel::DelimitedText,
        OutputChannel::Print,
        OutputChannel::Spreadsheet,
    ];

    /// Human-facing channels: locale separators, unit suffixes.
    pub const fn is_display(self) -> bool {
        matches!(self, OutputChannel::Interactive | OutputChannel::Print)
    }

    /// File export channels: plain parseable numbers, ISO dates.
    pub const fn is_export(self) -> bool {
        matches!(self, OutputChannel::DelimitedText | OutputChannel::Spreadsheet)
    }
}
