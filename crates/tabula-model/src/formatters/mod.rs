//! Default formatter constructors, one per [`FieldKind`](crate::FieldKind).
//!
//! Each constructor takes the field's [`FormatterConfig`](crate::FormatterConfig) and returns a
//! pure [`SharedFormatter`](crate::SharedFormatter). Display channels (Interactive, Print) get
//! locale separators and unit suffixes; export channels (DelimitedText, Spreadsheet) get plain
//! parseable numbers and ISO dates.

mod lines;
mod numeric;
mod temporal;
mod text;

pub use lines::{int2, join_secondary, text2, text2_int, text_n, SECONDARY_SEPARATOR};
pub use numeric::{distance, duration, float, id, integer, percent, pressure, speed};
pub use temporal::{date, date_time};
pub use text::{boolean, buttons, header, html, icon, input, link, text};
