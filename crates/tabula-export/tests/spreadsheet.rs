use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use zip::ZipArchive;

use tabula_export::{
    serialize, to_spreadsheet, try_to_spreadsheet, ExpandedLayout, ExportError, ExportOptions,
    Payload,
};
use tabula_model::{Cell, Column, FormattedRow, FormattedTable, OutputChannel};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

fn sheet_xml(bytes: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("open workbook");
    let mut part = archive
        .by_name("xl/worksheets/sheet1.xml")
        .expect("worksheet part");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("utf-8 worksheet");
    xml
}

/// The `<c r="...">` element for one cell reference, if the cell was written.
fn cell<'a>(xml: &'a str, reference: &str) -> Option<&'a str> {
    let start = xml.find(&format!("<c r=\"{reference}\""))?;
    let rest = &xml[start..];
    let end = rest
        .find("</c>")
        .map(|i| i + "</c>".len())
        .or_else(|| rest.find("/>").map(|i| i + "/>".len()))?;
    Some(&rest[..end])
}

/// `(first column, whole-character width)` for every `<col>` entry.
fn col_widths(xml: &str) -> Vec<(u32, u32)> {
    xml.split("<col ")
        .skip(1)
        .filter_map(|entry| {
            let min = attribute(entry, "min")?.parse::<u32>().ok()?;
            let width = attribute(entry, "width")?.parse::<f64>().ok()?;
            Some((min, width.trunc() as u32))
        })
        .collect()
}

fn attribute<'a>(element: &'a str, name: &str) -> Option<&'a str> {
    let key = format!(" {name}=\"");
    let start = format!(" {element}").find(&key)? + key.len() - 1;
    let rest = &element[start..];
    rest.find('"').map(|end| &rest[..end])
}

fn sample_layout() -> ExpandedLayout {
    let rows: Vec<FormattedRow> = vec![
        [
            ("name".to_string(), Cell::text("Alpha")),
            ("km".to_string(), Cell::text("12.5")),
            ("stops".to_string(), Cell::Lines(vec!["Berlin".into(), "Kiel".into()])),
        ]
        .into_iter()
        .collect(),
        [
            ("name".to_string(), Cell::text("Beta")),
            ("km".to_string(), Cell::text("")),
        ]
        .into_iter()
        .collect(),
    ];
    let columns = vec![
        Column::new("name", "Name"),
        Column {
            numeric: true,
            ..Column::new("km", "Distance")
        },
        Column::new("stops", "Stops"),
    ];
    ExpandedLayout::new(&rows, &columns)
}

#[test]
fn workbook_is_a_zip_package() {
    let bytes = try_to_spreadsheet(&sample_layout(), &ExportOptions::default()).unwrap();
    assert!(bytes.starts_with(ZIP_MAGIC));
}

#[test]
fn numeric_columns_are_written_as_numbers() {
    let xml = sheet_xml(&try_to_spreadsheet(&sample_layout(), &ExportOptions::default()).unwrap());

    let header = cell(&xml, "A1").expect("header cell");
    assert!(header.contains(" s=\""), "{header}");
    assert!(header.contains("t=\"s\""), "{header}");

    let km = cell(&xml, "B2").expect("distance cell");
    assert!(!km.contains(" t=\""), "{km}");
    assert!(km.contains("<v>12.5</v>"), "{km}");

    let name = cell(&xml, "A2").expect("name cell");
    assert!(name.contains("t=\"s\""), "{name}");
    assert!(!name.contains(" s=\""), "{name}");

    assert_eq!(cell(&xml, "B3"), None);
    assert_eq!(cell(&xml, "D3"), None);
}

#[test]
fn column_widths_are_clamped_in_the_worksheet() {
    let xml = sheet_xml(&try_to_spreadsheet(&sample_layout(), &ExportOptions::default()).unwrap());
    // Name -> floor, Distance -> label, Stops -> floor, Stops 2 -> label.
    assert_eq!(col_widths(&xml), vec![(1, 8), (2, 10), (3, 8), (4, 9)]);

    let rows: Vec<FormattedRow> = vec![[("note".to_string(), Cell::text("y".repeat(200)))]
        .into_iter()
        .collect()];
    let layout = ExpandedLayout::new(&rows, &[Column::new("note", "Note")]);
    let xml = sheet_xml(&try_to_spreadsheet(&layout, &ExportOptions::default()).unwrap());
    assert_eq!(col_widths(&xml), vec![(1, 60)]);
}

#[test]
fn invalid_sheet_names_degrade_to_an_empty_payload() {
    let options = ExportOptions {
        sheet_name: "bad[name]".to_string(),
        ..ExportOptions::default()
    };
    let err = try_to_spreadsheet(&sample_layout(), &options).unwrap_err();
    assert!(matches!(err, ExportError::Spreadsheet(_)), "{err:?}");
    assert!(to_spreadsheet(&sample_layout(), &options).is_empty());
}

#[test]
fn serialize_routes_the_spreadsheet_channel_to_bytes() {
    let table = FormattedTable {
        rows: vec![[("qty".to_string(), Cell::text("3"))].into_iter().collect()],
        footer: FormattedRow::new(),
    };
    let payload = serialize(
        &table,
        &[Column::new("qty", "Qty")],
        OutputChannel::Spreadsheet,
        &ExportOptions::default(),
    );
    match payload {
        Payload::Bytes(bytes) => assert!(bytes.starts_with(ZIP_MAGIC)),
        Payload::Text(text) => panic!("expected bytes, got text {text:?}"),
    }
}

#[test]
fn headerless_workbooks_are_still_written() {
    let options = ExportOptions {
        include_header: false,
        ..ExportOptions::default()
    };
    let bytes = to_spreadsheet(&sample_layout(), &options);
    assert!(bytes.starts_with(ZIP_MAGIC));
}
