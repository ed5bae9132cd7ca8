use pretty_assertions::assert_eq;

use tabula_export::{ExpandedLayout, ExportOptions};
use tabula_model::{Cell, Column, FormattedRow, FormattedTable};

fn row(cells: &[(&str, Cell)]) -> FormattedRow {
    cells
        .iter()
        .map(|(id, cell)| (id.to_string(), cell.clone()))
        .collect()
}

fn lines(items: &[&str]) -> Cell {
    Cell::Lines(items.iter().map(|s| s.to_string()).collect())
}

fn ids(layout: &ExpandedLayout) -> Vec<&str> {
    layout.columns.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn ragged_lines_expand_to_the_widest_row() {
    let rows = vec![
        row(&[("x", lines(&["a"]))]),
        row(&[("x", lines(&["b1", "b2", "b3"]))]),
        row(&[("x", lines(&["c1", "c2"]))]),
    ];
    let layout = ExpandedLayout::new(&rows, &[Column::new("x", "Stops")]);

    assert_eq!(ids(&layout), vec!["x", "x_2", "x_3"]);
    let labels: Vec<&str> = layout.columns.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Stops", "Stops 2", "Stops 3"]);
    assert_eq!(
        layout.rows,
        vec![
            vec!["a".to_string(), String::new(), String::new()],
            vec!["b1".to_string(), "b2".to_string(), "b3".to_string()],
            vec!["c1".to_string(), "c2".to_string(), String::new()],
        ]
    );
}

#[test]
fn expanded_columns_keep_their_place_and_numeric_flag() {
    let rows = vec![row(&[
        ("a", Cell::text("1")),
        ("n", lines(&["4", "5"])),
        ("z", Cell::text("last")),
    ])];
    let numeric = Column {
        numeric: true,
        ..Column::new("n", "N")
    };
    let columns = vec![Column::new("a", "A"), numeric, Column::new("z", "Z")];
    let layout = ExpandedLayout::new(&rows, &columns);

    assert_eq!(ids(&layout), vec!["a", "n", "n_2", "z"]);
    assert!(layout.columns[2].numeric);
    assert_eq!(layout.rows[0], vec!["1", "4", "5", "last"]);
}

#[test]
fn single_and_empty_line_fields_stay_one_column() {
    let rows = vec![row(&[("x", lines(&[]))]), row(&[("x", lines(&["only"]))])];
    let layout = ExpandedLayout::new(&rows, &[Column::new("x", "X")]);
    assert_eq!(ids(&layout), vec!["x"]);
    assert_eq!(layout.rows, vec![vec![String::new()], vec!["only".to_string()]]);
}

#[test]
fn uncollapsed_multi_value_cells_flatten_to_their_first_element() {
    let rows = vec![row(&[
        ("pair", Cell::Pair("Berlin".into(), "Germany".into())),
        ("sort", Cell::Sortable("1,234".into(), 1234.into())),
        ("int", Cell::Int(7)),
    ])];
    let columns = vec![
        Column::new("pair", "Pair"),
        Column::new("sort", "Sort"),
        Column::new("int", "Int"),
        Column::new("missing", "Missing"),
    ];
    let layout = ExpandedLayout::new(&rows, &columns);
    assert_eq!(layout.rows[0], vec!["Berlin", "1,234", "7", ""]);
}

#[test]
fn missing_metadata_falls_back_to_first_row_keys() {
    let rows = vec![
        row(&[("b", Cell::text("2")), ("a", Cell::text("1"))]),
        row(&[("a", Cell::text("3")), ("c", Cell::text("ignored"))]),
    ];
    let layout = ExpandedLayout::new(&rows, &[]);
    let mut found = ids(&layout);
    found.sort_unstable();
    assert_eq!(found, vec!["a", "b"]);
    assert_eq!(layout.rows.len(), 2);

    let empty = ExpandedLayout::new(&[], &[]);
    assert!(empty.is_empty());
}

#[test]
fn footer_is_appended_only_when_requested() {
    let table = FormattedTable {
        rows: vec![row(&[("qty", Cell::text("3"))]), row(&[("qty", Cell::text("4"))])],
        footer: row(&[("qty", Cell::text("7"))]),
    };
    let columns = vec![Column::new("qty", "Qty")];

    let layout = ExpandedLayout::from_table(&table, &columns, &ExportOptions::default());
    assert_eq!(layout.rows.len(), 2);

    let options = ExportOptions {
        include_footer: true,
        ..ExportOptions::default()
    };
    let layout = ExpandedLayout::from_table(&table, &columns, &options);
    assert_eq!(layout.rows.last(), Some(&vec!["7".to_string()]));
}
