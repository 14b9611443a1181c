//! XLSX serializer tests: serialize a snapshot, unzip it, and read the parts
//! back.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]

mod common;

use common::{entry_names, parse_sheet_rows, read_entry};
use tabreport::styles::StyleCatalog;
use tabreport::{serialize, save_as_excel, ReportParams, TableSnapshot};

fn sample_snapshot(title: bool, footer: bool) -> TableSnapshot {
    let cols = vec!["item".to_string(), "amount".to_string()];
    let rows = vec![
        vec!["widget".to_string(), "12.5".to_string()],
        vec!["2024-01-05".to_string(), "true".to_string()],
    ];
    let params = ReportParams {
        title: title.then(|| "Sales Report".to_string()),
        footer_captions: footer.then(|| vec!["Signed:".to_string(), "Date:".to_string()]),
        ..ReportParams::default()
    };
    TableSnapshot::new("sales", &cols, rows, Some(params)).unwrap()
}

fn serialize_sample(title: bool, footer: bool, underline: bool) -> Vec<u8> {
    serialize(&sample_snapshot(title, footer), &StyleCatalog::default(), underline).unwrap()
}

#[test]
fn container_holds_all_required_parts() {
    let bytes = serialize_sample(true, true, true);
    let names = entry_names(&bytes);
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/styles.xml",
        "xl/worksheets/sheet1.xml",
    ] {
        assert!(names.iter().any(|n| n == part), "missing {part}");
    }
}

#[test]
fn workbook_part_names_the_sheet_after_the_table() {
    let bytes = serialize_sample(false, false, false);
    let workbook = read_entry(&bytes, "xl/workbook.xml");
    assert!(workbook.contains(r#"<sheet name="sales""#));
}

#[test]
fn title_row_is_present_and_merged() {
    let bytes = serialize_sample(true, false, false);
    let sheet = read_entry(&bytes, "xl/worksheets/sheet1.xml");
    let rows = parse_sheet_rows(&sheet);

    // title + header + 2 data rows
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0][0].cell_ref, "A1");
    assert_eq!(rows[0][0].value.as_deref(), Some("Sales Report"));
    assert_eq!(rows[0][0].cell_type.as_deref(), Some("inlineStr"));
    // serial + 2 data columns
    assert!(sheet.contains(r#"<mergeCell ref="A1:C1"/>"#));
}

#[test]
fn no_title_starts_at_the_header_row() {
    let bytes = serialize_sample(false, false, false);
    let sheet = read_entry(&bytes, "xl/worksheets/sheet1.xml");
    let rows = parse_sheet_rows(&sheet);

    assert_eq!(rows.len(), 3);
    assert!(!sheet.contains("<mergeCells"));
    assert_eq!(rows[0][0].value.as_deref(), Some("No."));
    assert_eq!(rows[0][1].value.as_deref(), Some("item"));
    assert_eq!(rows[0][2].value.as_deref(), Some("amount"));
}

#[test]
fn data_cells_carry_typed_values_and_styles() {
    let bytes = serialize_sample(false, false, false);
    let sheet = read_entry(&bytes, "xl/worksheets/sheet1.xml");
    let rows = parse_sheet_rows(&sheet);

    // First data row: serial 1, inline text, numeric amount.
    let first = &rows[1];
    assert_eq!(first[0].value.as_deref(), Some("1"));
    assert_eq!(first[0].cell_type, None);
    assert_eq!(first[1].value.as_deref(), Some("widget"));
    assert_eq!(first[1].cell_type.as_deref(), Some("inlineStr"));
    assert_eq!(first[2].value.as_deref(), Some("12.5"));
    assert_eq!(first[2].cell_type, None, "decimals are native numbers");

    // Second data row: a date kept as styled text, a native boolean.
    let second = &rows[2];
    assert_eq!(second[0].value.as_deref(), Some("2"));
    assert_eq!(second[1].value.as_deref(), Some("2024-01-05"));
    assert_eq!(second[1].cell_type.as_deref(), Some("inlineStr"));
    assert_eq!(second[2].cell_type.as_deref(), Some("b"));
    assert_eq!(second[2].value.as_deref(), Some("1"));

    // Date and decimal styles differ from the default text style.
    assert_ne!(second[1].style, first[1].style);
    assert_ne!(first[2].style, first[1].style);
}

#[test]
fn row_counts_for_a_three_column_table() {
    let cols = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let data = vec![
        vec!["x".to_string(), "1".to_string(), "left".to_string()],
        vec!["y".to_string(), "2".to_string(), "right".to_string()],
    ];
    let footer = vec!["Signed:".to_string(), "Date:".to_string()];

    let untitled = TableSnapshot::new(
        "",
        &cols,
        data.clone(),
        Some(ReportParams {
            footer_captions: Some(footer.clone()),
            ..ReportParams::default()
        }),
    )
    .unwrap();
    let bytes = serialize(&untitled, &StyleCatalog::default(), true).unwrap();
    let rows = parse_sheet_rows(&read_entry(&bytes, "xl/worksheets/sheet1.xml"));
    // header + 2 data + footer
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].len(), untitled.column_headers().len());

    let titled = TableSnapshot::new(
        "t",
        &cols,
        data,
        Some(ReportParams {
            title: Some("Titled".to_string()),
            footer_captions: Some(footer),
            ..ReportParams::default()
        }),
    )
    .unwrap();
    let bytes = serialize(&titled, &StyleCatalog::default(), true).unwrap();
    let rows = parse_sheet_rows(&read_entry(&bytes, "xl/worksheets/sheet1.xml"));
    assert_eq!(rows.len(), 5);

    // Stored values match the inputs.
    assert_eq!(rows[2][1].value.as_deref(), Some("x"));
    assert_eq!(rows[2][2].value.as_deref(), Some("1"));
    assert_eq!(rows[3][3].value.as_deref(), Some("right"));
}

#[test]
fn footer_underline_doubles_the_footer_cells() {
    let with = serialize_sample(false, true, true);
    let rows = parse_sheet_rows(&read_entry(&with, "xl/worksheets/sheet1.xml"));
    let footer = rows.last().unwrap();
    assert_eq!(footer.len(), 4);
    assert_eq!(footer[0].value.as_deref(), Some("Signed:"));
    assert_eq!(footer[1].value, None, "underline cell is blank");
    assert_eq!(footer[2].value.as_deref(), Some("Date:"));
    assert_eq!(footer[1].style, footer[3].style);

    let without = serialize_sample(false, true, false);
    let rows = parse_sheet_rows(&read_entry(&without, "xl/worksheets/sheet1.xml"));
    let footer = rows.last().unwrap();
    assert_eq!(footer.len(), 2);
}

#[test]
fn styles_part_carries_the_number_formats() {
    let bytes = serialize_sample(false, false, false);
    let styles = read_entry(&bytes, "xl/styles.xml");
    assert!(styles.contains(r#"formatCode="yyyy-mm-dd""#));
    assert!(styles.contains(r#"numFmtId="2""#));
}

#[test]
fn column_widths_are_declared() {
    let bytes = serialize_sample(false, false, false);
    let sheet = read_entry(&bytes, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains(r#"<col min="1" max="1" width="10.0000" customWidth="1"/>"#));
    assert!(sheet.contains(r#"<col min="2" max="2" width="15.0000" customWidth="1"/>"#));
}

#[test]
fn save_writes_a_readable_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.xlsx");
    let written = save_as_excel(
        &sample_snapshot(true, true),
        &StyleCatalog::default(),
        Some(&target),
        true,
    )
    .unwrap();
    assert_eq!(written, target);

    let bytes = std::fs::read(&written).unwrap();
    let names = entry_names(&bytes);
    assert!(names.iter().any(|n| n == "xl/worksheets/sheet1.xml"));
}

#[test]
fn legacy_xls_output_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.xls");
    let err = save_as_excel(
        &sample_snapshot(false, false),
        &StyleCatalog::default(),
        Some(&target),
        false,
    )
    .unwrap_err();
    assert!(err.to_string().contains(".xls"));
    assert!(!target.exists());
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.csv");
    assert!(save_as_excel(
        &sample_snapshot(false, false),
        &StyleCatalog::default(),
        Some(&target),
        false,
    )
    .is_err());
}
