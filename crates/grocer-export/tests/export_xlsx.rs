//! Integration tests for `export_outcome` writing real workbooks into a
//! temporary directory.

use calamine::{open_workbook, Data, Reader, Xlsx};
use grocer_core::{CategoryKind, CategoryMeta, CategoryTarget, FetchOutcome, ProductRecord};
use grocer_export::{export_outcome, ExportSummary, COLUMNS};

fn record(sku: &str) -> ProductRecord {
    ProductRecord {
        sku: sku.to_owned(),
        product_code: "NA".to_owned(),
        name: format!("Product {sku}"),
        mrp: Some(3.0),
        cost_price: None,
        unit_weight_label: "NA".to_owned(),
        image_url: "NA".to_owned(),
        formatted_details: "Brand:\n\tHearth\n\n".to_owned(),
        nutrition_facts: "NA".to_owned(),
        product_url: format!("https://grocery.example.com/ip/{sku}"),
    }
}

fn meta() -> CategoryMeta {
    CategoryMeta {
        primary_name: "Bakery".to_owned(),
        secondary_name: "Bread".to_owned(),
        shelf_name: None,
        total_product_count: 3,
        total_page_count: 1,
    }
}

fn target() -> CategoryTarget {
    CategoryTarget {
        kind: CategoryKind::Node,
        identifier: "12345".to_owned(),
        source_url: "https://grocery.example.com/browse?aisle=12345".to_owned(),
    }
}

/// Every row of the `products` sheet, header included.
fn read_sheet(path: &std::path::Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook should open");
    let range = workbook
        .worksheet_range("products")
        .expect("products sheet should exist");
    range.rows().map(<[Data]>::to_vec).collect()
}

fn text(s: &str) -> Data {
    Data::String(s.to_owned())
}

#[test]
fn writes_workbook_with_one_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Bakery_Bread.xlsx");
    let outcome = FetchOutcome {
        records: vec![record("1"), record("2"), record("3")],
        had_error: false,
    };

    let summary = export_outcome(&outcome, &meta(), &target(), &path).expect("export should succeed");

    assert_eq!(
        summary,
        ExportSummary::Written {
            path: path.clone(),
            rows: 3
        }
    );

    let sheet = read_sheet(&path);
    assert_eq!(sheet.len(), 4, "header plus one row per record");
    let header: Vec<Data> = COLUMNS.iter().map(|c| text(c)).collect();
    assert_eq!(sheet[0], header);
    assert_eq!(
        sheet[1],
        vec![
            text("1"),
            text("Product 1"),
            text("Bakery"),
            text("Bread"),
            Data::Float(3.0),
            Data::Empty,
            text("NA"),
            text("Brand:\n\tHearth\n\n"),
            text("NA"),
            text("NA"),
            text("https://grocery.example.com/ip/1"),
            text("https://grocery.example.com/browse?aisle=12345"),
        ]
    );
    let skus: Vec<&Data> = sheet[1..].iter().map(|row| &row[0]).collect();
    assert_eq!(skus, vec![&text("1"), &text("2"), &text("3")]);
}

#[test]
fn partial_outcome_is_still_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.xlsx");
    let outcome = FetchOutcome {
        records: vec![record("1"), record("2")],
        had_error: true,
    };

    let summary = export_outcome(&outcome, &meta(), &target(), &path).unwrap();

    assert!(matches!(summary, ExportSummary::Written { rows: 2, .. }));
    let sheet = read_sheet(&path);
    assert_eq!(sheet.len(), 3, "header plus the two fetched records");
    assert_eq!(sheet[2][0], text("2"));
}

#[test]
fn empty_outcome_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let summary = export_outcome(&FetchOutcome::default(), &meta(), &target(), &path).unwrap();

    assert_eq!(summary, ExportSummary::NothingToSave);
    assert!(!path.exists());
}

#[test]
fn empty_outcome_with_error_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    let outcome = FetchOutcome {
        records: Vec::new(),
        had_error: true,
    };

    let summary = export_outcome(&outcome, &meta(), &target(), &path).unwrap();

    assert_eq!(summary, ExportSummary::NothingToSave);
    assert!(!path.exists());
}

#[test]
fn missing_parent_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.xlsx");
    let outcome = FetchOutcome {
        records: vec![record("1")],
        had_error: false,
    };

    let result = export_outcome(&outcome, &meta(), &target(), &path);

    assert!(
        matches!(result, Err(grocer_export::ExportError::Xlsx { .. })),
        "expected Xlsx error, got: {result:?}"
    );
}
