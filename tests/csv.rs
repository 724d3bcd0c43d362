use std::path::PathBuf;

use volcanodb::{
    catalog::Catalog,
    expressions::Literal,
    physical_plans::{collect_rows, CsvScan, PhysicalPlan},
    row::Row,
    tables::csv::CsvRecordReader,
    DBError,
};

const DATA_DIR: &str = "tests/assets/data";

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.load_schemas(&PathBuf::from(DATA_DIR)).unwrap();
    catalog
}

fn scan(table: &str, alias: &str) -> CsvScan {
    CsvScan::new(PathBuf::from(DATA_DIR).join(table), alias, &catalog()).unwrap()
}

#[test]
fn scan_qualifies_columns_with_the_alias() {
    let scan = scan("orders.csv", "o");
    assert_eq!(scan.schema().headers(), vec!["o.id", "o.cust", "o.amt"]);
}

#[test]
fn scan_skips_the_header_and_types_every_value() {
    let mut scan = scan("orders.csv", "o");
    let rows = collect_rows(&mut scan).unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(
        rows[0],
        Row::new(vec![Literal::Int(100), Literal::Int(1), Literal::Float(25.5)])
    );
    for row in &rows {
        for (value, field) in row.fields().iter().zip(scan.schema().get_fields()) {
            assert_eq!(value.data_type(), field.data_type());
        }
    }
}

#[test]
fn booleans_are_truthy_for_true_and_one() {
    let mut scan = scan("flags.csv", "f");
    let rows = collect_rows(&mut scan).unwrap();
    let active: Vec<&Literal> = rows.iter().map(|r| &r.fields()[1]).collect();
    assert_eq!(
        active,
        vec![
            &Literal::Bool(true),
            &Literal::Bool(false),
            &Literal::Bool(true),
            &Literal::Bool(false)
        ]
    );
    // last line has no terminator
    assert_eq!(rows[3].fields()[2], Literal::Float(4.5));
}

#[test]
fn unparsable_rows_are_skipped_not_fatal() {
    let mut scan = scan("bad_orders.csv", "b");
    let rows = collect_rows(&mut scan).unwrap();
    assert_eq!(
        rows,
        vec![
            Row::new(vec![Literal::Int(1), Literal::Int(1), Literal::Float(5.0)]),
            Row::new(vec![Literal::Int(3), Literal::Int(3), Literal::Float(7.5)]),
        ]
    );
}

#[test]
fn rewinding_a_scan_restarts_from_the_first_row() {
    let mut scan = scan("customers.csv", "c");
    scan.open().unwrap();
    let first = scan.next().unwrap();
    scan.next().unwrap();
    scan.rewind().unwrap();
    assert_eq!(scan.next().unwrap(), first);
    scan.close().unwrap();
}

#[test]
fn scan_of_an_unknown_table_fails() {
    let result = CsvScan::new(PathBuf::from(DATA_DIR).join("nope.csv"), "n", &catalog());
    assert!(matches!(result, Err(DBError::TableNotFound(name)) if name == "nope.csv"));
}

#[test]
fn record_reader_returns_raw_fields() {
    let mut reader =
        CsvRecordReader::new(&PathBuf::from(DATA_DIR).join("customers.csv")).unwrap();
    assert_eq!(
        reader.try_read_next().unwrap(),
        Some(vec!["id".to_owned(), "country".to_owned()])
    );
    let mut count = 0;
    while reader.try_read_next().unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 4);
    assert_eq!(reader.try_read_next().unwrap(), None);
}
