use volcanodb::{catalog::Catalog, data_types::DataType, tables::RelationSchema, DBError};

fn schema(names: &[&str]) -> RelationSchema {
    RelationSchema::new(
        names
            .iter()
            .map(|n| (n.to_string(), DataType::Int))
            .collect(),
    )
}

#[test]
fn merge_appends_right_columns_with_contiguous_positions() {
    let left = schema(&["o.id", "o.cust"]);
    let right = schema(&["c.id"]);
    let merged = RelationSchema::merge(&left, &right);

    assert_eq!(merged.headers(), vec!["o.id", "o.cust", "c.id"]);
    let positions: Vec<usize> = merged.get_fields().iter().map(|f| f.position()).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(merged.position_of("c.id"), Ok(2));

    // inputs are left untouched
    assert_eq!(left.num_fields(), 2);
    assert_eq!(right.position_of("c.id"), Ok(0));
}

#[test]
fn merge_is_associative_in_column_order() {
    let (a, b, c) = (schema(&["a.x", "a.y"]), schema(&["b.x"]), schema(&["c.x", "c.y"]));
    let left_first = RelationSchema::merge(&RelationSchema::merge(&a, &b), &c);
    let right_first = RelationSchema::merge(&a, &RelationSchema::merge(&b, &c));
    assert_eq!(left_first.get_fields(), right_first.get_fields());
}

#[test]
fn qualify_prefixes_every_column_with_the_alias() {
    let base = RelationSchema::new(vec![
        ("id".to_owned(), DataType::Int),
        ("country".to_owned(), DataType::String),
    ]);
    let qualified = base.qualify("c");
    assert_eq!(qualified.headers(), vec!["c.id", "c.country"]);
    assert_eq!(
        qualified.get_field("c.country").map(|f| f.data_type()),
        Ok(DataType::String)
    );
    assert_eq!(
        qualified.get_field("country"),
        Err(DBError::ColumnNotFound("country".to_owned()))
    );
}

#[test]
fn catalog_lookup_fails_for_unknown_tables() {
    let mut catalog = Catalog::new();
    catalog.register("orders.csv".to_owned(), schema(&["id"]));
    assert!(catalog.try_get_schema("orders.csv").is_ok());
    assert_eq!(
        catalog.try_get_schema("missing.csv"),
        Err(DBError::TableNotFound("missing.csv".to_owned()))
    );
}

#[test]
fn catalog_loads_schema_descriptors_from_a_directory() {
    let mut catalog = Catalog::new();
    catalog
        .load_schemas(std::path::Path::new("tests/assets/data"))
        .unwrap();
    let orders = catalog.try_get_schema("orders.csv").unwrap();
    assert_eq!(orders.headers(), vec!["id", "cust", "amt"]);
    assert_eq!(orders.get_field("amt").unwrap().data_type(), DataType::Float);
    let flags = catalog.try_get_schema("flags.csv").unwrap();
    assert_eq!(flags.get_field("active").unwrap().data_type(), DataType::Boolean);
}
