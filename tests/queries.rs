use volcanodb::{
    data_types::DataType, expressions::Literal, row::Row, DBError, ExecutionOptions,
    ResultSet, VolcanoDB,
};

const DATA_DIR: &str = "tests/assets/data";

fn db() -> VolcanoDB {
    VolcanoDB::new(DATA_DIR).unwrap()
}

fn usa_orders_plan(method: &str) -> String {
    format!(
        r#"{{
            "op": "Project",
            "input": {{
                "op": "Select",
                "input": {{
                    "op": "Join",
                    "method": "{method}",
                    "left": {{ "op": "Scan", "table": "orders.csv", "as": "o" }},
                    "right": {{ "op": "Scan", "table": "customers.csv", "as": "c" }},
                    "condition": {{ "op": "EQ", "left": {{ "col": "o.cust" }}, "right": {{ "col": "c.id" }} }}
                }},
                "predicate": {{ "op": "EQ", "left": {{ "col": "c.country" }}, "right": {{ "const": "USA", "type": "string" }} }}
            }},
            "exprs": [
                {{ "as": "id", "expr": {{ "col": "o.id" }} }},
                {{ "as": "amt", "expr": {{ "col": "o.amt" }} }}
            ]
        }}"#
    )
}

fn order(id: i64, amt: f64) -> Row {
    Row::new(vec![Literal::Int(id), Literal::Float(amt)])
}

fn sorted(rs: &ResultSet) -> Vec<String> {
    let mut rows: Vec<String> = rs.rows.iter().map(|r| format!("{r:?}")).collect();
    rows.sort();
    rows
}

#[test]
fn nested_loop_join_returns_usa_orders() {
    let rs = db().execute(&usa_orders_plan("nested_loop")).unwrap();
    assert_eq!(rs.headers(), vec!["id", "amt"]);
    assert_eq!(rs.schema.get_field("amt").unwrap().data_type(), DataType::Float);
    assert_eq!(
        rs.rows,
        vec![
            order(100, 25.5),
            order(102, 7.25),
            order(103, 100.0),
            order(106, 42.0)
        ]
    );
}

#[test]
fn every_join_method_returns_the_same_rows() {
    let db = db();
    let expected = sorted(&db.execute(&usa_orders_plan("nested_loop")).unwrap());
    for method in ["block_nested_loop", "hash"] {
        let rs = db.execute(&usa_orders_plan(method)).unwrap();
        assert_eq!(sorted(&rs), expected, "method {method}");
    }
}

#[test]
fn pushdown_does_not_change_results() {
    let pushed = db();
    let not_pushed = db().with_options(ExecutionOptions {
        push_down_predicates: false,
        ..ExecutionOptions::default()
    });
    let left_only = r#"{
        "op": "Select",
        "input": {
            "op": "Join",
            "left": { "op": "Scan", "table": "orders.csv", "as": "o" },
            "right": { "op": "Scan", "table": "customers.csv", "as": "c" },
            "condition": { "op": "EQ", "left": { "col": "c.id" }, "right": { "col": "o.cust" } },
            "method": "hash"
        },
        "predicate": { "op": "GT", "left": { "col": "o.amt" }, "right": { "const": 9.5, "type": "float" } }
    }"#;
    let expected = not_pushed.execute(left_only).unwrap();
    assert_eq!(expected.rows.len(), 4);
    assert_eq!(sorted(&pushed.execute(left_only).unwrap()), sorted(&expected));

    for method in ["nested_loop", "block_nested_loop", "hash"] {
        let plan = usa_orders_plan(method);
        assert_eq!(
            sorted(&pushed.execute(&plan).unwrap()),
            sorted(&not_pushed.execute(&plan).unwrap())
        );
    }
}

#[test]
fn block_size_is_configurable_per_join() {
    let plan = r#"{
        "op": "Join",
        "method": "block_nested_loop",
        "block_size": 2,
        "left": { "op": "Scan", "table": "customers.csv", "as": "a" },
        "right": { "op": "Scan", "table": "customers.csv", "as": "b" },
        "condition": { "op": "EQ", "left": { "col": "a.country" }, "right": { "col": "b.country" } }
    }"#;
    let rs = db().execute(plan).unwrap();
    // USA pairs with itself twice, the other two countries once each
    assert_eq!(rs.rows.len(), 6);
    assert_eq!(rs.headers(), vec!["a.id", "a.country", "b.id", "b.country"]);
}

#[test]
fn limit_bounds_the_output() {
    let limited = |n: usize| {
        format!(
            r#"{{ "op": "Limit", "limit": {n}, "input": {{ "op": "Scan", "table": "orders.csv", "as": "o" }} }}"#
        )
    };
    let db = db();
    assert!(db.execute(&limited(0)).unwrap().rows.is_empty());
    assert_eq!(db.execute(&limited(3)).unwrap().rows.len(), 3);
    assert_eq!(db.execute(&limited(1000)).unwrap().rows.len(), 7);

    let with_offset = r#"{ "op": "Limit", "limit": 2, "offset": 5,
        "input": { "op": "Scan", "table": "orders.csv", "as": "o" } }"#;
    let rs = db.execute(with_offset).unwrap();
    assert_eq!(
        rs.rows.iter().map(|r| r.fields()[0].clone()).collect::<Vec<_>>(),
        vec![Literal::Int(105), Literal::Int(106)]
    );
}

#[test]
fn computed_projection_and_not() {
    let plan = r#"{
        "op": "Project",
        "input": {
            "op": "Select",
            "input": { "op": "Scan", "table": "flags.csv", "as": "f" },
            "predicate": { "op": "NOT", "expr": { "col": "f.active" } }
        },
        "exprs": [
            { "as": "id", "expr": { "col": "f.id" } },
            { "as": "half", "expr": { "op": "DIV", "left": { "col": "f.score" }, "right": { "const": 2 } } }
        ]
    }"#;
    let rs = db().execute(plan).unwrap();
    assert_eq!(
        rs.rows,
        vec![
            Row::new(vec![Literal::Int(2), Literal::Float(1.25)]),
            Row::new(vec![Literal::Int(4), Literal::Float(2.25)]),
        ]
    );
    assert_eq!(rs.format_row(&rs.rows[0]), "id: 2 | half: 1.25");
}

#[test]
fn result_set_serializes_headers_and_rows() {
    let plan = r#"{ "op": "Limit", "limit": 1, "input": { "op": "Scan", "table": "customers.csv", "as": "c" } }"#;
    let rs = db().execute(plan).unwrap();
    assert_eq!(
        serde_json::to_string(&rs).unwrap(),
        r#"{"headers":["c.id","c.country"],"rows":[[1,"USA"]]}"#
    );
}

#[test]
fn plan_errors_are_reported() {
    let db = db();
    let unknown_op = r#"{ "op": "Sort", "input": { "op": "Scan", "table": "orders.csv", "as": "o" } }"#;
    assert!(matches!(db.execute(unknown_op), Err(DBError::PlanError(_))));

    let missing_alias = r#"{ "op": "Scan", "table": "orders.csv" }"#;
    assert!(matches!(db.execute(missing_alias), Err(DBError::PlanError(_))));

    let unknown_table = r#"{ "op": "Scan", "table": "nope.csv", "as": "n" }"#;
    assert_eq!(
        db.execute(unknown_table).err(),
        Some(DBError::TableNotFound("nope.csv".to_owned()))
    );

    let bad_method = usa_orders_plan("merge");
    assert!(matches!(db.execute(&bad_method), Err(DBError::PlanError(_))));
}

#[test]
fn hash_join_needs_a_splittable_equality() {
    let db = db();
    let join = |condition: &str| {
        format!(
            r#"{{ "op": "Join", "method": "hash",
                "left": {{ "op": "Scan", "table": "orders.csv", "as": "o" }},
                "right": {{ "op": "Scan", "table": "customers.csv", "as": "c" }},
                "condition": {condition} }}"#
        )
    };
    let not_equality = join(r#"{ "op": "GT", "left": { "col": "o.cust" }, "right": { "col": "c.id" } }"#);
    assert!(matches!(db.execute(&not_equality), Err(DBError::PlanError(_))));

    let mixed_sides = join(
        r#"{ "op": "EQ",
            "left": { "op": "ADD", "left": { "col": "o.cust" }, "right": { "col": "c.id" } },
            "right": { "col": "c.id" } }"#,
    );
    assert!(matches!(db.execute(&mixed_sides), Err(DBError::PlanError(_))));
}

#[test]
fn evaluation_errors_abort_the_query() {
    let plan = r#"{
        "op": "Select",
        "input": { "op": "Scan", "table": "customers.csv", "as": "c" },
        "predicate": { "op": "GT", "left": { "col": "c.country" }, "right": { "const": 1, "type": "int" } }
    }"#;
    assert!(matches!(db().execute(plan), Err(DBError::InterpretingError(_))));

    let plan = r#"{
        "op": "Select",
        "input": { "op": "Scan", "table": "customers.csv", "as": "c" },
        "predicate": { "op": "EQ", "left": { "col": "c.name" }, "right": { "const": 1 } }
    }"#;
    assert_eq!(
        db().execute(plan).err(),
        Some(DBError::ColumnNotFound("c.name".to_owned()))
    );
}

#[test]
fn bad_rows_are_skipped_during_joins() {
    let plan = r#"{
        "op": "Join",
        "method": "hash",
        "left": { "op": "Scan", "table": "bad_orders.csv", "as": "b" },
        "right": { "op": "Scan", "table": "customers.csv", "as": "c" },
        "condition": { "op": "EQ", "left": { "col": "b.cust" }, "right": { "col": "c.id" } }
    }"#;
    let rs = db().execute(plan).unwrap();
    assert_eq!(rs.rows.len(), 2);
}

#[test]
fn opening_a_data_directory_registers_its_tables() {
    let db = db();
    let orders = db.catalog().try_get_schema("orders.csv").unwrap();
    assert_eq!(orders.headers(), vec!["id", "cust", "amt"]);
    assert!(matches!(
        db.catalog().try_get_schema("missing.csv"),
        Err(DBError::TableNotFound(_))
    ));
}
