use serde_json::Value;

use crate::{
    data_types::DataType,
    expressions::{BinaryOp, Expression, Literal},
    logical_plans::{JoinMethod, LogicalPlan},
    DBError, DBResult,
};

pub fn parse_plan_str(plan: &str) -> DBResult<LogicalPlan> {
    let node: Value = serde_json::from_str(plan)?;
    parse_plan(&node)
}

/// Translate a JSON plan node, e.g. `{"op": "Scan", "table": "orders.csv", "as": "o"}`.
pub fn parse_plan(node: &Value) -> DBResult<LogicalPlan> {
    let op = str_field(node, "op")?;
    match op {
        "Scan" => Ok(LogicalPlan::Scan {
            table: str_field(node, "table")?.to_string(),
            alias: str_field(node, "as")?.to_string(),
        }),
        "Select" => Ok(LogicalPlan::Filter {
            expression: parse_expression(field(node, "predicate")?)?,
            child: Box::new(parse_plan(field(node, "input")?)?),
        }),
        "Project" => {
            let exprs = field(node, "exprs")?
                .as_array()
                .ok_or_else(|| malformed("exprs", "an array"))?;
            let expressions = exprs
                .iter()
                .map(|p| {
                    let alias = str_field(p, "as")?.to_string();
                    parse_expression(field(p, "expr")?).map(|expr| (alias, expr))
                })
                .collect::<DBResult<Vec<_>>>()?;
            Ok(LogicalPlan::Projection {
                expressions,
                child: Box::new(parse_plan(field(node, "input")?)?),
            })
        }
        "Join" => {
            let method = match node.get("method") {
                None | Some(Value::Null) => JoinMethod::default(),
                Some(_) => JoinMethod::from_tag(str_field(node, "method")?)?,
            };
            let block_size = match node.get("block_size") {
                None | Some(Value::Null) => None,
                Some(_) => Some(usize_field(node, "block_size")?),
            };
            Ok(LogicalPlan::Join {
                left: Box::new(parse_plan(field(node, "left")?)?),
                right: Box::new(parse_plan(field(node, "right")?)?),
                condition: parse_expression(field(node, "condition")?)?,
                method,
                block_size,
            })
        }
        "Limit" => {
            let offset = match node.get("offset") {
                None | Some(Value::Null) => 0,
                Some(_) => usize_field(node, "offset")?,
            };
            Ok(LogicalPlan::Limit {
                offset,
                limit: usize_field(node, "limit")?,
                child: Box::new(parse_plan(field(node, "input")?)?),
            })
        }
        _ => Err(DBError::PlanError(format!("unsupported operator in plan: {op}"))),
    }
}

/// Translate a JSON expression: `{"const": 1, "type": "int"}`, `{"col": "o.id"}`,
/// `{"op": "NOT", "expr": ...}` or `{"op": "EQ", "left": ..., "right": ...}`.
pub fn parse_expression(node: &Value) -> DBResult<Expression> {
    if let Some(value) = node.get("const") {
        return parse_constant(value, node.get("type")).map(Expression::Literal);
    }
    if node.get("col").is_some() {
        return Ok(Expression::FieldRef(str_field(node, "col")?.to_string()));
    }
    if node.get("op").is_some() {
        let op = str_field(node, "op")?;
        if op == "NOT" {
            let input = parse_expression(field(node, "expr")?)?;
            return Ok(Expression::Not(Box::new(input)));
        }
        return Ok(Expression::binary(
            BinaryOp::from_tag(op),
            parse_expression(field(node, "left")?)?,
            parse_expression(field(node, "right")?)?,
        ));
    }
    Err(DBError::PlanError(format!("invalid expression: {node}")))
}

fn parse_constant(value: &Value, type_hint: Option<&Value>) -> DBResult<Literal> {
    let data_type = match type_hint {
        Some(Value::String(name)) => DataType::from_name(name)?,
        Some(other) => return Err(malformed("type", &format!("a type name, got {other}"))),
        // without a declared type, the JSON value decides
        None => match value {
            Value::Bool(_) => DataType::Boolean,
            Value::String(_) => DataType::String,
            Value::Number(n) if n.is_i64() => DataType::Int,
            Value::Number(_) => DataType::Float,
            _ => return Err(malformed("const", "a scalar")),
        },
    };
    let literal = match data_type {
        DataType::Int => value.as_i64().map(Literal::Int),
        DataType::Float => value.as_f64().map(Literal::Float),
        DataType::String => value.as_str().map(|s| Literal::String(s.to_string())),
        DataType::Boolean => value.as_bool().map(Literal::Bool),
    };
    literal.ok_or_else(|| {
        DBError::PlanError(format!("constant {value} is not a valid {data_type}"))
    })
}

fn field<'a>(node: &'a Value, name: &str) -> DBResult<&'a Value> {
    node.get(name)
        .ok_or_else(|| DBError::PlanError(format!("missing field '{name}' in {node}")))
}

fn str_field<'a>(node: &'a Value, name: &str) -> DBResult<&'a str> {
    field(node, name)?
        .as_str()
        .ok_or_else(|| malformed(name, "a string"))
}

fn usize_field(node: &Value, name: &str) -> DBResult<usize> {
    field(node, name)?
        .as_u64()
        .map(|v| v as usize)
        .ok_or_else(|| malformed(name, "a non-negative integer"))
}

fn malformed(name: &str, expected: &str) -> DBError {
    DBError::PlanError(format!("field '{name}' must be {expected}"))
}
