mod arithmetic;
mod booleans;

use crate::{
    expressions::{BinaryOp, Expression, Literal},
    row::Row,
    tables::RelationSchema,
    DBError, DBResult,
};

use self::{
    arithmetic::{divide_impl, minus_impl, multiply_impl, plus_impl},
    booleans::{eq_impl, gt_impl, gte_impl, lt_impl, lte_impl, not_eq_impl, not_impl},
};

pub struct Interpreter {}

impl Interpreter {
    /// Evaluate `expr` for one row, resolving column names through `schema`.
    pub fn eval(expr: &Expression, row: &Row, schema: &RelationSchema) -> DBResult<Literal> {
        match expr {
            Expression::Literal(l) => Ok(l.clone()),
            Expression::FieldRef(name) => {
                let position = schema.position_of(name)?;
                row.get_field(position).cloned()
            }
            Expression::BinaryOp { op, left, right } => {
                let (left, right) = (
                    Self::eval(left, row, schema)?,
                    Self::eval(right, row, schema)?,
                );
                match op {
                    BinaryOp::Plus => plus_impl(left, right),
                    BinaryOp::Minus => minus_impl(left, right),
                    BinaryOp::Multiply => multiply_impl(left, right),
                    BinaryOp::Divide => divide_impl(left, right),
                    BinaryOp::Eq => eq_impl(left, right),
                    BinaryOp::NotEq => not_eq_impl(left, right),
                    BinaryOp::Gt => gt_impl(left, right),
                    BinaryOp::Gte => gte_impl(left, right),
                    BinaryOp::Lt => lt_impl(left, right),
                    BinaryOp::Lte => lte_impl(left, right),
                    BinaryOp::Unsupported(tag) => Err(DBError::InterpretingError(format!(
                        "unsupported binary operator: {tag}"
                    ))),
                }
            }
            Expression::Not(input) => not_impl(Self::eval(input, row, schema)?),
        }
    }

    /// Evaluate a predicate, which must produce a boolean.
    pub fn eval_predicate(
        expr: &Expression,
        row: &Row,
        schema: &RelationSchema,
    ) -> DBResult<bool> {
        Self::eval(expr, row, schema)?.as_bool()
    }
}
