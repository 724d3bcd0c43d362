use crate::{
    expressions::{BinaryOp, Literal},
    DBError::{self, InterpretingError},
    DBResult,
};

/// Both operands widened to f64; text and booleans are rejected.
fn numeric_operands(op: BinaryOp, left: &Literal, right: &Literal) -> DBResult<(f64, f64)> {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(InterpretingError(format!(
            "arithmetic {op} not allowed on non-numeric {left:?} and {right:?}"
        ))),
    }
}

pub fn plus_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    let (l, r) = numeric_operands(BinaryOp::Plus, &left, &right)?;
    Ok(Literal::Float(l + r))
}

pub fn minus_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    let (l, r) = numeric_operands(BinaryOp::Minus, &left, &right)?;
    Ok(Literal::Float(l - r))
}

pub fn multiply_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    let (l, r) = numeric_operands(BinaryOp::Multiply, &left, &right)?;
    Ok(Literal::Float(l * r))
}

pub fn divide_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    let (l, r) = numeric_operands(BinaryOp::Divide, &left, &right)?;
    if r == 0.0 {
        return Err(DBError::DivisionByZero);
    }
    Ok(Literal::Float(l / r))
}
