use crate::{
    expressions::{BinaryOp, Literal},
    DBError::InterpretingError,
    DBResult,
};

pub fn eq_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    Ok(Literal::Bool(left == right))
}

pub fn not_eq_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    Ok(Literal::Bool(left != right))
}

pub fn gt_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    numeric_cmp(BinaryOp::Gt, &left, &right, |l, r| l > r)
}

pub fn gte_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    numeric_cmp(BinaryOp::Gte, &left, &right, |l, r| l >= r)
}

pub fn lt_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    numeric_cmp(BinaryOp::Lt, &left, &right, |l, r| l < r)
}

pub fn lte_impl(left: Literal, right: Literal) -> DBResult<Literal> {
    numeric_cmp(BinaryOp::Lte, &left, &right, |l, r| l <= r)
}

fn numeric_cmp(
    op: BinaryOp,
    left: &Literal,
    right: &Literal,
    cmp: fn(f64, f64) -> bool,
) -> DBResult<Literal> {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => Ok(Literal::Bool(cmp(l, r))),
        _ => Err(InterpretingError(format!(
            "{op} comparison not allowed on non-numeric {left:?} and {right:?}"
        ))),
    }
}

pub fn not_impl(input: Literal) -> DBResult<Literal> {
    match input {
        Literal::Bool(v) => Ok(Literal::Bool(!v)),
        input => Err(InterpretingError(format!(
            "NOT operator not implemented for {input:?}"
        ))),
    }
}
