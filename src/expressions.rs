use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use serde::Serialize;

use crate::data_types::DataType;
use crate::tables::RelationSchema;
use crate::{DBError, DBResult};

#[derive(Debug, Clone)]
pub enum Expression {
    Literal(Literal),
    /// Reference to a column by its qualified name, e.g. `o.amount`.
    FieldRef(String),
    BinaryOp {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Not(Box<Expression>),
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Literal(Literal::String(s)) => write!(f, "'{s}'"),
            Expression::Literal(l) => l.fmt(f),
            Expression::FieldRef(name) => name.fmt(f),
            Expression::BinaryOp { op, left, right } => {
                write!(f, "({left} {op} {right})")
            }
            Expression::Not(input) => write!(f, "NOT {input}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Multiply,
    Divide,
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// An operator tag the evaluator does not know; fails when evaluated.
    Unsupported(String),
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Plus => "+".fmt(f),
            BinaryOp::Minus => "-".fmt(f),
            BinaryOp::Multiply => "*".fmt(f),
            BinaryOp::Divide => "/".fmt(f),
            BinaryOp::Eq => "=".fmt(f),
            BinaryOp::NotEq => "<>".fmt(f),
            BinaryOp::Gt => ">".fmt(f),
            BinaryOp::Gte => ">=".fmt(f),
            BinaryOp::Lt => "<".fmt(f),
            BinaryOp::Lte => "<=".fmt(f),
            BinaryOp::Unsupported(tag) => tag.fmt(f),
        }
    }
}

impl BinaryOp {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ADD" => BinaryOp::Plus,
            "SUB" => BinaryOp::Minus,
            "MUL" => BinaryOp::Multiply,
            "DIV" => BinaryOp::Divide,
            "EQ" => BinaryOp::Eq,
            "NEQ" => BinaryOp::NotEq,
            "GT" => BinaryOp::Gt,
            "GTE" => BinaryOp::Gte,
            "LT" => BinaryOp::Lt,
            "LTE" => BinaryOp::Lte,
            other => BinaryOp::Unsupported(other.to_string()),
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Multiply | BinaryOp::Divide
        )
    }

    pub fn is_boolean_op(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Gt
                | BinaryOp::Gte
                | BinaryOp::Lt
                | BinaryOp::Lte
        )
    }
}

impl Expression {
    pub fn column(name: &str) -> Self {
        Expression::FieldRef(name.to_string())
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Qualified names of every column this expression reads.
    pub fn referenced_columns(&self) -> HashSet<String> {
        let mut columns = HashSet::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns(&self, columns: &mut HashSet<String>) {
        match self {
            Expression::Literal(_) => {}
            Expression::FieldRef(name) => {
                columns.insert(name.clone());
            }
            Expression::BinaryOp { left, right, .. } => {
                left.collect_columns(columns);
                right.collect_columns(columns);
            }
            Expression::Not(input) => input.collect_columns(columns),
        }
    }

    /// Static output type of this expression against an input schema.
    pub fn data_type(&self, schema: &RelationSchema) -> DBResult<DataType> {
        match self {
            Expression::Literal(l) => Ok(l.data_type()),
            Expression::FieldRef(name) => Ok(schema.get_field(name)?.data_type()),
            Expression::BinaryOp { op, left, right } => {
                left.data_type(schema)?;
                right.data_type(schema)?;
                match op {
                    op if op.is_arithmetic() => Ok(DataType::Float),
                    op if op.is_boolean_op() => Ok(DataType::Boolean),
                    _ => Ok(DataType::String),
                }
            }
            Expression::Not(input) => {
                input.data_type(schema)?;
                Ok(DataType::Boolean)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

/// Values of different kinds are never equal, an int never equals a float.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(l), Self::Int(r)) => l == r,
            (Self::Float(l), Self::Float(r)) => l == r,
            (Self::String(l), Self::String(r)) => l == r,
            (Self::Bool(l), Self::Bool(r)) => l == r,
            _ => false,
        }
    }
}

/// Needed to use Literal as a hash join key.
/// Float NaN is the one exception to reflexivity: it never equals itself, as
/// with EQ. Hash joins drop NaN build keys instead of inserting them.
impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Literal::Int(v) => v.hash(state),
            // 0.0 and -0.0 compare equal and must hash alike
            Literal::Float(v) if *v == 0.0 => 0u64.hash(state),
            Literal::Float(v) => v.to_bits().hash(state),
            Literal::String(v) => v.hash(state),
            Literal::Bool(v) => v.hash(state),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(v) => v.fmt(f),
            Literal::Float(v) => v.fmt(f),
            Literal::String(v) => v.fmt(f),
            Literal::Bool(v) => v.fmt(f),
        }
    }
}

impl Literal {
    pub fn as_bool(&self) -> DBResult<bool> {
        match self {
            Literal::Bool(v) => Ok(*v),
            other => Err(DBError::InterpretingError(format!(
                "expected a boolean but got {other:?}"
            ))),
        }
    }

    /// Numeric value widened to f64, `None` for text and booleans.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(v) => Some(*v as f64),
            Literal::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Literal::Int(_) => DataType::Int,
            Literal::Float(_) => DataType::Float,
            Literal::String(_) => DataType::String,
            Literal::Bool(_) => DataType::Boolean,
        }
    }

    /// Parse a raw text field into a value of the given type.
    /// Booleans are truthy for `true` and `1` and never fail.
    pub fn parse_as(raw: &str, data_type: DataType) -> DBResult<Literal> {
        match data_type {
            DataType::Int => Ok(Literal::Int(raw.trim().parse::<i64>()?)),
            DataType::Float => Ok(Literal::Float(raw.trim().parse::<f64>()?)),
            DataType::String => Ok(Literal::String(raw.to_string())),
            DataType::Boolean => Ok(Literal::Bool(raw == "true" || raw == "1")),
        }
    }
}
