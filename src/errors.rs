use std::fmt::Display;
use std::num::{ParseFloatError, ParseIntError};

#[derive(Debug, PartialEq, Eq)]
pub enum DBError {
    TableNotFound(String),
    ColumnNotFound(String),
    PlanError(String),
    InterpretingError(String),
    DivisionByZero,
    ParseError(String),
    StorageEngine(String),
}

pub type DBResult<T> = Result<T, DBError>;

impl Display for DBError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DBError::TableNotFound(name) => write!(f, "table not found: {name}"),
            DBError::ColumnNotFound(name) => write!(f, "column not found: {name}"),
            DBError::PlanError(msg) => write!(f, "invalid plan: {msg}"),
            DBError::InterpretingError(msg) => write!(f, "evaluation failed: {msg}"),
            DBError::DivisionByZero => "division by zero".fmt(f),
            DBError::ParseError(msg) => write!(f, "parse error: {msg}"),
            DBError::StorageEngine(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for DBError {}

impl From<ParseIntError> for DBError {
    fn from(e: ParseIntError) -> Self {
        DBError::ParseError(e.to_string())
    }
}

impl From<ParseFloatError> for DBError {
    fn from(e: ParseFloatError) -> Self {
        DBError::ParseError(e.to_string())
    }
}

impl From<serde_json::Error> for DBError {
    fn from(e: serde_json::Error) -> Self {
        DBError::PlanError(e.to_string())
    }
}

impl From<std::io::Error> for DBError {
    fn from(e: std::io::Error) -> Self {
        DBError::StorageEngine(e.to_string())
    }
}
