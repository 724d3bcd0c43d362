use std::fmt::Display;

use crate::{DBError, DBResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Float,
    String,
    Boolean,
}

impl DataType {
    /// Resolve a type name as written in schema descriptors and plan constants.
    pub fn from_name(name: &str) -> DBResult<Self> {
        match name {
            "int" => Ok(DataType::Int),
            "float" => Ok(DataType::Float),
            "string" => Ok(DataType::String),
            "bool" => Ok(DataType::Boolean),
            _ => Err(DBError::PlanError(format!("unknown data type: {name}"))),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Int => "int".fmt(f),
            DataType::Float => "float".fmt(f),
            DataType::String => "string".fmt(f),
            DataType::Boolean => "bool".fmt(f),
        }
    }
}
