use serde::Serialize;

use crate::expressions::Literal;
use crate::{DBError, DBResult};

/// A tuple: values bound to a schema by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row {
    fields: Vec<Literal>,
}

impl Row {
    pub fn new(fields: Vec<Literal>) -> Self {
        Row { fields }
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[Literal] {
        &self.fields
    }

    pub fn get_field(&self, index: usize) -> DBResult<&Literal> {
        self.fields.get(index).ok_or_else(|| {
            DBError::InterpretingError(format!(
                "field index {index} out of bound for a row of {} fields",
                self.fields.len()
            ))
        })
    }

    /// The left row's fields followed by the right row's, as joins emit them.
    pub fn concat(left: &Row, right: &Row) -> Row {
        let mut fields = Vec::with_capacity(left.num_fields() + right.num_fields());
        fields.extend_from_slice(&left.fields);
        fields.extend_from_slice(&right.fields);
        Row { fields }
    }
}
