use std::collections::{HashMap, HashSet};

use crate::data_types::DataType;
use crate::{DBError, DBResult};

pub mod csv;

/// Ordered column metadata plus a name index.
/// Positions are dense, 0-based and follow the field order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelationSchema {
    fields: Vec<FieldInfo>,
    index: HashMap<String, usize>,
}

impl RelationSchema {
    pub fn new(fields: Vec<(String, DataType)>) -> Self {
        let mut schema = RelationSchema::empty();
        for (name, data_type) in fields {
            schema.add_field(name, data_type);
        }
        schema
    }

    pub fn empty() -> Self {
        RelationSchema::default()
    }

    pub fn add_field(&mut self, name: String, data_type: DataType) {
        let position = self.fields.len();
        // a duplicated name resolves to its latest position
        self.index.insert(name.clone(), position);
        self.fields.push(FieldInfo {
            name,
            data_type,
            position,
        });
    }

    pub fn get_fields(&self) -> &Vec<FieldInfo> {
        &self.fields
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn get_field(&self, name: &str) -> DBResult<&FieldInfo> {
        self.index
            .get(name)
            .map(|&position| &self.fields[position])
            .ok_or_else(|| DBError::ColumnNotFound(name.to_string()))
    }

    pub fn position_of(&self, name: &str) -> DBResult<usize> {
        self.get_field(name).map(|f| f.position)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn contains_all(&self, names: &HashSet<String>) -> bool {
        names.iter().all(|name| self.contains(name))
    }

    pub fn headers(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Same columns, each renamed to `alias.column`.
    pub fn qualify(&self, alias: &str) -> RelationSchema {
        let mut qualified = RelationSchema::empty();
        for field in &self.fields {
            qualified.add_field(format!("{alias}.{}", field.name), field.data_type);
        }
        qualified
    }

    /// Left columns followed by right columns, renumbered. Inputs are untouched.
    pub fn merge(left: &RelationSchema, right: &RelationSchema) -> RelationSchema {
        let mut merged = left.clone();
        for field in &right.fields {
            merged.add_field(field.name.clone(), field.data_type);
        }
        merged
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    name: String,
    data_type: DataType,
    position: usize,
}

impl FieldInfo {
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
