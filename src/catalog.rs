use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::{data_types::DataType, tables::RelationSchema, DBError, DBResult};

/// Maps a table's backing file name (e.g. `orders.csv`) to its base schema.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, RelationSchema>,
}

/// On-disk schema descriptor, one per table.
#[derive(Debug, Deserialize)]
struct SchemaDescriptor {
    file: String,
    columns: Vec<ColumnDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ColumnDescriptor {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every `*.json` schema descriptor found in `data_dir`.
    pub fn load_schemas(&mut self, data_dir: &Path) -> DBResult<()> {
        log::debug!("scanning {} for schema files", data_dir.display());
        let entries = fs::read_dir(data_dir).map_err(|e| {
            DBError::StorageEngine(format!("read dir {} failed: {e}", data_dir.display()))
        })?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                self.load_schema_file(&path)?;
            }
        }
        Ok(())
    }

    fn load_schema_file(&mut self, path: &Path) -> DBResult<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| DBError::StorageEngine(format!("read {} failed: {e}", path.display())))?;
        let descriptor: SchemaDescriptor = serde_json::from_str(&content)?;
        let fields = descriptor
            .columns
            .into_iter()
            .map(|c| DataType::from_name(&c.data_type).map(|t| (c.name, t)))
            .collect::<DBResult<Vec<_>>>()?;
        log::info!(
            "registered table {} ({} columns) from {}",
            descriptor.file,
            fields.len(),
            path.display()
        );
        self.register(descriptor.file, RelationSchema::new(fields));
        Ok(())
    }

    pub fn register(&mut self, table_name: String, schema: RelationSchema) {
        self.tables.insert(table_name, schema);
    }

    pub fn try_get_schema(&self, table_name: &str) -> DBResult<&RelationSchema> {
        self.tables
            .get(table_name)
            .ok_or_else(|| DBError::TableNotFound(table_name.to_string()))
    }
}
