use std::path::PathBuf;

use crate::{
    catalog::Catalog,
    expressions::Literal,
    row::Row,
    tables::{csv::CsvRecordReader, RelationSchema},
    DBError, DBResult,
};

use super::PhysicalPlan;

/// Reads a table file, qualifying every column with the scan's alias.
pub struct CsvScan {
    schema: RelationSchema,
    path: PathBuf,
    reader: Option<CsvRecordReader>,
}

impl CsvScan {
    /// Resolve the base schema under the file's name and qualify it with `alias`.
    pub fn new(path: PathBuf, alias: &str, catalog: &Catalog) -> DBResult<Self> {
        let table_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                DBError::PlanError(format!("invalid table path: {}", path.display()))
            })?;
        let schema = catalog.try_get_schema(table_name)?.qualify(alias);
        Ok(Self {
            schema,
            path,
            reader: None,
        })
    }

    fn parse_record(&self, record: &[String]) -> DBResult<Row> {
        if record.len() != self.schema.num_fields() {
            return Err(DBError::ParseError(format!(
                "expected {} fields but found {}",
                self.schema.num_fields(),
                record.len()
            )));
        }
        let cells = Iterator::zip(record.iter(), self.schema.get_fields())
            .map(|(raw, f)| {
                Literal::parse_as(raw, f.data_type()).map_err(|e| {
                    DBError::ParseError(format!(
                        "cannot parse '{raw}' as {} for column {}: {e}",
                        f.data_type(),
                        f.name()
                    ))
                })
            })
            .collect::<DBResult<Vec<_>>>()?;
        Ok(Row::new(cells))
    }
}

impl PhysicalPlan for CsvScan {
    fn open(&mut self) -> DBResult<()> {
        if self.reader.is_some() {
            return Ok(());
        }
        let mut reader = CsvRecordReader::new(&self.path)?;
        // skip header
        let _ = reader.try_read_next()?;
        self.reader = Some(reader);
        Ok(())
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        loop {
            let reader = self.reader.as_mut().ok_or_else(|| {
                DBError::StorageEngine(format!("{} is not opened", self.path.display()))
            })?;
            let Some(record) = reader.try_read_next()? else {
                return Ok(None);
            };
            match self.parse_record(&record) {
                Ok(row) => return Ok(Some(row)),
                Err(DBError::ParseError(msg)) => {
                    log::warn!("skipping row of {}: {msg}", self.path.display());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn close(&mut self) -> DBResult<()> {
        self.reader = None;
        Ok(())
    }

    fn schema(&self) -> &RelationSchema {
        &self.schema
    }
}
