use crate::{row::Row, tables::RelationSchema, DBError, DBResult};

use super::PhysicalPlan;

/// Leaf operator over rows already held in memory.
pub struct InMemTableScan {
    data: Vec<Row>,
    schema: RelationSchema,
    next: usize,
    opened: bool,
}

impl InMemTableScan {
    pub fn new(data: Vec<Row>, schema: RelationSchema) -> DBResult<Self> {
        if let Some(row) = data.iter().find(|r| r.num_fields() != schema.num_fields()) {
            return Err(DBError::PlanError(format!(
                "row of {} fields does not fit a schema of {} columns",
                row.num_fields(),
                schema.num_fields()
            )));
        }
        Ok(Self {
            data,
            schema,
            next: 0,
            opened: false,
        })
    }
}

impl PhysicalPlan for InMemTableScan {
    fn open(&mut self) -> DBResult<()> {
        if !self.opened {
            self.next = 0;
            self.opened = true;
        }
        Ok(())
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        if !self.opened {
            return Err(DBError::StorageEngine("in-memory scan is not opened".to_string()));
        }
        if self.data.len() > self.next {
            self.next += 1;
            Ok(Some(self.data[self.next - 1].clone()))
        } else {
            Ok(None)
        }
    }

    fn close(&mut self) -> DBResult<()> {
        self.opened = false;
        Ok(())
    }

    fn schema(&self) -> &RelationSchema {
        &self.schema
    }
}
