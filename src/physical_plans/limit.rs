use crate::{row::Row, tables::RelationSchema, DBResult};

use super::PhysicalPlan;

/// Skips `offset` rows, then forwards at most `limit` rows.
pub struct Limit {
    offset: usize,
    limit: usize,
    child: Box<dyn PhysicalPlan>,
    skipped: usize,
    emitted: usize,
    opened: bool,
}

impl Limit {
    pub fn new(offset: usize, limit: usize, child: Box<dyn PhysicalPlan>) -> Self {
        Self {
            offset,
            limit,
            child,
            skipped: 0,
            emitted: 0,
            opened: false,
        }
    }
}

impl PhysicalPlan for Limit {
    fn open(&mut self) -> DBResult<()> {
        if !self.opened {
            self.skipped = 0;
            self.emitted = 0;
            self.opened = true;
        }
        self.child.open()
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        if self.emitted >= self.limit {
            return Ok(None);
        }
        while self.skipped < self.offset {
            if self.child.next()?.is_none() {
                return Ok(None);
            }
            self.skipped += 1;
        }
        match self.child.next()? {
            Some(row) => {
                self.emitted += 1;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) -> DBResult<()> {
        self.opened = false;
        self.child.close()
    }

    fn schema(&self) -> &RelationSchema {
        self.child.schema()
    }
}
