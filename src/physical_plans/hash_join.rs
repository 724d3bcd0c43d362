use std::collections::HashMap;

use crate::{
    expressions::{Expression, Literal},
    interpreter::Interpreter,
    row::Row,
    tables::RelationSchema,
    DBResult,
};

use super::PhysicalPlan;

/// Equi-join that materializes the right (build) input into a multi-map keyed
/// by `build_key`, then streams the left (probe) input through it.
///
/// Every build row with an equal key is kept, so one-to-many and many-to-many
/// joins emit all combinations. The build input is read exactly once.
pub struct HashJoin {
    probe: Box<dyn PhysicalPlan>,
    build: Box<dyn PhysicalPlan>,
    probe_key: Expression,
    build_key: Expression,
    schema: RelationSchema,
    hash_table: HashMap<Literal, Vec<Row>>,
    probe_row: Option<Row>,
    probe_row_key: Option<Literal>,
    match_index: usize,
    opened: bool,
}

impl HashJoin {
    /// `probe_key` must only reference `probe` columns and `build_key` only `build` columns.
    pub fn new(
        probe: Box<dyn PhysicalPlan>,
        build: Box<dyn PhysicalPlan>,
        probe_key: Expression,
        build_key: Expression,
    ) -> Self {
        let schema = RelationSchema::merge(probe.schema(), build.schema());
        Self {
            probe,
            build,
            probe_key,
            build_key,
            schema,
            hash_table: HashMap::new(),
            probe_row: None,
            probe_row_key: None,
            match_index: 0,
            opened: false,
        }
    }

    fn build_hash_table(&mut self) -> DBResult<()> {
        self.hash_table.clear();
        self.build.open()?;
        let mut num_rows = 0;
        while let Some(row) = self.build.next()? {
            let key = Interpreter::eval(&self.build_key, &row, self.build.schema())?;
            num_rows += 1;
            if matches!(key, Literal::Float(v) if v.is_nan()) {
                continue;
            }
            self.hash_table.entry(key).or_default().push(row);
        }
        self.build.close()?;
        log::debug!(
            "hash join built {} rows into {} buckets",
            num_rows,
            self.hash_table.len()
        );
        Ok(())
    }
}

impl PhysicalPlan for HashJoin {
    fn open(&mut self) -> DBResult<()> {
        if self.opened {
            return Ok(());
        }
        self.build_hash_table()?;
        self.probe.open()?;
        self.probe_row = None;
        self.probe_row_key = None;
        self.match_index = 0;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        loop {
            if let (Some(probe_row), Some(key)) = (&self.probe_row, &self.probe_row_key) {
                let matched = self
                    .hash_table
                    .get(key)
                    .and_then(|bucket| bucket.get(self.match_index));
                if let Some(build_row) = matched {
                    self.match_index += 1;
                    return Ok(Some(Row::concat(probe_row, build_row)));
                }
            }

            match self.probe.next()? {
                Some(row) => {
                    let key = Interpreter::eval(&self.probe_key, &row, self.probe.schema())?;
                    self.probe_row_key = Some(key);
                    self.probe_row = Some(row);
                    self.match_index = 0;
                }
                None => {
                    self.probe_row = None;
                    self.probe_row_key = None;
                    return Ok(None);
                }
            }
        }
    }

    fn close(&mut self) -> DBResult<()> {
        self.hash_table.clear();
        self.probe_row = None;
        self.probe_row_key = None;
        self.opened = false;
        self.probe.close()?;
        self.build.close()
    }

    fn schema(&self) -> &RelationSchema {
        &self.schema
    }
}
