use crate::{
    expressions::Expression, interpreter::Interpreter, row::Row, tables::RelationSchema,
    DBResult,
};

use super::PhysicalPlan;

/// Tuple-at-a-time nested loop join.
///
/// The left input is the outer loop. For every left row the right input is
/// scanned to exhaustion and then rewound, so the right side is re-read once
/// per left row.
pub struct NestedLoopJoin {
    left: Box<dyn PhysicalPlan>,
    right: Box<dyn PhysicalPlan>,
    condition: Expression,
    schema: RelationSchema,
    current_left: Option<Row>,
    opened: bool,
}

impl NestedLoopJoin {
    pub fn new(
        left: Box<dyn PhysicalPlan>,
        right: Box<dyn PhysicalPlan>,
        condition: Expression,
    ) -> Self {
        let schema = RelationSchema::merge(left.schema(), right.schema());
        Self {
            left,
            right,
            condition,
            schema,
            current_left: None,
            opened: false,
        }
    }
}

impl PhysicalPlan for NestedLoopJoin {
    fn open(&mut self) -> DBResult<()> {
        if self.opened {
            return Ok(());
        }
        self.left.open()?;
        self.right.open()?;
        self.current_left = self.left.next()?;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        while let Some(left_row) = &self.current_left {
            match self.right.next()? {
                Some(right_row) => {
                    let combined = Row::concat(left_row, &right_row);
                    if Interpreter::eval_predicate(&self.condition, &combined, &self.schema)? {
                        return Ok(Some(combined));
                    }
                }
                None => {
                    self.current_left = self.left.next()?;
                    if self.current_left.is_some() {
                        self.right.rewind()?;
                    }
                }
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> DBResult<()> {
        self.current_left = None;
        self.opened = false;
        self.left.close()?;
        self.right.close()
    }

    fn schema(&self) -> &RelationSchema {
        &self.schema
    }
}
