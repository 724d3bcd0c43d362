use crate::{
    expressions::Expression, interpreter::Interpreter, row::Row, tables::RelationSchema,
    DBError, DBResult,
};

use super::PhysicalPlan;

pub const DEFAULT_BLOCK_SIZE: usize = 100;

/// Nested loop join that pulls the left input in blocks of `block_size` rows.
///
/// Each buffered left row is matched against a full scan of the right input,
/// the right side being rewound between rows. Only the current block is held
/// in memory.
pub struct BlockNestedLoopJoin {
    left: Box<dyn PhysicalPlan>,
    right: Box<dyn PhysicalPlan>,
    condition: Expression,
    schema: RelationSchema,
    block_size: usize,
    block: Vec<Row>,
    block_index: usize,
    opened: bool,
}

impl BlockNestedLoopJoin {
    pub fn new(
        left: Box<dyn PhysicalPlan>,
        right: Box<dyn PhysicalPlan>,
        condition: Expression,
        block_size: usize,
    ) -> DBResult<Self> {
        if block_size == 0 {
            return Err(DBError::PlanError(
                "block size of a block nested loop join must be positive".to_string(),
            ));
        }
        let schema = RelationSchema::merge(left.schema(), right.schema());
        Ok(Self {
            left,
            right,
            condition,
            schema,
            block_size,
            block: Vec::with_capacity(block_size),
            block_index: 0,
            opened: false,
        })
    }

    /// Refill the block from the left input. Returns false once the left side is drained.
    fn load_next_block(&mut self) -> DBResult<bool> {
        self.block.clear();
        self.block_index = 0;
        while self.block.len() < self.block_size {
            match self.left.next()? {
                Some(row) => self.block.push(row),
                None => break,
            }
        }
        if self.block.is_empty() {
            return Ok(false);
        }
        log::trace!("loaded a block of {} left rows", self.block.len());
        self.right.rewind()?;
        Ok(true)
    }
}

impl PhysicalPlan for BlockNestedLoopJoin {
    fn open(&mut self) -> DBResult<()> {
        if self.opened {
            return Ok(());
        }
        self.left.open()?;
        self.right.open()?;
        self.load_next_block()?;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        while self.block_index < self.block.len() {
            match self.right.next()? {
                Some(right_row) => {
                    let combined = Row::concat(&self.block[self.block_index], &right_row);
                    if Interpreter::eval_predicate(&self.condition, &combined, &self.schema)? {
                        return Ok(Some(combined));
                    }
                }
                None => {
                    self.block_index += 1;
                    if self.block_index < self.block.len() {
                        self.right.rewind()?;
                    } else if !self.load_next_block()? {
                        return Ok(None);
                    }
                }
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> DBResult<()> {
        self.block.clear();
        self.block_index = 0;
        self.opened = false;
        self.left.close()?;
        self.right.close()
    }

    fn schema(&self) -> &RelationSchema {
        &self.schema
    }
}
