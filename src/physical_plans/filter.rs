use crate::{
    errors::DBResult, expressions::Expression, interpreter::Interpreter, row::Row,
    tables::RelationSchema,
};

use super::PhysicalPlan;

pub struct Filter {
    expression: Expression,
    child: Box<dyn PhysicalPlan>,
}

impl Filter {
    pub fn new(expression: Expression, child: Box<dyn PhysicalPlan>) -> Self {
        Self { expression, child }
    }
}

impl PhysicalPlan for Filter {
    fn open(&mut self) -> DBResult<()> {
        self.child.open()
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        while let Some(row) = self.child.next()? {
            if Interpreter::eval_predicate(&self.expression, &row, self.child.schema())? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> DBResult<()> {
        self.child.close()
    }

    fn schema(&self) -> &RelationSchema {
        self.child.schema()
    }
}
