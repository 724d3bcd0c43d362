use crate::{
    expressions::Expression, interpreter::Interpreter, row::Row, tables::RelationSchema,
    DBResult,
};

use super::PhysicalPlan;

pub struct Projection {
    projections: Vec<(String, Expression)>,
    child: Box<dyn PhysicalPlan>,
    schema: RelationSchema,
}

impl Projection {
    /// Output columns are named by their alias and typed from the child schema.
    pub fn new(
        projections: Vec<(String, Expression)>,
        child: Box<dyn PhysicalPlan>,
    ) -> DBResult<Self> {
        let schema = Self::output_schema(&projections, child.schema())?;
        Ok(Self {
            projections,
            child,
            schema,
        })
    }

    pub fn output_schema(
        projections: &[(String, Expression)],
        input: &RelationSchema,
    ) -> DBResult<RelationSchema> {
        let fields = projections
            .iter()
            .map(|(alias, expr)| expr.data_type(input).map(|t| (alias.clone(), t)))
            .collect::<DBResult<Vec<_>>>()?;
        Ok(RelationSchema::new(fields))
    }
}

impl PhysicalPlan for Projection {
    fn open(&mut self) -> DBResult<()> {
        self.child.open()
    }

    fn next(&mut self) -> DBResult<Option<Row>> {
        if let Some(row) = self.child.next()? {
            // expressions address the child's columns, not our aliases
            let cells = self
                .projections
                .iter()
                .map(|(_, expr)| Interpreter::eval(expr, &row, self.child.schema()))
                .collect::<DBResult<Vec<_>>>()?;
            Ok(Some(Row::new(cells)))
        } else {
            Ok(None)
        }
    }

    fn close(&mut self) -> DBResult<()> {
        self.child.close()
    }

    fn schema(&self) -> &RelationSchema {
        &self.schema
    }
}
