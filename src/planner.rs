use std::path::Path;

use crate::{
    catalog::Catalog,
    expressions::{BinaryOp, Expression},
    logical_plans::{JoinMethod, LogicalPlan},
    physical_plans::{
        BlockNestedLoopJoin, CsvScan, Filter, HashJoin, Limit, NestedLoopJoin, PhysicalPlan,
        Projection,
    },
    tables::RelationSchema,
    DBError, DBResult,
};

/// Turns an optimized logical plan into a tree of operators.
pub struct PhysicalPlanner<'a> {
    catalog: &'a Catalog,
    data_dir: &'a Path,
    default_block_size: usize,
}

impl<'a> PhysicalPlanner<'a> {
    pub fn new(catalog: &'a Catalog, data_dir: &'a Path, default_block_size: usize) -> Self {
        Self {
            catalog,
            data_dir,
            default_block_size,
        }
    }

    pub fn planning(&self, logical_plan: LogicalPlan) -> DBResult<Box<dyn PhysicalPlan>> {
        match logical_plan {
            LogicalPlan::Scan { table, alias } => {
                let path = self.data_dir.join(&table);
                Ok(Box::new(CsvScan::new(path, &alias, self.catalog)?))
            }
            LogicalPlan::Filter { expression, child } => {
                let child_plan = self.planning(*child)?;
                Ok(Box::new(Filter::new(expression, child_plan)))
            }
            LogicalPlan::Projection { expressions, child } => {
                let child_plan = self.planning(*child)?;
                Ok(Box::new(Projection::new(expressions, child_plan)?))
            }
            LogicalPlan::Limit {
                offset,
                limit,
                child,
            } => {
                let child_plan = self.planning(*child)?;
                Ok(Box::new(Limit::new(offset, limit, child_plan)))
            }
            LogicalPlan::Join {
                left,
                right,
                condition,
                method,
                block_size,
            } => {
                let left_plan = self.planning(*left)?;
                let right_plan = self.planning(*right)?;
                self.plan_join(left_plan, right_plan, condition, method, block_size)
            }
        }
    }

    fn plan_join(
        &self,
        left: Box<dyn PhysicalPlan>,
        right: Box<dyn PhysicalPlan>,
        condition: Expression,
        method: JoinMethod,
        block_size: Option<usize>,
    ) -> DBResult<Box<dyn PhysicalPlan>> {
        match method {
            JoinMethod::NestedLoop => {
                log::debug!("nested loop join on {condition}");
                Ok(Box::new(NestedLoopJoin::new(left, right, condition)))
            }
            JoinMethod::BlockNestedLoop => {
                let block_size = block_size.unwrap_or(self.default_block_size);
                log::debug!("block nested loop join on {condition}, block size {block_size}");
                Ok(Box::new(BlockNestedLoopJoin::new(
                    left, right, condition, block_size,
                )?))
            }
            JoinMethod::Hash => {
                let (probe_key, build_key) =
                    split_hash_keys(&condition, left.schema(), right.schema())?;
                log::debug!("hash join probing with {probe_key}, building on {build_key}");
                Ok(Box::new(HashJoin::new(left, right, probe_key, build_key)))
            }
        }
    }
}

/// Decompose `a = b` into (probe key, build key) so that the probe key reads
/// only `left` columns and the build key only `right` columns, whichever side
/// of the equality they were written on.
pub fn split_hash_keys(
    condition: &Expression,
    left: &RelationSchema,
    right: &RelationSchema,
) -> DBResult<(Expression, Expression)> {
    let Expression::BinaryOp {
        op: BinaryOp::Eq,
        left: lhs,
        right: rhs,
    } = condition
    else {
        return Err(DBError::PlanError(format!(
            "hash join requires an equality condition, got {condition}"
        )));
    };

    let (lhs_columns, rhs_columns) = (lhs.referenced_columns(), rhs.referenced_columns());
    if left.contains_all(&lhs_columns) && right.contains_all(&rhs_columns) {
        Ok((lhs.as_ref().clone(), rhs.as_ref().clone()))
    } else if left.contains_all(&rhs_columns) && right.contains_all(&lhs_columns) {
        Ok((rhs.as_ref().clone(), lhs.as_ref().clone()))
    } else {
        Err(DBError::PlanError(format!(
            "cannot split {condition} into one key per join input"
        )))
    }
}
