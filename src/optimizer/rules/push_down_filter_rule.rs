use crate::{logical_plans::LogicalPlan, optimizer::OptimizerContext, DBResult};

use super::Rule;

/// Moves a filter that sits directly on a join beneath the join, onto the one
/// input that owns every column the predicate reads. Predicates reading both
/// inputs, or no column at all, stay above the join.
pub struct PushDownFilterRule {}

impl Rule for PushDownFilterRule {
    fn name(&self) -> &'static str {
        "push_down_filter"
    }

    fn apply(
        &self,
        node: &LogicalPlan,
        context: &OptimizerContext,
    ) -> DBResult<Option<LogicalPlan>> {
        node.transform_bottom_up(context, Self::push_down_filter)
    }
}

impl PushDownFilterRule {
    fn push_down_filter(
        node: &LogicalPlan,
        context: &OptimizerContext,
    ) -> DBResult<Option<LogicalPlan>> {
        let LogicalPlan::Filter { expression, child } = node else {
            return Ok(None);
        };
        let LogicalPlan::Join {
            left,
            right,
            condition,
            method,
            block_size,
        } = child.as_ref()
        else {
            return Ok(None);
        };

        let columns = expression.referenced_columns();
        if columns.is_empty() {
            log::debug!("filter {expression} reads no column, kept above the join");
            return Ok(None);
        }
        let in_left = left.schema(context.catalog())?.contains_all(&columns);
        let in_right = right.schema(context.catalog())?.contains_all(&columns);

        // the wrapped input may itself be a join, so keep sinking in the same pass
        let sink = |input: &LogicalPlan| -> DBResult<Box<LogicalPlan>> {
            let filter = LogicalPlan::Filter {
                expression: expression.clone(),
                child: Box::new(input.clone()),
            };
            let sunk = Self::push_down_filter(&filter, context)?;
            Ok(Box::new(sunk.unwrap_or(filter)))
        };
        let (left, right) = match (in_left, in_right) {
            (true, false) => {
                log::debug!("pushing filter {expression} into the left input of the join");
                (sink(left.as_ref())?, right.clone())
            }
            (false, true) => {
                log::debug!("pushing filter {expression} into the right input of the join");
                (left.clone(), sink(right.as_ref())?)
            }
            _ => {
                log::debug!("filter {expression} spans both join inputs, not pushed down");
                return Ok(None);
            }
        };
        Ok(Some(LogicalPlan::Join {
            left,
            right,
            condition: condition.clone(),
            method: *method,
            block_size: *block_size,
        }))
    }
}
