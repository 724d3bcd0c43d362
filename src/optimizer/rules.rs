use crate::{logical_plans::LogicalPlan, optimizer::OptimizerContext, DBResult};
mod push_down_filter_rule;

pub use push_down_filter_rule::PushDownFilterRule;

/// Optimizer works by applying various rules on the plan tree and transforming it.
/// Rule is a interface for all rules.
pub trait Rule {
    fn name(&self) -> &'static str;
    /// Rewritten plan, or `None` when the rule does not apply anywhere.
    fn apply(
        &self,
        node: &LogicalPlan,
        context: &OptimizerContext,
    ) -> DBResult<Option<LogicalPlan>>;
}

pub(crate) fn get_all_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(PushDownFilterRule {})]
}
