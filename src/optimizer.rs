use crate::{catalog::Catalog, logical_plans::LogicalPlan, DBResult};

use self::rules::{get_all_rules, Rule};
pub mod rules;

/// Upper bound on full rule passes. Hitting it keeps the plan rewritten so far.
const MAX_PASSES: usize = 64;

pub struct OptimizerContext<'a> {
    catalog: &'a Catalog,
}

impl<'a> OptimizerContext<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        OptimizerContext { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }
}

/// Rewrites a logical plan by applying its rules until none of them fires.
pub struct Optimizer {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer {
    pub fn new() -> Self {
        Optimizer {
            rules: get_all_rules(),
        }
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Optimizer { rules }
    }

    pub fn optimize(&self, plan: LogicalPlan, catalog: &Catalog) -> DBResult<LogicalPlan> {
        let context = OptimizerContext::new(catalog);
        let mut node_under_plan = plan;

        for _ in 0..MAX_PASSES {
            let mut changed = false;
            for rule in self.rules.iter() {
                if let Some(new_node) = rule.apply(&node_under_plan, &context)? {
                    log::trace!("rule {} rewrote the plan", rule.name());
                    node_under_plan = new_node;
                    changed = true;
                }
            }
            if !changed {
                return Ok(node_under_plan);
            }
        }
        log::warn!("optimizer stopped after {MAX_PASSES} passes without converging");
        Ok(node_under_plan)
    }
}
