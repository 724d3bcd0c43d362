use std::fmt::Display;
use std::path::Path;

use crate::catalog::Catalog;
use crate::expressions::Expression;
use crate::optimizer::OptimizerContext;
use crate::physical_plans::Projection;
use crate::tables::RelationSchema;
use crate::{DBError, DBResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMethod {
    #[default]
    NestedLoop,
    BlockNestedLoop,
    Hash,
}

impl JoinMethod {
    pub fn from_tag(tag: &str) -> DBResult<Self> {
        match tag {
            "nested_loop" => Ok(JoinMethod::NestedLoop),
            "block_nested_loop" => Ok(JoinMethod::BlockNestedLoop),
            "hash" => Ok(JoinMethod::Hash),
            _ => Err(DBError::PlanError(format!("unknown join method: {tag}"))),
        }
    }
}

impl Display for JoinMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinMethod::NestedLoop => "nested_loop".fmt(f),
            JoinMethod::BlockNestedLoop => "block_nested_loop".fmt(f),
            JoinMethod::Hash => "hash".fmt(f),
        }
    }
}

/// Declarative query tree. Pure data: rewritten by the optimizer and turned
/// into operators by the planner.
#[derive(Debug, Clone)]
pub enum LogicalPlan {
    Scan {
        table: String,
        alias: String,
    },
    Filter {
        expression: Expression,
        child: Box<LogicalPlan>,
    },
    Projection {
        expressions: Vec<(String, Expression)>,
        child: Box<LogicalPlan>,
    },
    Join {
        left: Box<LogicalPlan>,
        right: Box<LogicalPlan>,
        condition: Expression,
        method: JoinMethod,
        block_size: Option<usize>,
    },
    Limit {
        offset: usize,
        limit: usize,
        child: Box<LogicalPlan>,
    },
}

impl LogicalPlan {
    /// Output schema of this node, computed from the catalog without reading data.
    pub fn schema(&self, catalog: &Catalog) -> DBResult<RelationSchema> {
        match self {
            LogicalPlan::Scan { table, alias } => {
                let table_name = table_file_name(table)?;
                Ok(catalog.try_get_schema(table_name)?.qualify(alias))
            }
            LogicalPlan::Filter { child, .. } => child.schema(catalog),
            LogicalPlan::Projection { expressions, child } => {
                Projection::output_schema(expressions, &child.schema(catalog)?)
            }
            LogicalPlan::Join { left, right, .. } => Ok(RelationSchema::merge(
                &left.schema(catalog)?,
                &right.schema(catalog)?,
            )),
            LogicalPlan::Limit { child, .. } => child.schema(catalog),
        }
    }

    fn fmt_with_indent(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        depth: usize,
    ) -> std::fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            LogicalPlan::Scan { table, alias } => {
                writeln!(f, "{indent}Scan: {table} as {alias}")
            }
            LogicalPlan::Filter { expression, child } => {
                writeln!(f, "{indent}Filter: {expression}")?;
                child.fmt_with_indent(f, depth + 1)
            }
            LogicalPlan::Projection { expressions, child } => {
                let exprs = expressions
                    .iter()
                    .map(|(alias, expr)| format!("{expr} as {alias}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "{indent}Projection: {exprs}")?;
                child.fmt_with_indent(f, depth + 1)
            }
            LogicalPlan::Join {
                left,
                right,
                condition,
                method,
                ..
            } => {
                writeln!(f, "{indent}Join[{method}]: {condition}")?;
                left.fmt_with_indent(f, depth + 1)?;
                right.fmt_with_indent(f, depth + 1)
            }
            LogicalPlan::Limit {
                offset,
                limit,
                child,
            } => {
                writeln!(f, "{indent}Limit: {limit} offset {offset}")?;
                child.fmt_with_indent(f, depth + 1)
            }
        }
    }
}

impl Display for LogicalPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_with_indent(f, 0)
    }
}

/// Catalog key of a table: the base name of its file.
pub(crate) fn table_file_name(table: &str) -> DBResult<&str> {
    Path::new(table)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DBError::PlanError(format!("invalid table name: {table}")))
}

impl LogicalPlan {
    pub fn children(&self) -> Vec<&LogicalPlan> {
        match self {
            LogicalPlan::Scan { .. } => vec![],
            LogicalPlan::Filter { child, .. }
            | LogicalPlan::Projection { child, .. }
            | LogicalPlan::Limit { child, .. } => vec![child.as_ref()],
            LogicalPlan::Join { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Copy of this node with its children replaced, in `children()` order.
    fn with_new_children(&self, children: Vec<LogicalPlan>) -> LogicalPlan {
        let mut iter = children.into_iter().map(Box::new);
        let mut next_child = |old: &LogicalPlan| {
            iter.next().unwrap_or_else(|| Box::new(old.clone()))
        };
        match self {
            LogicalPlan::Scan { .. } => self.clone(),
            LogicalPlan::Filter { expression, child } => LogicalPlan::Filter {
                expression: expression.clone(),
                child: next_child(child),
            },
            LogicalPlan::Projection { expressions, child } => LogicalPlan::Projection {
                expressions: expressions.clone(),
                child: next_child(child),
            },
            LogicalPlan::Join {
                left,
                right,
                condition,
                method,
                block_size,
            } => LogicalPlan::Join {
                left: next_child(left),
                right: next_child(right),
                condition: condition.clone(),
                method: *method,
                block_size: *block_size,
            },
            LogicalPlan::Limit {
                offset,
                limit,
                child,
            } => LogicalPlan::Limit {
                offset: *offset,
                limit: *limit,
                child: next_child(child),
            },
        }
    }

    /// Apply `func` to every node, children first. Returns `None` if nothing changed.
    pub fn transform_bottom_up(
        &self,
        context: &OptimizerContext,
        func: fn(&LogicalPlan, &OptimizerContext) -> DBResult<Option<LogicalPlan>>,
    ) -> DBResult<Option<LogicalPlan>> {
        let mut any_children_updated = false;
        let mut updated_children = Vec::new();
        for child in self.children() {
            if let Some(updated) = child.transform_bottom_up(context, func)? {
                any_children_updated = true;
                updated_children.push(updated);
            } else {
                updated_children.push(child.clone());
            }
        }

        if any_children_updated {
            let updated_self = self.with_new_children(updated_children);
            match func(&updated_self, context)? {
                Some(updated_self) => Ok(Some(updated_self)),
                None => Ok(Some(updated_self)),
            }
        } else {
            func(self, context)
        }
    }
}
