pub mod catalog;
mod errors;
pub mod expressions;
pub mod interpreter;
pub mod logical_plans;
pub mod parser;
pub mod physical_plans;
pub mod planner;
pub mod tables;
use catalog::Catalog;
pub use errors::*;

pub mod data_types;
pub mod row;

pub mod optimizer;

use std::path::{Path, PathBuf};

use serde::{ser::SerializeStruct, Serialize};

use crate::{
    optimizer::Optimizer, physical_plans::PhysicalPlan, planner::PhysicalPlanner, row::Row,
    tables::RelationSchema,
};

/// Knobs of the engine that are not part of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    pub push_down_predicates: bool,
    pub default_block_size: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            push_down_predicates: true,
            default_block_size: physical_plans::DEFAULT_BLOCK_SIZE,
        }
    }
}

/// Runs JSON plans against the tables of one data directory.
pub struct VolcanoDB {
    catalog: Catalog,
    data_dir: PathBuf,
    options: ExecutionOptions,
}

#[derive(Debug, PartialEq)]
pub struct ResultSet {
    pub schema: RelationSchema,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(schema: RelationSchema, rows: Vec<Row>) -> Self {
        ResultSet { schema, rows }
    }

    pub fn headers(&self) -> Vec<String> {
        self.schema.headers()
    }

    /// `name: value | name: value` in schema column order.
    pub fn format_row(&self, row: &Row) -> String {
        Iterator::zip(self.schema.get_fields().iter(), row.fields().iter())
            .map(|(field, value)| format!("{}: {value}", field.name()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Serialize for ResultSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResultSet", 2)?;
        state.serialize_field("headers", &self.headers())?;
        state.serialize_field("rows", &self.rows)?;
        state.end()
    }
}

impl VolcanoDB {
    /// Open a data directory, registering every schema descriptor in it.
    pub fn new(data_dir: impl AsRef<Path>) -> DBResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        let mut catalog = Catalog::new();
        catalog.load_schemas(&data_dir)?;
        Ok(Self::with_catalog(catalog, data_dir))
    }

    pub fn with_catalog(catalog: Catalog, data_dir: PathBuf) -> Self {
        VolcanoDB {
            catalog,
            data_dir,
            options: ExecutionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExecutionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Parse and optimize a plan, then build its operator tree without opening it.
    pub fn build(&self, plan: &str) -> DBResult<Box<dyn PhysicalPlan>> {
        let mut logical_plan = parser::parse_plan_str(plan)?;
        if self.options.push_down_predicates {
            logical_plan = Optimizer::new().optimize(logical_plan, &self.catalog)?;
        }
        log::debug!("optimized logical plan:\n{logical_plan}");

        let planner = PhysicalPlanner::new(
            &self.catalog,
            &self.data_dir,
            self.options.default_block_size,
        );
        planner.planning(logical_plan)
    }

    pub fn execute(&self, plan: &str) -> DBResult<ResultSet> {
        let mut physical_plan = self.build(plan)?;
        let rows = physical_plans::collect_rows(physical_plan.as_mut())?;
        Ok(ResultSet::new(physical_plan.schema().clone(), rows))
    }

    pub fn execute_file(&self, plan_path: impl AsRef<Path>) -> DBResult<ResultSet> {
        let plan_path = plan_path.as_ref();
        let plan = std::fs::read_to_string(plan_path).map_err(|e| {
            DBError::StorageEngine(format!("read plan {} failed: {e}", plan_path.display()))
        })?;
        self.execute(&plan)
    }
}
