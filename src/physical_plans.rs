mod block_nested_loop_join;
mod csv_scan;
mod filter;
mod hash_join;
mod inmem_scan;
mod limit;
mod nested_loop_join;
mod projection;

use crate::{errors::DBResult, row::Row, tables::RelationSchema};

pub use block_nested_loop_join::{BlockNestedLoopJoin, DEFAULT_BLOCK_SIZE};
pub use csv_scan::CsvScan;
pub use filter::Filter;
pub use hash_join::HashJoin;
pub use inmem_scan::InMemTableScan;
pub use limit::Limit;
pub use nested_loop_join::NestedLoopJoin;
pub use projection::Projection;

/// Pull-based operator. Rows flow only when a parent asks for them.
pub trait PhysicalPlan {
    /// Acquire resources and prime internal state. Calling it again on an
    /// already opened operator is a no-op.
    fn open(&mut self) -> DBResult<()>;
    /// Produce the next row, or `None` once exhausted.
    fn next(&mut self) -> DBResult<Option<Row>>;
    /// Release resources. Safe without a prior `open`.
    fn close(&mut self) -> DBResult<()>;
    /// Return the schema/shape of the output rows.
    fn schema(&self) -> &RelationSchema;

    /// Restart the output from the first row.
    fn rewind(&mut self) -> DBResult<()> {
        self.close()?;
        self.open()
    }
}

/// Drain an operator from open to close.
pub fn collect_rows(plan: &mut dyn PhysicalPlan) -> DBResult<Vec<Row>> {
    plan.open()?;
    let mut rows = Vec::new();
    while let Some(row) = plan.next()? {
        rows.push(row);
    }
    plan.close()?;
    Ok(rows)
}
