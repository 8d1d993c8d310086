/// ETL Module
///
/// The star-schema load is split the usual way:
/// - Extract: which source rows a stage covers (join chain + change window)
/// - Transform: how source columns map onto denormalized target columns
/// - Load: the guard count and upsert statements built from the two above
///
/// All three only produce SQL. Statements are executed by a [`Warehouse`].
pub mod extract;
pub mod load;
pub mod transform;

use crate::window::ChangeWindow;
use load::StageSql;
use std::future::Future;

/// Executes the pipeline's statements against the star-schema store.
///
/// Implemented by [`crate::db::Database`]; the sequencer is written against
/// this trait so its ordering and skip rules can be exercised without a server.
pub trait Warehouse {
    /// Run the schema initializer's DDL, in order
    fn ensure_schema(&self, ddl: &[String]) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Emptiness guard: number of source rows the stage would load
    fn count_pending(
        &self,
        stage: &StageSql,
        window: &ChangeWindow,
    ) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;

    /// Run the stage's upsert, returning the server's affected-row count
    fn upsert(&self, stage: &StageSql, window: &ChangeWindow) -> impl Future<Output = Result<u64, sqlx::Error>> + Send;
}
