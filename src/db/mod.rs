/// Database Module
///
/// This module handles all MySQL database operations including:
/// - Connection pool management
/// - Star schema initialization
/// - Guard counts and upserts for each pipeline stage
pub mod schema;


use crate::etl::{load::StageSql, Warehouse};
use crate::window::ChangeWindow;
use anyhow::{Context, Result};
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};

#[derive(Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// The URL does not need to name a database: every statement uses
    /// schema-qualified table names.
    ///
    /// `time_zone` is the session zone the change window is compared in
    /// (`TIMESTAMP` columns are converted to it). `None` keeps the server's
    /// own zone instead of the driver's UTC default.
    pub async fn new(database_url: &str, time_zone: Option<&str>) -> Result<Self> {
        let options = database_url
            .parse::<MySqlConnectOptions>()
            .context("Invalid MySQL connection URL")?
            .timezone(time_zone.map(str::to_owned));

        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect_with(options)
            .await
            .context("Failed to connect to MySQL database")?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.context("Database connection test failed")?;

        Ok(())
    }

    /// The session time zone in effect, as reported by the server
    pub async fn session_time_zone(&self) -> Result<String> {
        let zone: String = sqlx::query_scalar("SELECT CAST(@@session.time_zone AS CHAR)")
            .fetch_one(&self.pool)
            .await
            .context("Failed to read session time zone")?;

        Ok(zone)
    }
}

impl Warehouse for Database {
    async fn ensure_schema(&self, ddl: &[String]) -> Result<(), sqlx::Error> {
        for statement in ddl {
            tracing::debug!("Executing DDL: {}", statement);
            sqlx::raw_sql(statement).execute(&self.pool).await?;
        }

        tracing::info!("Star schema initialized ({} statements)", ddl.len());
        Ok(())
    }

    async fn count_pending(&self, stage: &StageSql, window: &ChangeWindow) -> Result<u64, sqlx::Error> {
        tracing::debug!("Guard for {}: {}", stage.entity, stage.count);

        let count: i64 = sqlx::query_scalar(&stage.count)
            .bind(window.start_bound())
            .bind(window.end_bound())
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn upsert(&self, stage: &StageSql, window: &ChangeWindow) -> Result<u64, sqlx::Error> {
        tracing::debug!("Upsert for {}: {}", stage.entity, stage.upsert);

        let result = sqlx::query(&stage.upsert)
            .bind(window.start_bound())
            .bind(window.end_bound())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
