/// CLI Module
///
/// Command-line interface configuration using clap.
use crate::models::{Schemas, DEFAULT_SOURCE_SCHEMA, DEFAULT_TARGET_SCHEMA};
use crate::pipeline::PipelineConfig;
use chrono::NaiveDate;
use clap::Parser;
use std::num::NonZeroU32;

/// Sakila Star ETL - daily star-schema load
///
/// Upserts the sakila rows modified in the change window into the
/// sakila_star dimension and fact tables
#[derive(Parser, Debug)]
#[command(name = "sakila-star-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logical run date, YYYY-MM-DD (defaults to today); the window ends at its midnight
    #[arg(short = 'r', long, value_name = "DATE")]
    pub run_date: Option<NaiveDate>,

    /// Number of days before the run date covered by the change window
    #[arg(short = 'l', long, value_name = "DAYS", default_value = "1")]
    pub lookback_days: NonZeroU32,

    /// Database connection URL (overrides DATABASE_URL env var)
    #[arg(short = 'd', long, value_name = "URL")]
    pub database_url: Option<String>,

    /// Session time zone for comparing `last_update` (e.g. "+02:00"); defaults to the server's zone
    #[arg(short = 'z', long, value_name = "ZONE")]
    pub time_zone: Option<String>,

    /// OLTP schema to read from
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SOURCE_SCHEMA)]
    pub source_schema: String,

    /// Star schema to create and load
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TARGET_SCHEMA)]
    pub target_schema: String,

    /// Count the rows each stage would load without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON instead of the summary
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The run date, falling back to `today` when none was given
    pub fn resolve_run_date(&self, today: NaiveDate) -> NaiveDate {
        self.run_date.unwrap_or(today)
    }

    /// Build the pipeline configuration for a run on `today`
    pub fn pipeline_config(&self, today: NaiveDate) -> anyhow::Result<PipelineConfig> {
        Ok(PipelineConfig {
            run_date: self.resolve_run_date(today),
            lookback_days: self.lookback_days.get(),
            schemas: Schemas::new(&self.source_schema, &self.target_schema)?,
            dry_run: self.dry_run,
        })
    }
}
