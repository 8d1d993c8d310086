/// Pipeline Module
///
/// Sequences a daily run: Schema → customer → store → staff → film → fact.
/// Each loader stage is a guard count followed by an upsert; a stage with no
/// rows in the change window is skipped, a stage whose statement fails ends
/// the run.
use crate::db::schema;
use crate::error::EtlError;
use crate::etl::{load, load::StageSql, Warehouse};
use crate::models::{Entity, Schemas, StageOutcome, StageReport};
use crate::window::ChangeWindow;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Pipeline execution statistics
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    pub run_date: NaiveDate,
    pub window: ChangeWindow,
    pub dry_run: bool,
    pub stages: Vec<StageReport>,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed_time: Duration,
}

impl PipelineStats {
    fn new(run_date: NaiveDate, window: ChangeWindow, dry_run: bool) -> Self {
        let stages = Vec::with_capacity(Entity::LOAD_ORDER.len());
        Self { run_date, window, dry_run, stages, elapsed_time: Duration::ZERO }
    }

    pub fn stage(&self, entity: Entity) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == entity)
    }

    pub fn stages_loaded(&self) -> usize {
        self.stages.iter().filter(|s| s.outcome == StageOutcome::Loaded).count()
    }

    pub fn stages_skipped(&self) -> usize {
        self.stages.iter().filter(|s| s.outcome == StageOutcome::Skipped).count()
    }

    pub fn source_rows(&self) -> u64 {
        self.stages.iter().map(|s| s.source_rows).sum()
    }

    pub fn rows_affected(&self) -> u64 {
        self.stages.iter().map(|s| s.rows_affected).sum()
    }
}

fn as_millis<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed_millis(*elapsed))
}

fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Configuration for pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Logical run date; the window ends at midnight of this day
    pub run_date: NaiveDate,
    pub lookback_days: u32,
    pub schemas: Schemas,
    /// Run the schema initializer and guards but no upserts
    pub dry_run: bool,
}

impl PipelineConfig {
    pub fn new(run_date: NaiveDate) -> Self {
        Self { run_date, lookback_days: 1, schemas: Schemas::default(), dry_run: false }
    }
}

/// Main ETL Pipeline
pub struct Pipeline<W> {
    warehouse: W,
    config: PipelineConfig,
}

impl<W: Warehouse> Pipeline<W> {
    /// Create a new pipeline instance
    pub fn new(warehouse: W, config: PipelineConfig) -> Self {
        Self { warehouse, config }
    }

    /// Run every stage once for the configured run date
    pub async fn run(&self) -> Result<PipelineStats, EtlError> {
        let start_time = Instant::now();

        // Computed once; every stage sees the same bounds.
        let window = ChangeWindow::lookback(self.config.run_date, self.config.lookback_days)?;
        let mut stats = PipelineStats::new(self.config.run_date, window, self.config.dry_run);

        tracing::info!(
            "Starting pipeline for run date {} (window {}, {} -> {})",
            self.config.run_date,
            window,
            self.config.schemas.source(),
            self.config.schemas.target()
        );

        let ddl = schema::statements(self.config.schemas.target());
        self.warehouse.ensure_schema(&ddl).await.map_err(EtlError::Schema)?;

        for stage in load::build_plan(&self.config.schemas) {
            let report = self.run_stage(&stage, &window).await?;
            stats.stages.push(report);
        }

        stats.elapsed_time = start_time.elapsed();

        tracing::info!(
            "Pipeline complete: {} loaded, {} skipped, {} rows affected in {:.2}s",
            stats.stages_loaded(),
            stats.stages_skipped(),
            stats.rows_affected(),
            stats.elapsed_time.as_secs_f64()
        );

        Ok(stats)
    }

    /// Guard, then load if the guard found rows
    async fn run_stage(&self, stage: &StageSql, window: &ChangeWindow) -> Result<StageReport, EtlError> {
        let started = Instant::now();
        let entity = stage.entity;
        let fail = |source: sqlx::Error| {
            tracing::error!("{} stage failed: {}", entity, source);
            EtlError::Stage { stage: entity, source }
        };

        let source_rows = self.warehouse.count_pending(stage, window).await.map_err(fail)?;

        let (outcome, rows_affected) = if source_rows == 0 {
            tracing::warn!("No {} rows changed in {}, skipping {}", entity, window, entity.table());
            (StageOutcome::Skipped, 0)
        } else if self.config.dry_run {
            tracing::info!("Dry run: {} {} rows would be upserted into {}", source_rows, entity, entity.table());
            (StageOutcome::DryRun, 0)
        } else {
            let rows_affected = self.warehouse.upsert(stage, window).await.map_err(fail)?;
            tracing::info!("Upserted {} {} rows into {} ({} affected)", source_rows, entity, entity.table(), rows_affected);
            (StageOutcome::Loaded, rows_affected)
        };

        Ok(StageReport { stage: entity, outcome, source_rows, rows_affected, elapsed_ms: elapsed_millis(started.elapsed()) })
    }
}

/// Print final statistics
pub fn print_final_stats(stats: &PipelineStats) {
    println!("\n📊 Pipeline Statistics:");
    println!("   📅 Run date: {} | window {}", stats.run_date, stats.window);
    println!("   ⏱️  Total time: {:.2}s", stats.elapsed_time.as_secs_f64());

    for report in &stats.stages {
        let marker = match report.outcome {
            StageOutcome::Loaded => "✅",
            StageOutcome::Skipped => "⏭️ ",
            StageOutcome::DryRun => "🔍",
        };
        println!(
            "   {} {:<12} {:<8} {} source rows, {} affected ({} ms)",
            marker,
            report.stage.table(),
            report.outcome,
            format_number(report.source_rows),
            format_number(report.rows_affected),
            report.elapsed_ms
        );
    }

    println!(
        "   📦 Stages: {} loaded, {} skipped | 📝 {} source rows | 💾 {} rows affected",
        stats.stages_loaded(),
        stats.stages_skipped(),
        format_number(stats.source_rows()),
        format_number(stats.rows_affected())
    );
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
