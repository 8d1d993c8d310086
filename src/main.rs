/// Sakila Star ETL
///
/// Daily batch job loading the sakila OLTP schema into a star schema.
/// Exits non-zero when any stage fails so the scheduler can retry the run.
use anyhow::{Context, Result};
use clap::Parser;
use sakila_star_etl::{cli::Cli, db::Database, pipeline, Pipeline};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The only wall-clock read of the run; everything downstream gets the date.
    let config = cli.pipeline_config(chrono::Local::now().date_naive())?;

    if !cli.json {
        println!("🚀 Starting Sakila star-schema load...");
        println!("   📅 Run date: {}", config.run_date);
        println!("   🔀 {} -> {}", config.schemas.source(), config.schemas.target());
    }

    let database_url = match cli.database_url.clone() {
        Some(url) => url,
        None => env::var("DATABASE_URL").context("DATABASE_URL not found in environment. Please check your .env file")?,
    };

    let database = Database::new(&database_url, cli.time_zone.as_deref()).await?;
    database.test_connection().await?;

    let time_zone = database.session_time_zone().await?;
    tracing::info!("Comparing last_update in session time zone {}", time_zone);

    if !cli.json {
        println!("✅ Database connected successfully! (time zone {})", time_zone);
    }

    let stats = Pipeline::new(database, config).run().await.context("Pipeline execution failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats).context("Failed to serialize run report")?);
    } else {
        pipeline::print_final_stats(&stats);
        println!("\n✨ Pipeline execution complete!");
    }

    Ok(())
}
