//! Sakila Star ETL
//!
//! Daily load of the `sakila` OLTP schema into the `sakila_star` star schema:
//! four dimension tables and one fact table, upserted by natural key from the
//! rows modified in the previous day.
pub mod cli;
pub mod db;
pub mod error;
pub mod etl;
pub mod models;
pub mod pipeline;
pub mod window;

pub use error::EtlError;
pub use pipeline::{Pipeline, PipelineConfig, PipelineStats};
pub use window::ChangeWindow;
