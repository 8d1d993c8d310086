/// Error Module
///
/// Typed errors for run configuration and stage execution. The binary wraps
/// these in `anyhow` at the top level.
use crate::models::Entity;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("invalid schema name {0:?}: expected 1-64 ASCII letters, digits or underscores")]
    InvalidSchemaName(String),

    #[error("source and target schema must differ (both are {0:?})")]
    SameSchema(String),

    #[error("lookback must be at least one day, got {0}")]
    InvalidLookback(u32),

    #[error("change window for run date {0} falls outside the supported calendar")]
    WindowOutOfRange(NaiveDate),

    #[error("schema initialization failed")]
    Schema(#[source] sqlx::Error),

    #[error("{stage} stage failed")]
    Stage {
        stage: Entity,
        #[source]
        source: sqlx::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_stage_error_keeps_source() {
        let err = EtlError::Stage { stage: Entity::Film, source: sqlx::Error::PoolTimedOut };

        assert_eq!(err.to_string(), "film stage failed");
        assert!(matches!(err, EtlError::Stage { stage: Entity::Film, .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_messages() {
        assert!(EtlError::InvalidLookback(0).source().is_none());
        assert_eq!(EtlError::InvalidLookback(0).to_string(), "lookback must be at least one day, got 0");
    }
}
