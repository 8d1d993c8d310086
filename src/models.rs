/// Data Models Module
///
/// Core types shared by the loaders and the sequencer: the entities that get
/// loaded, the schema pair a run reads from and writes to, and the per-stage
/// report produced for every run.
use crate::error::EtlError;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_SOURCE_SCHEMA: &str = "sakila";
pub const DEFAULT_TARGET_SCHEMA: &str = "sakila_star";

/// A star-schema table loaded by one pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Customer,
    Store,
    Staff,
    Film,
    Transaction,
}

impl Entity {
    /// Dimensions first, fact last: the fact loader resolves surrogate keys
    /// against rows the dimension loaders have just written.
    pub const LOAD_ORDER: [Entity; 5] = [Self::Customer, Self::Store, Self::Staff, Self::Film, Self::Transaction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Store => "store",
            Self::Staff => "staff",
            Self::Film => "film",
            Self::Transaction => "transaction",
        }
    }

    /// Target table in the star schema
    pub fn table(&self) -> &'static str {
        match self {
            Self::Customer => "dim_customer",
            Self::Store => "dim_store",
            Self::Staff => "dim_staff",
            Self::Film => "dim_film",
            Self::Transaction => "fact_transaction",
        }
    }

    /// Natural key column, unique in the target table
    pub fn natural_key(&self) -> &'static str {
        match self {
            Self::Customer => "customer_id",
            Self::Store => "store_id",
            Self::Staff => "staff_id",
            Self::Film => "film_id",
            Self::Transaction => "rental_id",
        }
    }

    /// Surrogate key column, assigned by the store on first insert
    #[cfg(test)]
    pub fn surrogate_key(&self) -> &'static str {
        match self {
            Self::Customer => "customer_key",
            Self::Store => "store_key",
            Self::Staff => "staff_key",
            Self::Film => "film_key",
            Self::Transaction => "transaction_key",
        }
    }

    pub fn is_dimension(&self) -> bool {
        !matches!(self, Self::Transaction)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Source (OLTP) and target (star) database names for a run.
///
/// Names are spliced into SQL text, so both are restricted to plain
/// identifiers on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schemas {
    source: String,
    target: String,
}

impl Schemas {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Result<Self, EtlError> {
        let source = source.into();
        let target = target.into();

        for name in [&source, &target] {
            if !is_plain_identifier(name) {
                return Err(EtlError::InvalidSchemaName(name.clone()));
            }
        }
        if source.eq_ignore_ascii_case(&target) {
            return Err(EtlError::SameSchema(source));
        }

        Ok(Self { source, target })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for Schemas {
    fn default() -> Self {
        Self { source: DEFAULT_SOURCE_SCHEMA.to_string(), target: DEFAULT_TARGET_SCHEMA.to_string() }
    }
}

fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty() && name.len() <= 64 && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// How a stage finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    /// The guard found rows and the upsert ran
    Loaded,
    /// The guard found nothing in the window; the table was not touched
    Skipped,
    /// The guard found rows but the run was a dry run
    DryRun,
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Loaded => "loaded",
            Self::Skipped => "skipped",
            Self::DryRun => "dry run",
        })
    }
}

/// Result of one (guard, load) stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Entity,
    pub outcome: StageOutcome,
    /// Rows matched by the guard's count
    pub source_rows: u64,
    /// Rows affected as reported by the server (1 per insert, 2 per changed update)
    pub rows_affected: u64,
    pub elapsed_ms: u64,
}
