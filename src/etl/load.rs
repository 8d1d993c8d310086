/// Load Module
///
/// Assembles each stage's statements from its source clause and column
/// mappings. A stage is loaded with one `INSERT ... SELECT ... ON DUPLICATE KEY
/// UPDATE`: unseen natural keys get a new surrogate-keyed row, known ones have
/// every denormalized column overwritten in place. Re-running a window
/// therefore converges instead of duplicating.
///
/// Rows are inserted in a fixed order so that when several source rows share
/// a natural key, the same one ends up stored on every run.
use crate::etl::{extract, transform};
use crate::models::{Entity, Schemas};

/// SQL for one (guard, load) stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSql {
    pub entity: Entity,
    /// `SELECT COUNT(*)` over the stage's source rows
    pub count: String,
    /// Upsert of the same rows into the target table
    pub upsert: String,
}

impl StageSql {
    pub fn build(entity: Entity, schemas: &Schemas) -> Self {
        Self { entity, count: extract::count_sql(entity, schemas), upsert: upsert_sql(entity, schemas) }
    }
}

/// Statements for every stage, in load order
pub fn build_plan(schemas: &Schemas) -> Vec<StageSql> {
    Entity::LOAD_ORDER.into_iter().map(|entity| StageSql::build(entity, schemas)).collect()
}

fn upsert_sql(entity: Entity, schemas: &Schemas) -> String {
    let mappings = transform::columns(entity);

    let targets = mappings.iter().map(|m| m.target).collect::<Vec<_>>().join(", ");
    let sources = mappings.iter().map(|m| m.source).collect::<Vec<_>>().join(", ");
    let updates = transform::update_columns(entity)
        .map(|m| format!("    {} = {}", m.target, m.source))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "INSERT INTO {}.{} ({})\nSELECT {}{}\nORDER BY {}\nON DUPLICATE KEY UPDATE\n{}",
        schemas.target(),
        entity.table(),
        targets,
        sources,
        extract::source_clause(entity, schemas),
        extract::order_by(entity),
        updates
    )
}
