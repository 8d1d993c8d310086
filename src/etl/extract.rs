/// Extract Module
///
/// Source row selection for each stage: the inner-join chain from the entity's
/// source table through its reference tables, filtered to rows modified inside
/// the change window. The same clause feeds both the emptiness guard's count
/// and the loader's upsert, so the two can never disagree about which rows a
/// stage covers.
///
/// Placeholders: `{src}` is the OLTP schema, `{dst}` the star schema. The two
/// `?` parameters are the window's start (inclusive) and end (exclusive).
use crate::models::{Entity, Schemas};

/// Number of `?` parameters in every source clause
pub const WINDOW_PARAMS: usize = 2;

const CUSTOMER_SOURCE: &str = r#"
FROM {src}.customer AS c
INNER JOIN {src}.address AS a ON c.address_id = a.address_id
INNER JOIN {src}.city AS ci ON a.city_id = ci.city_id
INNER JOIN {src}.country AS co ON ci.country_id = co.country_id
WHERE c.last_update >= ? AND c.last_update < ?"#;

const STORE_SOURCE: &str = r#"
FROM {src}.store AS s
INNER JOIN {src}.address AS a ON s.address_id = a.address_id
INNER JOIN {src}.city AS ci ON a.city_id = ci.city_id
INNER JOIN {src}.country AS co ON ci.country_id = co.country_id
INNER JOIN {src}.staff AS m ON s.manager_staff_id = m.staff_id
WHERE s.last_update >= ? AND s.last_update < ?"#;

const STAFF_SOURCE: &str = r#"
FROM {src}.staff AS st
INNER JOIN {src}.address AS a ON st.address_id = a.address_id
INNER JOIN {src}.city AS ci ON a.city_id = ci.city_id
INNER JOIN {src}.country AS co ON ci.country_id = co.country_id
WHERE st.last_update >= ? AND st.last_update < ?"#;

const FILM_SOURCE: &str = r#"
FROM {src}.film AS f
INNER JOIN {src}.language AS l ON f.language_id = l.language_id
INNER JOIN {src}.film_category AS fc ON f.film_id = fc.film_id
INNER JOIN {src}.category AS cat ON fc.category_id = cat.category_id
WHERE f.last_update >= ? AND f.last_update < ?"#;

// Dimension rows are matched on natural keys; a rental whose customer, staff,
// film or store has not been loaded yet drops out here.
const TRANSACTION_SOURCE: &str = r#"
FROM {src}.rental AS r
INNER JOIN {dst}.dim_customer AS dc ON r.customer_id = dc.customer_id
INNER JOIN {dst}.dim_staff AS dsf ON r.staff_id = dsf.staff_id
INNER JOIN {src}.inventory AS i ON r.inventory_id = i.inventory_id
INNER JOIN {dst}.dim_film AS dfm ON i.film_id = dfm.film_id
INNER JOIN {dst}.dim_store AS dso ON i.store_id = dso.store_id
INNER JOIN {src}.payment AS p ON r.rental_id = p.rental_id
WHERE r.last_update >= ? AND r.last_update < ?"#;

fn template(entity: Entity) -> &'static str {
    match entity {
        Entity::Customer => CUSTOMER_SOURCE,
        Entity::Store => STORE_SOURCE,
        Entity::Staff => STAFF_SOURCE,
        Entity::Film => FILM_SOURCE,
        Entity::Transaction => TRANSACTION_SOURCE,
    }
}

/// Row order the upsert applies a stage's rows in. A natural key that joins to
/// several rows (a film in two categories, a rental with two payments) is
/// written once per row, so the last row in this order is the one that stays.
pub fn order_by(entity: Entity) -> &'static str {
    match entity {
        Entity::Customer => "c.customer_id",
        Entity::Store => "s.store_id",
        Entity::Staff => "st.staff_id",
        Entity::Film => "f.film_id, fc.category_id",
        Entity::Transaction => "r.rental_id, p.payment_id",
    }
}

/// FROM / JOIN / WHERE clause selecting the stage's changed source rows
pub fn source_clause(entity: Entity, schemas: &Schemas) -> String {
    template(entity).replace("{src}", schemas.source()).replace("{dst}", schemas.target())
}

/// Emptiness guard: how many rows the stage's upsert would select
pub fn count_sql(entity: Entity, schemas: &Schemas) -> String {
    format!("SELECT COUNT(*){}", source_clause(entity, schemas))
}
