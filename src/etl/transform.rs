/// Transform Module
///
/// Denormalization rules: for each star-schema table, which source expression
/// fills which target column. Expressions use the table aliases declared in
/// the extract module's join chains.
///
/// Surrogate keys are never mapped: the store assigns them on insert and an
/// update leaves them as they are.
use crate::models::Entity;

/// One target column and the source expression that fills it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub target: &'static str,
    pub source: &'static str,
}

const fn col(target: &'static str, source: &'static str) -> ColumnMapping {
    ColumnMapping { target, source }
}

const CUSTOMER_COLUMNS: &[ColumnMapping] = &[
    col("customer_last_update", "c.last_update"),
    col("customer_id", "c.customer_id"),
    col("customer_first_name", "c.first_name"),
    col("customer_last_name", "c.last_name"),
    col("customer_email", "c.email"),
    col("customer_active", "c.active"),
    col("customer_address_id", "c.address_id"),
    col("customer_address", "a.address"),
    col("customer_district", "a.district"),
    col("customer_city_id", "a.city_id"),
    col("customer_city", "ci.city"),
    col("customer_country_id", "ci.country_id"),
    col("customer_country", "co.country"),
    col("customer_postal_code", "a.postal_code"),
    col("customer_phone", "a.phone"),
    col("customer_location", "a.location"),
    col("customer_create_date", "c.create_date"),
];

const STORE_COLUMNS: &[ColumnMapping] = &[
    col("store_last_update", "s.last_update"),
    col("store_id", "s.store_id"),
    col("store_address_id", "s.address_id"),
    col("store_address", "a.address"),
    col("store_district", "a.district"),
    col("store_city_id", "a.city_id"),
    col("store_city", "ci.city"),
    col("store_country_id", "ci.country_id"),
    col("store_country", "co.country"),
    col("store_manager_staff_id", "s.manager_staff_id"),
    col("store_manager_first_name", "m.first_name"),
    col("store_manager_last_name", "m.last_name"),
];

const STAFF_COLUMNS: &[ColumnMapping] = &[
    col("staff_last_update", "st.last_update"),
    col("staff_id", "st.staff_id"),
    col("staff_first_name", "st.first_name"),
    col("staff_last_name", "st.last_name"),
    col("staff_address_id", "st.address_id"),
    col("staff_address", "a.address"),
    col("staff_district", "a.district"),
    col("staff_city_id", "a.city_id"),
    col("staff_city", "ci.city"),
    col("staff_country_id", "ci.country_id"),
    col("staff_country", "co.country"),
    col("staff_picture", "st.picture"),
    col("staff_email", "st.email"),
    col("staff_username", "st.username"),
    col("staff_password", "st.password"),
    col("staff_store_id", "st.store_id"),
    col("staff_active", "st.active"),
];

const FILM_COLUMNS: &[ColumnMapping] = &[
    col("film_last_update", "f.last_update"),
    col("film_id", "f.film_id"),
    col("film_title", "f.title"),
    col("film_description", "f.description"),
    col("film_release_year", "f.release_year"),
    col("film_language_id", "f.language_id"),
    col("film_language_name", "l.name"),
    col("film_rental_duration", "f.rental_duration"),
    col("film_rental_rate", "f.rental_rate"),
    col("film_duration", "f.length"),
    col("film_replacement_cost", "f.replacement_cost"),
    col("film_rating_text", "f.rating"),
    col("film_special_features", "f.special_features"),
    col("film_category_id", "fc.category_id"),
    col("film_category_name", "cat.name"),
];

const TRANSACTION_COLUMNS: &[ColumnMapping] = &[
    col("rental_id", "r.rental_id"),
    col("rental_last_update", "r.last_update"),
    col("customer_key", "dc.customer_key"),
    col("staff_key", "dsf.staff_key"),
    col("film_key", "dfm.film_key"),
    col("store_key", "dso.store_key"),
    col("inventory_id", "r.inventory_id"),
    col("rental_date", "r.rental_date"),
    col("return_date", "r.return_date"),
    col("payment_id", "p.payment_id"),
    col("payment_date", "p.payment_date"),
    col("payment_amount", "p.amount"),
];

/// Column mappings for `entity`, in insert order
pub fn columns(entity: Entity) -> &'static [ColumnMapping] {
    match entity {
        Entity::Customer => CUSTOMER_COLUMNS,
        Entity::Store => STORE_COLUMNS,
        Entity::Staff => STAFF_COLUMNS,
        Entity::Film => FILM_COLUMNS,
        Entity::Transaction => TRANSACTION_COLUMNS,
    }
}

/// Columns rewritten when a row with the same natural key already exists
pub fn update_columns(entity: Entity) -> impl Iterator<Item = &'static ColumnMapping> {
    columns(entity).iter().filter(move |m| m.target != entity.natural_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_natural_key_mapped_once() {
        for entity in Entity::LOAD_ORDER {
            let hits = columns(entity).iter().filter(|m| m.target == entity.natural_key()).count();
            assert_eq!(hits, 1, "{entity}");
        }
    }

    #[test]
    fn test_surrogate_key_never_written() {
        for entity in Entity::LOAD_ORDER {
            assert!(columns(entity).iter().all(|m| m.target != entity.surrogate_key()), "{entity}");
        }
    }

    #[test]
    fn test_target_columns_unique() {
        for entity in Entity::LOAD_ORDER {
            let targets: HashSet<_> = columns(entity).iter().map(|m| m.target).collect();
            assert_eq!(targets.len(), columns(entity).len(), "{entity}");
        }
    }

    #[test]
    fn test_update_skips_only_natural_key() {
        for entity in Entity::LOAD_ORDER {
            assert_eq!(update_columns(entity).count(), columns(entity).len() - 1, "{entity}");
            assert!(update_columns(entity).all(|m| m.target != entity.natural_key()));
        }
    }

    #[test]
    fn test_fact_takes_surrogate_keys_from_dimensions() {
        let fact = columns(Entity::Transaction);

        for dim in Entity::LOAD_ORDER.into_iter().filter(Entity::is_dimension) {
            let mapping = fact.iter().find(|m| m.target == dim.surrogate_key()).unwrap();
            assert!(mapping.source.ends_with(&format!(".{}", dim.surrogate_key())), "{dim}");
        }
    }
}
