/// Star Schema DDL
///
/// Statements that create the target database and its five tables when they
/// are missing. Every statement is `IF NOT EXISTS`, so running them against an
/// initialized database changes nothing. There is no migration path: an
/// existing table is never altered.
///
/// `{db}` is replaced with the (validated) target schema name.

const CREATE_DATABASE: &str = "CREATE DATABASE IF NOT EXISTS `{db}`";

const DIM_CUSTOMER: &str = r#"
CREATE TABLE IF NOT EXISTS `{db}`.`dim_customer` (
    `customer_key` INT NOT NULL AUTO_INCREMENT,
    `customer_last_update` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:00',
    `customer_id` INT NOT NULL,
    `customer_first_name` VARCHAR(45) NULL DEFAULT NULL,
    `customer_last_name` VARCHAR(45) NULL DEFAULT NULL,
    `customer_email` VARCHAR(64) NULL DEFAULT NULL,
    `customer_active` CHAR(3) NULL DEFAULT NULL,
    `customer_address_id` INT NULL DEFAULT NULL,
    `customer_address` VARCHAR(64) NULL DEFAULT NULL,
    `customer_district` VARCHAR(20) NULL DEFAULT NULL,
    `customer_city_id` INT NULL DEFAULT NULL,
    `customer_city` VARCHAR(50) NULL DEFAULT NULL,
    `customer_country_id` INT NULL DEFAULT NULL,
    `customer_country` VARCHAR(50) NULL DEFAULT NULL,
    `customer_postal_code` VARCHAR(50) NULL DEFAULT NULL,
    `customer_phone` VARCHAR(20) NULL DEFAULT NULL,
    `customer_location` GEOMETRY NULL DEFAULT NULL,
    `customer_create_date` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:00',
    PRIMARY KEY (`customer_key`),
    UNIQUE KEY `uq_customer_id` (`customer_id`),
    KEY `idx_address_id` (`customer_address_id`),
    KEY `idx_city_id` (`customer_city_id`),
    KEY `idx_country_id` (`customer_country_id`)
) AUTO_INCREMENT = 1"#;

const DIM_STORE: &str = r#"
CREATE TABLE IF NOT EXISTS `{db}`.`dim_store` (
    `store_key` INT NOT NULL AUTO_INCREMENT,
    `store_last_update` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:00',
    `store_id` INT NOT NULL,
    `store_address_id` INT NULL DEFAULT NULL,
    `store_address` VARCHAR(64) NULL DEFAULT NULL,
    `store_district` VARCHAR(20) NULL DEFAULT NULL,
    `store_city_id` INT NULL DEFAULT NULL,
    `store_city` VARCHAR(50) NULL DEFAULT NULL,
    `store_country_id` INT NULL DEFAULT NULL,
    `store_country` VARCHAR(50) NULL DEFAULT NULL,
    `store_manager_staff_id` INT NULL DEFAULT NULL,
    `store_manager_first_name` VARCHAR(45) NULL DEFAULT NULL,
    `store_manager_last_name` VARCHAR(45) NULL DEFAULT NULL,
    PRIMARY KEY (`store_key`),
    UNIQUE KEY `uq_store_id` (`store_id`),
    KEY `idx_address_id` (`store_address_id`),
    KEY `idx_city_id` (`store_city_id`),
    KEY `idx_country_id` (`store_country_id`),
    KEY `idx_manager_id` (`store_manager_staff_id`)
)"#;

const DIM_STAFF: &str = r#"
CREATE TABLE IF NOT EXISTS `{db}`.`dim_staff` (
    `staff_key` INT NOT NULL AUTO_INCREMENT,
    `staff_last_update` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:00',
    `staff_id` INT NOT NULL,
    `staff_first_name` VARCHAR(45) NULL DEFAULT NULL,
    `staff_last_name` VARCHAR(45) NULL DEFAULT NULL,
    `staff_address_id` INT NULL DEFAULT NULL,
    `staff_address` VARCHAR(64) NULL DEFAULT NULL,
    `staff_district` VARCHAR(20) NULL DEFAULT NULL,
    `staff_city_id` INT NULL DEFAULT NULL,
    `staff_city` VARCHAR(50) NULL DEFAULT NULL,
    `staff_country_id` INT NULL DEFAULT NULL,
    `staff_country` VARCHAR(50) NULL DEFAULT NULL,
    `staff_picture` BLOB NULL DEFAULT NULL,
    `staff_email` VARCHAR(50) NULL DEFAULT NULL,
    `staff_username` VARCHAR(16) NULL DEFAULT NULL,
    `staff_password` VARCHAR(40) NULL DEFAULT NULL,
    `staff_store_id` INT NULL DEFAULT NULL,
    `staff_active` CHAR(3) NULL DEFAULT NULL,
    PRIMARY KEY (`staff_key`),
    UNIQUE KEY `uq_staff_id` (`staff_id`),
    KEY `idx_address_id` (`staff_address_id`),
    KEY `idx_city_id` (`staff_city_id`),
    KEY `idx_country_id` (`staff_country_id`),
    KEY `idx_store_id` (`staff_store_id`)
)"#;

const DIM_FILM: &str = r#"
CREATE TABLE IF NOT EXISTS `{db}`.`dim_film` (
    `film_key` INT NOT NULL AUTO_INCREMENT,
    `film_last_update` DATETIME NOT NULL,
    `film_id` INT NOT NULL,
    `film_title` VARCHAR(128) NOT NULL,
    `film_description` TEXT NULL,
    `film_release_year` SMALLINT NULL DEFAULT NULL,
    `film_language_id` INT NOT NULL,
    `film_language_name` VARCHAR(20) NOT NULL,
    `film_rental_duration` TINYINT UNSIGNED NULL DEFAULT NULL,
    `film_rental_rate` DECIMAL(4,2) NULL DEFAULT NULL,
    `film_duration` INT NULL DEFAULT NULL,
    `film_replacement_cost` DECIMAL(5,2) NULL DEFAULT NULL,
    `film_rating_text` VARCHAR(30) NULL DEFAULT NULL,
    `film_special_features` VARCHAR(64) NULL DEFAULT NULL,
    `film_category_id` INT NOT NULL,
    `film_category_name` VARCHAR(30) NULL DEFAULT NULL,
    PRIMARY KEY (`film_key`),
    UNIQUE KEY `uq_film_id` (`film_id`),
    KEY `idx_language_id` (`film_language_id`),
    KEY `idx_category_id` (`film_category_id`)
)"#;

const FACT_TRANSACTION: &str = r#"
CREATE TABLE IF NOT EXISTS `{db}`.`fact_transaction` (
    `transaction_key` INT NOT NULL AUTO_INCREMENT,
    `rental_id` INT NOT NULL,
    `rental_last_update` DATETIME NOT NULL,
    `customer_key` INT NOT NULL,
    `staff_key` INT NOT NULL,
    `film_key` INT NOT NULL,
    `store_key` INT NOT NULL,
    `inventory_id` INT NOT NULL,
    `rental_date` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:00',
    `return_date` DATETIME NULL DEFAULT NULL,
    `payment_id` INT NULL DEFAULT NULL,
    `payment_date` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:00',
    `payment_amount` DECIMAL(5,2) NULL DEFAULT NULL,
    PRIMARY KEY (`transaction_key`),
    UNIQUE KEY `uq_rental_id` (`rental_id`),
    KEY `idx_customer` (`customer_key`),
    KEY `idx_staff` (`staff_key`),
    KEY `idx_film` (`film_key`),
    KEY `idx_store` (`store_key`),
    KEY `idx_inventory` (`inventory_id`),
    KEY `idx_payment` (`payment_id`),
    CONSTRAINT `fk_customer`
        FOREIGN KEY (`customer_key`)
        REFERENCES `{db}`.`dim_customer` (`customer_key`)
        ON DELETE CASCADE
        ON UPDATE NO ACTION,
    CONSTRAINT `fk_staff`
        FOREIGN KEY (`staff_key`)
        REFERENCES `{db}`.`dim_staff` (`staff_key`)
        ON DELETE CASCADE
        ON UPDATE NO ACTION,
    CONSTRAINT `fk_store`
        FOREIGN KEY (`store_key`)
        REFERENCES `{db}`.`dim_store` (`store_key`)
        ON DELETE CASCADE
        ON UPDATE NO ACTION,
    CONSTRAINT `fk_film`
        FOREIGN KEY (`film_key`)
        REFERENCES `{db}`.`dim_film` (`film_key`)
        ON DELETE CASCADE
        ON UPDATE NO ACTION
)"#;

/// Tables in creation order; the fact table references all four dimensions.
const TABLES: [&str; 5] = [DIM_CUSTOMER, DIM_STORE, DIM_STAFF, DIM_FILM, FACT_TRANSACTION];

/// All statements needed to initialize `target`, in execution order
pub fn statements(target: &str) -> Vec<String> {
    std::iter::once(CREATE_DATABASE).chain(TABLES).map(|ddl| ddl.replace("{db}", target)).collect()
}
