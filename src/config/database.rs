//! Database configuration module for the rescue store.
//!
//! Opens the `SQLite` store and creates every table from the entity
//! definitions with `SeaORM`'s `Schema::create_table_from_entity`. Because the
//! schema comes from the entities' `Relation` definitions, the foreign keys and
//! their `ON DELETE` actions (cascade, set-null, restrict) are enforced by
//! `SQLite` itself, including for statements that bypass this crate.

use crate::config::store::StoreLocation;
use crate::entities::{
    Adoption, Animal, Expense, FileAttachment, Income, Intake, License, MoneyOwed, Person,
    PuppyGroup, Trip, TripAnimal, VetService, VetVisit,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityName, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Opens (creating if needed) the store at `location` and makes sure every
/// table and index exists.
///
/// # Errors
/// Returns an error if the data directory cannot be created, the file cannot
/// be opened, or schema creation fails.
#[instrument(skip_all, fields(path = %location.store_path().display()))]
pub async fn open_store(location: &StoreLocation) -> Result<DatabaseConnection> {
    location.ensure_dir()?;
    let db = Database::connect(location.database_url()).await?;
    create_tables(&db).await?;
    info!("Store ready");
    Ok(db)
}

async fn create_table<C, E>(db: &C, schema: &Schema, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let builder = db.get_database_backend();

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    debug!("Ensured table {}", entity.table_name());
    Ok(())
}

/// Creates all tables and secondary indices, skipping any that already exist.
///
/// Parents are created before children so the foreign keys read naturally in
/// the resulting schema.
///
/// # Errors
/// Returns an error if any statement fails.
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Animal).await?;
    create_table(db, &schema, Person).await?;
    create_table(db, &schema, Trip).await?;
    create_table(db, &schema, TripAnimal).await?;
    create_table(db, &schema, VetVisit).await?;
    create_table(db, &schema, VetService).await?;
    create_table(db, &schema, Adoption).await?;
    create_table(db, &schema, Expense).await?;
    create_table(db, &schema, Income).await?;
    create_table(db, &schema, FileAttachment).await?;
    create_table(db, &schema, Intake).await?;
    create_table(db, &schema, MoneyOwed).await?;
    create_table(db, &schema, PuppyGroup).await?;
    create_table(db, &schema, License).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{animal::Model as AnimalModel, trip::Model as TripModel};
    use sea_orm::{DbBackend, QuerySelect, Statement};

    async fn index_names(db: &DatabaseConnection, table: &str) -> Result<Vec<String>> {
        let rows = db
            .query_all(Statement::from_string(
                DbBackend::Sqlite,
                format!("PRAGMA index_list('{table}')"),
            ))
            .await?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row.try_get::<String>("", "name")?);
        }
        Ok(names)
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let _: Vec<AnimalModel> = Animal::find().limit(1).all(&db).await?;
        let _: Vec<TripModel> = Trip::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_twice_is_harmless() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "PRAGMA foreign_keys",
            ))
            .await?
            .unwrap();
        let enabled: i32 = row.try_get_by_index(0)?;
        assert_eq!(enabled, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_listing_indices_exist() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let animal_indices = index_names(&db, "animals").await?;
        assert!(animal_indices.iter().any(|n| n.contains("status")));
        assert!(animal_indices.iter().any(|n| n.contains("intake_date")));

        let trip_indices = index_names(&db, "trips").await?;
        assert!(trip_indices.iter().any(|n| n.contains("date")));
        Ok(())
    }

    #[tokio::test]
    async fn test_open_store_creates_directory_and_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let location = StoreLocation::new(tmp.path().join("rescue-data"));

        let db = open_store(&location).await?;
        let _: Vec<AnimalModel> = Animal::find().limit(1).all(&db).await?;
        drop(db);

        assert!(location.store_path().is_file());

        // Reopening an existing store must not fail on schema creation
        let _db = open_store(&location).await?;
        Ok(())
    }
}
