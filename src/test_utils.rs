//! Shared test utilities for the rescue store.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        adoption::{self, NewAdoption},
        animal::{self, NewAnimal},
        expense::{self, NewExpense},
        income::{self, NewIncome},
        person::{self, NewPerson},
        trip::{self, NewTrip},
        vet::{self, NewVetVisit},
    },
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test animal with only a name set.
pub async fn create_test_animal(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::animal::Model> {
    animal::create_animal(db, NewAnimal::named(name)).await
}

/// Creates a test person of the given type.
///
/// # Defaults
/// * `email`: `<lowercase name>@example.org` with spaces removed
pub async fn create_test_person(
    db: &DatabaseConnection,
    name: &str,
    person_type: &str,
) -> Result<entities::person::Model> {
    person::create_person(
        db,
        NewPerson {
            name: name.to_string(),
            email: Some(format!(
                "{}@example.org",
                name.to_lowercase().replace(' ', "")
            )),
            person_type: Some(person_type.to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Creates a test trip dated now.
pub async fn create_test_trip(
    db: &DatabaseConnection,
    purpose: &str,
) -> Result<entities::trip::Model> {
    trip::create_trip(
        db,
        NewTrip {
            purpose: Some(purpose.to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Creates a vet visit for an animal, optionally naming the vet.
///
/// # Defaults
/// * `total_cost`: 85.00
pub async fn create_test_vet_visit(
    db: &DatabaseConnection,
    animal_id: i64,
    vet_id: Option<i64>,
) -> Result<entities::vet_visit::Model> {
    vet::create_vet_visit(
        db,
        NewVetVisit {
            animal_id,
            person_id: vet_id,
            total_cost: Some(Decimal::new(8500, 2)),
            ..Default::default()
        },
    )
    .await
}

/// Creates an unpaid adoption with the given agreed fee.
pub async fn create_test_adoption(
    db: &DatabaseConnection,
    animal_id: i64,
    person_id: i64,
    agreed_fee: Decimal,
) -> Result<entities::adoption::Model> {
    adoption::create_adoption(
        db,
        NewAdoption {
            animal_id,
            person_id,
            agreed_fee,
            ..Default::default()
        },
    )
    .await
}

/// Creates an expense in the default currency.
///
/// # Defaults
/// * `category`: `"Food"`
pub async fn create_test_expense(
    db: &DatabaseConnection,
    amount: Decimal,
    trip_id: Option<i64>,
    animal_id: Option<i64>,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        NewExpense {
            category: "Food".to_string(),
            amount,
            trip_id,
            animal_id,
            ..Default::default()
        },
    )
    .await
}

/// Creates an income record in the default currency.
///
/// # Defaults
/// * `income_type`: `"Donation"`
pub async fn create_test_income(
    db: &DatabaseConnection,
    amount: Decimal,
    person_id: Option<i64>,
    animal_id: Option<i64>,
) -> Result<entities::income::Model> {
    income::create_income(
        db,
        NewIncome {
            income_type: "Donation".to_string(),
            amount,
            person_id,
            animal_id,
            ..Default::default()
        },
    )
    .await
}

/// Sets up a store with one animal.
/// Returns (db, animal) for common test scenarios.
pub async fn setup_with_animal() -> Result<(DatabaseConnection, entities::animal::Model)> {
    let db = setup_test_db().await?;
    let animal = create_test_animal(&db, "Test Animal").await?;
    Ok((db, animal))
}
