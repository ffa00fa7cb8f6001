//! Expense business logic - Money spent by the rescue.

use crate::{
    core::{lifecycle::find_active, now, validation::ValidationErrors},
    entities::{Expense, expense},
    errors::Result,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Maximum length of an expense category.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Input for [`create_expense`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExpense {
    /// Defaults to now
    pub date: Option<NaiveDateTime>,
    /// Bookkeeping category (required)
    pub category: String,
    /// Must be greater than zero
    pub amount: Decimal,
    /// Defaults to [`expense::DEFAULT_CURRENCY`]
    pub currency: Option<String>,
    /// The trip this was spent on
    pub trip_id: Option<i64>,
    /// The animal
    pub animal_id: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Path to the scanned receipt
    pub receipt_path: Option<String>,
}

impl NewExpense {
    /// Checks every field and reports all violations together.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .require("category", Some(self.category.as_str()))
            .max_len("category", Some(self.category.trim()), MAX_CATEGORY_LEN)
            .positive_amount("amount", self.amount);
        if let Some(trip_id) = self.trip_id {
            errors.positive_id("trip_id", trip_id);
        }
        if let Some(animal_id) = self.animal_id {
            errors.positive_id("animal_id", animal_id);
        }
        errors.into_result()
    }
}

/// Validates and inserts an expense.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error.
pub async fn create_expense<C: ConnectionTrait>(
    db: &C,
    input: NewExpense,
) -> Result<expense::Model> {
    input.validate()?;

    let expense = expense::ActiveModel {
        date: Set(input.date.unwrap_or_else(now)),
        category: Set(input.category.trim().to_string()),
        amount: Set(input.amount.into()),
        currency: Set(input
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| expense::DEFAULT_CURRENCY.to_string())),
        trip_id: Set(input.trip_id),
        animal_id: Set(input.animal_id),
        notes: Set(input.notes),
        receipt_path: Set(input.receipt_path),
        is_deleted: Set(false),
        ..Default::default()
    };

    Ok(expense.insert(db).await?)
}

/// Finds an expense by id, including soft-deleted ones.
pub async fn get_expense_by_id<C: ConnectionTrait>(
    db: &C,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All active expenses, newest first.
pub async fn get_active_expenses<C: ConnectionTrait>(db: &C) -> Result<Vec<expense::Model>> {
    find_active::<Expense>()
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active expenses booked against a trip.
pub async fn get_expenses_for_trip<C: ConnectionTrait>(
    db: &C,
    trip_id: i64,
) -> Result<Vec<expense::Model>> {
    find_active::<Expense>()
        .filter(expense::Column::TripId.eq(trip_id))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active expenses booked against an animal.
pub async fn get_expenses_for_animal<C: ConnectionTrait>(
    db: &C,
    animal_id: i64,
) -> Result<Vec<expense::Model>> {
    find_active::<Expense>()
        .filter(expense::Column::AnimalId.eq(animal_id))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::lifecycle::soft_delete;
    use crate::errors::Error;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Statement};
    use std::str::FromStr;

    #[tokio::test]
    async fn test_zero_amount_rejected() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_expense(
            &db,
            NewExpense {
                category: "Fuel".to_string(),
                amount: Decimal::ZERO,
                ..Default::default()
            },
        )
        .await;
        let err = result.unwrap_err();
        assert!(err.validation_errors().unwrap().has_field("amount"));
        Ok(())
    }

    #[tokio::test]
    async fn test_smallest_positive_amount_accepted() -> Result<()> {
        let db = setup_test_db().await?;
        let expense = create_test_expense(&db, Decimal::new(1, 2), None, None).await?;
        assert!(expense.amount > Decimal::ZERO);
        assert_eq!(expense.currency, "CAD");
        assert!(get_expense_by_id(&db, expense.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_amount_stored_exactly_as_text() -> Result<()> {
        let db = setup_test_db().await?;
        let large = Decimal::from_str("1234567890123456.78").unwrap();
        let big = create_test_expense(&db, large, None, None).await?;
        let scaled = create_test_expense(&db, Decimal::new(15000, 2), None, None).await?;

        let read = get_expense_by_id(&db, big.id).await?.unwrap();
        assert_eq!(read.amount, large);
        assert_eq!(read.amount.to_string(), "1234567890123456.78");
        let read = get_expense_by_id(&db, scaled.id).await?.unwrap();
        assert_eq!(read.amount.to_string(), "150.00");

        let row = db
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!(
                    "SELECT typeof(amount) AS kind, amount AS raw FROM expenses WHERE id = {}",
                    big.id
                ),
            ))
            .await?
            .unwrap();
        assert_eq!(row.try_get::<String>("", "kind")?, "text");
        assert_eq!(row.try_get::<String>("", "raw")?, "1234567890123456.78");
        Ok(())
    }

    #[tokio::test]
    async fn test_category_required_and_bounded() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let missing = create_expense(
            &db,
            NewExpense {
                amount: Decimal::ONE,
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(missing, Err(Error::Validation(ref e)) if e.has_field("category")));

        let too_long = create_expense(
            &db,
            NewExpense {
                category: "c".repeat(MAX_CATEGORY_LEN + 1),
                amount: Decimal::ONE,
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(too_long, Err(Error::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_explicit_currency_kept() -> Result<()> {
        let db = setup_test_db().await?;
        let expense = create_expense(
            &db,
            NewExpense {
                category: "Vet".to_string(),
                amount: Decimal::new(90, 0),
                currency: Some("USD".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(expense.currency, "USD");
        Ok(())
    }

    #[tokio::test]
    async fn test_listings_skip_soft_deleted() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let trip = create_test_trip(&db, "Pickup").await?;
        let fuel = create_test_expense(&db, Decimal::new(60, 0), Some(trip.id), None).await?;
        create_test_expense(&db, Decimal::new(15, 0), Some(trip.id), Some(animal.id)).await?;

        soft_delete::<Expense, _>(&db, fuel.id).await?;

        assert_eq!(get_active_expenses(&db).await?.len(), 1);
        assert_eq!(get_expenses_for_trip(&db, trip.id).await?.len(), 1);
        assert_eq!(get_expenses_for_animal(&db, animal.id).await?.len(), 1);
        Ok(())
    }
}
