//! Money owed business logic - Debts owed to the rescue and their repayment.
//!
//! Outstanding balance and paid-off state are never written; they are read
//! from [`money_owed::Model::total_owed`] and
//! [`money_owed::Model::is_fully_paid`].

use crate::{
    core::{now, validation::ValidationErrors},
    entities::{MoneyOwed, money_owed},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Input for [`create_money_owed`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMoneyOwed {
    /// Defaults to now
    pub date: Option<NaiveDateTime>,
    /// Must be greater than zero
    pub amount_owed: Decimal,
    /// Defaults to zero
    pub amount_paid: Option<Decimal>,
    /// When the last repayment was made
    pub date_paid: Option<NaiveDateTime>,
    /// Who owes the money
    pub debtor_name: Option<String>,
    /// What the money is owed for
    pub reason: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl NewMoneyOwed {
    /// Checks every field and reports all violations together.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .positive_amount("amount_owed", self.amount_owed)
            .non_negative("amount_paid", self.amount_paid);
        errors.into_result()
    }
}

/// Validates and inserts a debt.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error.
pub async fn create_money_owed<C: ConnectionTrait>(
    db: &C,
    input: NewMoneyOwed,
) -> Result<money_owed::Model> {
    input.validate()?;

    let now = now();
    let debt = money_owed::ActiveModel {
        date: Set(input.date.unwrap_or(now)),
        amount_owed: Set(input.amount_owed.into()),
        amount_paid: Set(input.amount_paid.unwrap_or(Decimal::ZERO).into()),
        date_paid: Set(input.date_paid),
        debtor_name: Set(input.debtor_name),
        reason: Set(input.reason),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(debt.insert(db).await?)
}

/// Finds a debt by id.
pub async fn get_money_owed_by_id<C: ConnectionTrait>(
    db: &C,
    debt_id: i64,
) -> Result<Option<money_owed::Model>> {
    MoneyOwed::find_by_id(debt_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Sets the total amount repaid so far. `date_paid` is replaced only when a
/// new date is given.
///
/// # Errors
/// Returns a validation error for a negative amount or [`Error::NotFound`]
/// for an unknown debt.
pub async fn record_money_owed_payment<C: ConnectionTrait>(
    db: &C,
    debt_id: i64,
    amount_paid: Decimal,
    date_paid: Option<NaiveDateTime>,
) -> Result<money_owed::Model> {
    let mut errors = ValidationErrors::new();
    errors.non_negative("amount_paid", Some(amount_paid));
    errors.into_result()?;

    let existing = MoneyOwed::find_by_id(debt_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "money_owed".to_string(),
            id: debt_id,
        })?;

    let mut active: money_owed::ActiveModel = existing.into();
    active.amount_paid = Set(amount_paid.into());
    if date_paid.is_some() {
        active.date_paid = Set(date_paid);
    }
    active.updated_at = Set(now());
    let updated = active.update(db).await?;

    debug!(
        "Debt {} now has {} outstanding (fully paid: {})",
        debt_id,
        updated.total_owed(),
        updated.is_fully_paid()
    );
    Ok(updated)
}

/// Debts not yet fully paid, oldest first.
///
/// Amounts are stored as decimal text, so the comparison happens here rather
/// than in SQL where it would be lexicographic.
pub async fn get_outstanding_debts<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<money_owed::Model>> {
    let debts = MoneyOwed::find()
        .order_by_asc(money_owed::Column::Date)
        .order_by_asc(money_owed::Column::Id)
        .all(db)
        .await?;
    Ok(debts.into_iter().filter(|d| !d.is_fully_paid()).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    async fn owed(db: &DatabaseConnection, amount: Decimal) -> Result<money_owed::Model> {
        create_money_owed(
            db,
            NewMoneyOwed {
                amount_owed: amount,
                debtor_name: Some("Riley".to_string()),
                reason: Some("Crate loan".to_string()),
                ..Default::default()
            },
        )
        .await
    }

    #[tokio::test]
    async fn test_create_money_owed_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_money_owed(
            &db,
            NewMoneyOwed {
                amount_owed: Decimal::ZERO,
                amount_paid: Some(Decimal::new(-1, 0)),
                ..Default::default()
            },
        )
        .await;
        let err = result.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.has_field("amount_owed"));
        assert!(errors.has_field("amount_paid"));
        Ok(())
    }

    #[tokio::test]
    async fn test_derived_values_follow_payments() -> Result<()> {
        let db = setup_test_db().await?;
        let debt = owed(&db, Decimal::new(120, 0)).await?;
        assert_eq!(debt.amount_paid, Decimal::ZERO);
        assert_eq!(debt.total_owed(), Decimal::new(120, 0));
        assert!(!debt.is_fully_paid());

        let partial = record_money_owed_payment(&db, debt.id, Decimal::new(20, 0), None).await?;
        assert_eq!(partial.total_owed(), Decimal::new(100, 0));
        assert!(!partial.is_fully_paid());

        let paid_on = now();
        record_money_owed_payment(&db, debt.id, Decimal::new(120, 0), Some(paid_on)).await?;
        let reread = get_money_owed_by_id(&db, debt.id).await?.unwrap();
        assert_eq!(reread.total_owed(), reread.amount_owed - reread.amount_paid);
        assert_eq!(reread.total_owed(), Decimal::ZERO);
        assert!(reread.is_fully_paid());
        assert_eq!(reread.date_paid, Some(paid_on));
        assert!(reread.updated_at >= reread.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_outstanding_debts() -> Result<()> {
        let db = setup_test_db().await?;
        let open = owed(&db, Decimal::new(50, 0)).await?;
        let settled = owed(&db, Decimal::new(80, 0)).await?;
        record_money_owed_payment(&db, settled.id, Decimal::new(80, 0), None).await?;
        // "9" sorts after "100" as text but is still less than it
        let mostly_open = owed(&db, Decimal::new(100, 0)).await?;
        record_money_owed_payment(&db, mostly_open.id, Decimal::new(9, 0), None).await?;

        let outstanding: Vec<_> = get_outstanding_debts(&db)
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(outstanding, [open.id, mostly_open.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_on_unknown_debt() -> Result<()> {
        let db = setup_test_db().await?;
        let result = record_money_owed_payment(&db, 9, Decimal::ONE, None).await;
        assert!(matches!(result, Err(Error::NotFound { id: 9, .. })));
        Ok(())
    }
}
