//! Income business logic - Donations, fees and other money received.

use crate::{
    core::{lifecycle::find_active, now, validation::ValidationErrors},
    entities::{Income, expense::DEFAULT_CURRENCY, income},
    errors::Result,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Maximum length of an income type.
pub const MAX_TYPE_LEN: usize = 100;

/// Input for [`create_income`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIncome {
    /// Defaults to now
    pub date: Option<NaiveDateTime>,
    /// Kind of income, e.g. `Donation` (required)
    pub income_type: String,
    /// Must be greater than zero
    pub amount: Decimal,
    /// Defaults to `CAD`
    pub currency: Option<String>,
    /// The donor or payer
    pub person_id: Option<i64>,
    /// The animal
    pub animal_id: Option<i64>,
    /// Puppy group name, linked by value only
    pub group_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl NewIncome {
    /// Checks every field and reports all violations together.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .require("income_type", Some(self.income_type.as_str()))
            .max_len("income_type", Some(self.income_type.trim()), MAX_TYPE_LEN)
            .positive_amount("amount", self.amount);
        if let Some(person_id) = self.person_id {
            errors.positive_id("person_id", person_id);
        }
        if let Some(animal_id) = self.animal_id {
            errors.positive_id("animal_id", animal_id);
        }
        errors.into_result()
    }
}

/// Validates and inserts an income record.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error.
pub async fn create_income<C: ConnectionTrait>(db: &C, input: NewIncome) -> Result<income::Model> {
    input.validate()?;

    let income = income::ActiveModel {
        date: Set(input.date.unwrap_or_else(now)),
        income_type: Set(input.income_type.trim().to_string()),
        amount: Set(input.amount.into()),
        currency: Set(input
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())),
        person_id: Set(input.person_id),
        animal_id: Set(input.animal_id),
        group_name: Set(input.group_name),
        notes: Set(input.notes),
        is_deleted: Set(false),
        ..Default::default()
    };

    Ok(income.insert(db).await?)
}

/// Finds an income record by id, including soft-deleted ones.
pub async fn get_income_by_id<C: ConnectionTrait>(
    db: &C,
    income_id: i64,
) -> Result<Option<income::Model>> {
    Income::find_by_id(income_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All active income, newest first.
pub async fn get_active_incomes<C: ConnectionTrait>(db: &C) -> Result<Vec<income::Model>> {
    find_active::<Income>()
        .order_by_desc(income::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active income received from one person.
pub async fn get_incomes_from_person<C: ConnectionTrait>(
    db: &C,
    person_id: i64,
) -> Result<Vec<income::Model>> {
    find_active::<Income>()
        .filter(income::Column::PersonId.eq(person_id))
        .order_by_desc(income::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active income tagged with a puppy group name.
pub async fn get_incomes_for_group<C: ConnectionTrait>(
    db: &C,
    group_name: &str,
) -> Result<Vec<income::Model>> {
    find_active::<Income>()
        .filter(income::Column::GroupName.eq(group_name))
        .order_by_desc(income::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}
