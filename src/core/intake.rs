//! Intake business logic - Bulk arrivals such as a whole litter.

use crate::{
    core::{now, validation::ValidationErrors},
    entities::{Intake, Money, intake},
    errors::Result,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Input for [`create_intake`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewIntake {
    /// Defaults to now
    pub date: Option<NaiveDateTime>,
    /// At least one
    pub puppy_count: i32,
    /// Where the intake happened
    pub location: Option<String>,
    /// Cost for the whole litter
    pub cost_per_litter: Option<Decimal>,
    /// Cost per puppy
    pub cost_per_puppy: Option<Decimal>,
    /// Stored as given, see [`NewIntake::expected_total`]
    pub total_cost: Option<Decimal>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl NewIntake {
    /// `puppy_count × cost_per_puppy`, if a per-puppy cost was given.
    pub fn expected_total(&self) -> Option<Decimal> {
        self.cost_per_puppy
            .map(|cost| cost * Decimal::from(self.puppy_count))
    }

    /// Checks every field and reports all violations together.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .min_count("puppy_count", self.puppy_count, 1)
            .non_negative("cost_per_litter", self.cost_per_litter)
            .non_negative("cost_per_puppy", self.cost_per_puppy)
            .non_negative("total_cost", self.total_cost);
        errors.into_result()
    }
}

/// Validates and inserts an intake record. `total_cost` is not recomputed.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error.
pub async fn create_intake<C: ConnectionTrait>(db: &C, input: NewIntake) -> Result<intake::Model> {
    input.validate()?;

    let now = now();
    let intake = intake::ActiveModel {
        date: Set(input.date.unwrap_or(now)),
        puppy_count: Set(input.puppy_count),
        location: Set(input.location),
        cost_per_litter: Set(input.cost_per_litter.map(Money::from)),
        cost_per_puppy: Set(input.cost_per_puppy.map(Money::from)),
        total_cost: Set(input.total_cost.map(Money::from)),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(intake.insert(db).await?)
}

/// Finds an intake record by id.
pub async fn get_intake_by_id<C: ConnectionTrait>(
    db: &C,
    intake_id: i64,
) -> Result<Option<intake::Model>> {
    Intake::find_by_id(intake_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All intake records, newest first.
pub async fn get_intakes<C: ConnectionTrait>(db: &C) -> Result<Vec<intake::Model>> {
    Intake::find()
        .order_by_desc(intake::Column::Date)
        .order_by_desc(intake::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
