//! Adoption business logic - Placing animals and collecting fees.

use crate::{
    core::{lifecycle::find_active, now, validation::ValidationErrors},
    entities::{Adoption, Money, adoption},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Input for [`create_adoption`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAdoption {
    /// Must be a positive id
    pub animal_id: i64,
    /// The adopter; must be a positive id
    pub person_id: i64,
    /// Defaults to now
    pub adoption_date: Option<NaiveDateTime>,
    /// Fee agreed with the adopter
    pub agreed_fee: Decimal,
    /// Fee paid so far
    pub paid_fee: Decimal,
    /// Set once the paid fee covers the agreed fee
    pub paid: bool,
    /// Path to the signed contract
    pub contract_path: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl NewAdoption {
    /// Ids are checked here, before the store is consulted.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .positive_id("animal_id", self.animal_id)
            .positive_id("person_id", self.person_id)
            .non_negative("agreed_fee", Some(self.agreed_fee))
            .non_negative("paid_fee", Some(self.paid_fee));
        errors.into_result()
    }
}

/// Validates and inserts an adoption.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error
/// if the animal or adopter does not exist.
pub async fn create_adoption<C: ConnectionTrait>(
    db: &C,
    input: NewAdoption,
) -> Result<adoption::Model> {
    input.validate()?;

    let adoption = adoption::ActiveModel {
        animal_id: Set(input.animal_id),
        person_id: Set(input.person_id),
        adoption_date: Set(input.adoption_date.unwrap_or_else(now)),
        agreed_fee: Set(input.agreed_fee.into()),
        paid_fee: Set(input.paid_fee.into()),
        paid: Set(input.paid),
        contract_path: Set(input.contract_path),
        notes: Set(input.notes),
        is_deleted: Set(false),
        ..Default::default()
    };

    Ok(adoption.insert(db).await?)
}

/// Finds an adoption by id, including soft-deleted ones.
pub async fn get_adoption_by_id<C: ConnectionTrait>(
    db: &C,
    adoption_id: i64,
) -> Result<Option<adoption::Model>> {
    Adoption::find_by_id(adoption_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All active adoptions, newest first.
pub async fn get_active_adoptions<C: ConnectionTrait>(db: &C) -> Result<Vec<adoption::Model>> {
    find_active::<Adoption>()
        .order_by_desc(adoption::Column::AdoptionDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active adoptions where `person_id` is the adopter.
pub async fn get_adoptions_for_person<C: ConnectionTrait>(
    db: &C,
    person_id: i64,
) -> Result<Vec<adoption::Model>> {
    find_active::<Adoption>()
        .filter(adoption::Column::PersonId.eq(person_id))
        .order_by_desc(adoption::Column::AdoptionDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records the total fee paid so far and sets `paid` once it covers the
/// agreed fee.
///
/// # Errors
/// Returns a validation error for a negative amount or [`Error::NotFound`]
/// for an unknown adoption.
pub async fn record_adoption_payment<C: ConnectionTrait>(
    db: &C,
    adoption_id: i64,
    paid_fee: Decimal,
) -> Result<adoption::Model> {
    let mut errors = ValidationErrors::new();
    errors.non_negative("paid_fee", Some(paid_fee));
    errors.into_result()?;

    let existing = Adoption::find_by_id(adoption_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "adoptions".to_string(),
            id: adoption_id,
        })?;

    let paid = Money::from(paid_fee) >= existing.agreed_fee;
    let mut active: adoption::ActiveModel = existing.into();
    active.paid_fee = Set(paid_fee.into());
    active.paid = Set(paid);
    Ok(active.update(db).await?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::lifecycle::{restore, soft_delete};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_non_positive_ids_rejected_before_store() -> Result<()> {
        // No query results are configured: reaching the store would fail differently
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_adoption(
            &db,
            NewAdoption {
                animal_id: 0,
                person_id: -7,
                agreed_fee: Decimal::new(-1, 0),
                ..Default::default()
            },
        )
        .await;

        let err = result.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.errors().len(), 3);
        assert!(errors.has_field("animal_id"));
        assert!(errors.has_field("person_id"));
        assert!(errors.has_field("agreed_fee"));
        Ok(())
    }

    #[tokio::test]
    async fn test_round_trip_and_soft_delete() -> Result<()> {
        let db = setup_test_db().await?;
        // Ids 5 and 7 need real rows behind them
        for i in 1..=5 {
            create_test_animal(&db, &format!("Animal {i}")).await?;
        }
        for i in 1..=7 {
            create_test_person(&db, &format!("Person {i}"), "Adopter").await?;
        }

        let fee = Decimal::new(15000, 2);
        let created = create_test_adoption(&db, 5, 7, fee).await?;

        let read = get_adoption_by_id(&db, created.id).await?.unwrap();
        assert_eq!(read.animal_id, 5);
        assert_eq!(read.person_id, 7);
        assert_eq!(read.agreed_fee, fee);
        assert_eq!(read.agreed_fee.to_string(), "150.00");
        assert_eq!(read.id, created.id);
        assert!(!read.paid);

        soft_delete::<Adoption, _>(&db, created.id).await?;
        assert!(get_active_adoptions(&db).await?.is_empty());
        assert!(get_adoptions_for_person(&db, 7).await?.is_empty());

        let explicit = get_adoption_by_id(&db, created.id).await?.unwrap();
        assert!(explicit.is_deleted);
        assert_eq!(explicit.agreed_fee, fee);

        restore::<Adoption, _>(&db, created.id).await?;
        assert_eq!(get_active_adoptions(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_adoption_payment() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let adopter = create_test_person(&db, "Ada", "Adopter").await?;
        let adoption = create_test_adoption(&db, animal.id, adopter.id, Decimal::new(200, 0)).await?;

        let partial = record_adoption_payment(&db, adoption.id, Decimal::new(50, 0)).await?;
        assert!(!partial.paid);
        assert_eq!(partial.balance_due(), Decimal::new(150, 0));

        let full = record_adoption_payment(&db, adoption.id, Decimal::new(200, 0)).await?;
        assert!(full.paid);
        assert_eq!(full.balance_due(), Decimal::ZERO);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_fee_adoption_allowed() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let adopter = create_test_person(&db, "Ada", "Adopter").await?;
        let adoption = create_test_adoption(&db, animal.id, adopter.id, Decimal::ZERO).await?;
        assert_eq!(adoption.agreed_fee, Decimal::ZERO);
        Ok(())
    }
}
