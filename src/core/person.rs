//! Person business logic - Adopters, vets, contacts and volunteers.
//!
//! Removing a person is the one hard delete that can be refused: while any
//! adoption row names them as adopter the store keeps the person.

use crate::{
    core::{lifecycle::find_active, now, validation::ValidationErrors},
    entities::{Adoption, Person, PersonType, adoption, person},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Maximum length of a person's name.
pub const MAX_NAME_LEN: usize = 150;

/// Input for [`create_person`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPerson {
    /// Name (required)
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// `Adopter`, `Vet`, `Contact` or `Volunteer`; defaults to `Contact`
    pub person_type: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl NewPerson {
    /// Checks every field and reports all violations together.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .require("name", Some(self.name.as_str()))
            .max_len("name", Some(self.name.trim()), MAX_NAME_LEN)
            .email("email", self.email.as_deref())
            .phone("phone", self.phone.as_deref())
            .one_of(
                "person_type",
                self.person_type.as_deref(),
                &PersonType::ALLOWED,
            );
        errors.into_result()
    }
}

/// Validates and inserts a new person.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error
/// if the insert fails.
pub async fn create_person<C: ConnectionTrait>(db: &C, input: NewPerson) -> Result<person::Model> {
    input.validate()?;

    let person_type = input
        .person_type
        .as_deref()
        .and_then(PersonType::parse)
        .unwrap_or(PersonType::Contact);

    let person = person::ActiveModel {
        name: Set(input.name.trim().to_string()),
        email: Set(input.email.filter(|e| !e.is_empty())),
        phone: Set(input.phone.filter(|p| !p.is_empty())),
        address: Set(input.address),
        person_type: Set(person_type),
        notes: Set(input.notes),
        created_at: Set(now()),
        is_deleted: Set(false),
        ..Default::default()
    };

    Ok(person.insert(db).await?)
}

/// Finds a person by id, including soft-deleted ones.
pub async fn get_person_by_id<C: ConnectionTrait>(
    db: &C,
    person_id: i64,
) -> Result<Option<person::Model>> {
    Person::find_by_id(person_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All active people, alphabetically.
pub async fn get_active_people<C: ConnectionTrait>(db: &C) -> Result<Vec<person::Model>> {
    find_active::<Person>()
        .order_by_asc(person::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active people of one type, alphabetically.
pub async fn get_people_by_type<C: ConnectionTrait>(
    db: &C,
    person_type: PersonType,
) -> Result<Vec<person::Model>> {
    find_active::<Person>()
        .filter(person::Column::PersonType.eq(person_type))
        .order_by_asc(person::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Physically removes a person.
///
/// Refused with [`Error::IntegrityViolation`] while any adoption row (soft
/// deleted or not) names the person as adopter; nothing changes in that case.
/// Otherwise vet visits and incomes that referenced the person survive with
/// `person_id` cleared by the store.
///
/// # Errors
/// Returns [`Error::NotFound`] for an unknown id, [`Error::IntegrityViolation`]
/// when adoptions reference the person, or a database error.
#[instrument(skip(db))]
pub async fn delete_person(db: &DatabaseConnection, person_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    if Person::find_by_id(person_id).one(&txn).await?.is_none() {
        return Err(Error::NotFound {
            entity: "people".to_string(),
            id: person_id,
        });
    }

    let adoptions = Adoption::find()
        .filter(adoption::Column::PersonId.eq(person_id))
        .count(&txn)
        .await?;
    if adoptions > 0 {
        warn!(
            "Refusing to delete person {}: {} adoption(s) reference them",
            person_id, adoptions
        );
        return Err(Error::IntegrityViolation {
            entity: "people".to_string(),
            id: person_id,
            relation: "adoptions".to_string(),
            dependents: adoptions,
        });
    }

    Person::delete_by_id(person_id).exec(&txn).await?;
    txn.commit().await?;

    info!("Person {} hard-deleted", person_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::lifecycle::soft_delete;
    use crate::entities::{Income, VetVisit};
    use crate::test_utils::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, Statement};

    #[tokio::test]
    async fn test_create_person_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_person(
            &db,
            NewPerson {
                name: String::new(),
                email: Some("nobody-at-example".to_string()),
                phone: Some("phone?".to_string()),
                person_type: Some("Donor".to_string()),
                ..Default::default()
            },
        )
        .await;

        let err = result.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.errors().len(), 4);
        for field in ["name", "email", "phone", "person_type"] {
            assert!(errors.has_field(field), "missing violation for {field}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_person_type_defaults_to_contact() -> Result<()> {
        let db = setup_test_db().await?;
        let person = create_person(
            &db,
            NewPerson {
                name: "Casey".to_string(),
                phone: Some("604-555-0100".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(person.person_type, PersonType::Contact);
        assert!(!person.is_deleted);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_people_by_type() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_person(&db, "Dr Vale", "Vet").await?;
        create_test_person(&db, "Dr Ash", "Vet").await?;
        create_test_person(&db, "Ada", "Adopter").await?;

        let vets = get_people_by_type(&db, PersonType::Vet).await?;
        assert_eq!(vets.len(), 2);
        assert_eq!(vets[0].name, "Dr Ash");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_adopter_is_refused() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let adopter = create_test_person(&db, "Ada Adopter", "Adopter").await?;
        create_test_adoption(&db, animal.id, adopter.id, Decimal::new(300, 0)).await?;

        let result = delete_person(&db, adopter.id).await;
        assert!(matches!(
            result,
            Err(Error::IntegrityViolation { dependents: 1, .. })
        ));
        assert!(get_person_by_id(&db, adopter.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_soft_deleted_adoption_still_restricts() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let adopter = create_test_person(&db, "Ada Adopter", "Adopter").await?;
        let adoption =
            create_test_adoption(&db, animal.id, adopter.id, Decimal::new(300, 0)).await?;
        soft_delete::<Adoption, _>(&db, adoption.id).await?;

        let result = delete_person(&db, adopter.id).await;
        assert!(matches!(result, Err(Error::IntegrityViolation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_restrict_is_enforced_by_the_store() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let adopter = create_test_person(&db, "Ada Adopter", "Adopter").await?;
        create_test_adoption(&db, animal.id, adopter.id, Decimal::new(300, 0)).await?;

        // Bypass delete_person entirely
        let raw = db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "DELETE FROM people WHERE id = ?",
                [adopter.id.into()],
            ))
            .await;
        assert!(raw.is_err());
        assert!(get_person_by_id(&db, adopter.id).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_vet_nullifies_visits_and_incomes() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let vet = create_test_person(&db, "Dr Vale", "Vet").await?;
        let visit = create_test_vet_visit(&db, animal.id, Some(vet.id)).await?;
        let income = create_test_income(&db, Decimal::new(20, 0), Some(vet.id), None).await?;

        delete_person(&db, vet.id).await?;

        assert!(get_person_by_id(&db, vet.id).await?.is_none());
        let visit = VetVisit::find_by_id(visit.id).one(&db).await?.unwrap();
        assert_eq!(visit.person_id, None);
        assert_eq!(visit.animal_id, animal.id);
        let income = Income::find_by_id(income.id).one(&db).await?.unwrap();
        assert_eq!(income.person_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_person() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_person(&db, 12).await;
        assert!(matches!(result, Err(Error::NotFound { id: 12, .. })));
        Ok(())
    }
}
