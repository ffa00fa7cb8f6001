//! Vet business logic - Visits, the procedures recorded on them, and
//! itemised services.

use crate::{
    core::{lifecycle::find_active, now, validation::ValidationErrors},
    entities::{Money, VetService, VetVisit, vet_service, vet_visit},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// At most this many named vaccinations are tracked per visit.
pub const MAX_VACCINES: usize = 3;

/// Date and cost of a routine procedure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    /// When it was done
    pub date: Option<NaiveDateTime>,
    /// Cost
    pub cost: Option<Decimal>,
}

/// A named vaccination with its date and cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccination {
    /// Vaccine name (required)
    pub name: String,
    /// When it was done
    pub date: Option<NaiveDateTime>,
    /// Cost
    pub cost: Option<Decimal>,
}

/// Input for [`create_vet_visit`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVetVisit {
    /// The animal seen; must be a positive id
    pub animal_id: i64,
    /// The vet, if known
    pub person_id: Option<i64>,
    /// Defaults to now
    pub visit_date: Option<NaiveDateTime>,
    /// Defaults to zero
    pub total_cost: Option<Decimal>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Path to the vet invoice
    pub invoice_path: Option<String>,
    /// Vet cleared the animal for adoption
    pub ready_for_adoption: bool,
    /// Worming treatment
    pub worming: Procedure,
    /// Deflea treatment
    pub deflea: Procedure,
    /// Dental work
    pub dental: Procedure,
    /// Spay or neuter surgery
    pub spay_neuter: Procedure,
    /// Up to [`MAX_VACCINES`] entries
    pub vaccines: Vec<Vaccination>,
    /// Free-text vaccination summary
    pub vaccinations: Option<String>,
}

impl NewVetVisit {
    /// Checks every field and reports all violations together.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .positive_id("animal_id", self.animal_id)
            .non_negative("total_cost", self.total_cost)
            .non_negative("worming_cost", self.worming.cost)
            .non_negative("deflea_cost", self.deflea.cost)
            .non_negative("dental_cost", self.dental.cost)
            .non_negative("spay_neuter_cost", self.spay_neuter.cost);
        if let Some(vet) = self.person_id {
            errors.positive_id("person_id", vet);
        }
        if self.vaccines.len() > MAX_VACCINES {
            errors.push(
                "vaccines",
                format!("at most {MAX_VACCINES} vaccinations can be recorded per visit"),
            );
        }
        for vaccine in &self.vaccines {
            errors
                .require("vaccines.name", Some(vaccine.name.as_str()))
                .non_negative("vaccines.cost", vaccine.cost);
        }
        errors.into_result()
    }
}

/// Input for [`add_vet_service`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVetService {
    /// Name of the service
    pub service_name: Option<String>,
    /// Cost
    pub cost: Option<Decimal>,
}

/// Validates and inserts a vet visit.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error
/// (including a foreign key failure for an unknown animal or vet).
pub async fn create_vet_visit<C: ConnectionTrait>(
    db: &C,
    input: NewVetVisit,
) -> Result<vet_visit::Model> {
    input.validate()?;

    let mut vaccines = input.vaccines.into_iter();
    let (v1, v2, v3) = (
        vaccines.next().unwrap_or_default(),
        vaccines.next().unwrap_or_default(),
        vaccines.next().unwrap_or_default(),
    );
    let named = |v: &Vaccination| (!v.name.trim().is_empty()).then(|| v.name.trim().to_string());

    let visit = vet_visit::ActiveModel {
        animal_id: Set(input.animal_id),
        person_id: Set(input.person_id),
        visit_date: Set(input.visit_date.unwrap_or_else(now)),
        total_cost: Set(input.total_cost.unwrap_or(Decimal::ZERO).into()),
        notes: Set(input.notes),
        invoice_path: Set(input.invoice_path),
        ready_for_adoption: Set(input.ready_for_adoption),
        worming_date: Set(input.worming.date),
        worming_cost: Set(input.worming.cost.map(Money::from)),
        deflea_date: Set(input.deflea.date),
        deflea_cost: Set(input.deflea.cost.map(Money::from)),
        dental_date: Set(input.dental.date),
        dental_cost: Set(input.dental.cost.map(Money::from)),
        spay_neuter_date: Set(input.spay_neuter.date),
        spay_neuter_cost: Set(input.spay_neuter.cost.map(Money::from)),
        vaccine1_name: Set(named(&v1)),
        vaccine1_date: Set(v1.date),
        vaccine1_cost: Set(v1.cost.map(Money::from)),
        vaccine2_name: Set(named(&v2)),
        vaccine2_date: Set(v2.date),
        vaccine2_cost: Set(v2.cost.map(Money::from)),
        vaccine3_name: Set(named(&v3)),
        vaccine3_date: Set(v3.date),
        vaccine3_cost: Set(v3.cost.map(Money::from)),
        vaccinations: Set(input.vaccinations),
        is_deleted: Set(false),
        ..Default::default()
    };

    Ok(visit.insert(db).await?)
}

/// Adds an itemised service to a visit.
///
/// # Errors
/// Returns a validation error for a negative cost, or a database error if the
/// visit does not exist.
pub async fn add_vet_service<C: ConnectionTrait>(
    db: &C,
    visit_id: i64,
    input: NewVetService,
) -> Result<vet_service::Model> {
    let mut errors = ValidationErrors::new();
    errors
        .positive_id("visit_id", visit_id)
        .non_negative("cost", input.cost);
    errors.into_result()?;

    let service = vet_service::ActiveModel {
        visit_id: Set(visit_id),
        service_name: Set(input.service_name),
        cost: Set(input.cost.map(Money::from)),
        ..Default::default()
    };
    Ok(service.insert(db).await?)
}

/// Finds a visit by id, including soft-deleted ones.
pub async fn get_vet_visit_by_id<C: ConnectionTrait>(
    db: &C,
    visit_id: i64,
) -> Result<Option<vet_visit::Model>> {
    VetVisit::find_by_id(visit_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Active visits for an animal, newest first.
pub async fn get_visits_for_animal<C: ConnectionTrait>(
    db: &C,
    animal_id: i64,
) -> Result<Vec<vet_visit::Model>> {
    find_active::<VetVisit>()
        .filter(vet_visit::Column::AnimalId.eq(animal_id))
        .order_by_desc(vet_visit::Column::VisitDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Services itemised on a visit, in insertion order.
pub async fn get_services_for_visit<C: ConnectionTrait>(
    db: &C,
    visit_id: i64,
) -> Result<Vec<vet_service::Model>> {
    VetService::find()
        .filter(vet_service::Column::VisitId.eq(visit_id))
        .order_by_asc(vet_service::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Physically removes a visit together with its services.
///
/// # Errors
/// Returns [`Error::NotFound`] if the visit does not exist.
#[instrument(skip(db))]
pub async fn delete_vet_visit<C: ConnectionTrait>(db: &C, visit_id: i64) -> Result<()> {
    let result = VetVisit::delete_by_id(visit_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "vet_visits".to_string(),
            id: visit_id,
        });
    }
    info!("Vet visit {} hard-deleted", visit_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::lifecycle::soft_delete;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase, PaginatorTrait};

    #[tokio::test]
    async fn test_create_vet_visit_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_vet_visit(
            &db,
            NewVetVisit {
                animal_id: 0,
                person_id: Some(-1),
                dental: Procedure {
                    date: None,
                    cost: Some(Decimal::new(-40, 0)),
                },
                vaccines: vec![Vaccination::default(); 4],
                ..Default::default()
            },
        )
        .await;

        let err = result.unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.has_field("animal_id"));
        assert!(errors.has_field("person_id"));
        assert!(errors.has_field("dental_cost"));
        assert!(errors.has_field("vaccines"));
        assert!(errors.has_field("vaccines.name"));
        Ok(())
    }

    #[tokio::test]
    async fn test_procedures_and_vaccines_are_stored() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let visit = create_vet_visit(
            &db,
            NewVetVisit {
                animal_id: animal.id,
                ready_for_adoption: true,
                worming: Procedure {
                    date: Some(now()),
                    cost: Some(Decimal::new(1250, 2)),
                },
                vaccines: vec![
                    Vaccination {
                        name: "DHPP".to_string(),
                        date: None,
                        cost: Some(Decimal::new(35, 0)),
                    },
                    Vaccination {
                        name: "Rabies".to_string(),
                        date: None,
                        cost: Some(Decimal::new(30, 0)),
                    },
                ],
                vaccinations: Some("DHPP #1, Rabies".to_string()),
                ..Default::default()
            },
        )
        .await?;

        let stored = get_vet_visit_by_id(&db, visit.id).await?.unwrap();
        assert!(stored.ready_for_adoption);
        assert_eq!(stored.total_cost, Decimal::ZERO);
        assert_eq!(stored.worming_cost, Some(Money::new(1250, 2)));
        assert_eq!(stored.vaccine1_name.as_deref(), Some("DHPP"));
        assert_eq!(stored.vaccine2_name.as_deref(), Some("Rabies"));
        assert_eq!(stored.vaccine3_name, None);
        assert!(!stored.is_deleted);
        Ok(())
    }

    #[tokio::test]
    async fn test_visit_for_unknown_animal_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_test_vet_visit(&db, 42, None).await;
        assert!(matches!(result, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_visits_for_animal_skips_soft_deleted() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let first = create_test_vet_visit(&db, animal.id, None).await?;
        create_test_vet_visit(&db, animal.id, None).await?;
        soft_delete::<VetVisit, _>(&db, first.id).await?;

        let visits = get_visits_for_animal(&db, animal.id).await?;
        assert_eq!(visits.len(), 1);
        assert_ne!(visits[0].id, first.id);

        // Explicit read still sees it
        assert!(get_vet_visit_by_id(&db, first.id).await?.unwrap().is_deleted);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_visit_cascades_services() -> Result<()> {
        let (db, animal) = setup_with_animal().await?;
        let visit = create_test_vet_visit(&db, animal.id, None).await?;
        for name in ["Exam", "Bloodwork"] {
            add_vet_service(
                &db,
                visit.id,
                NewVetService {
                    service_name: Some(name.to_string()),
                    cost: Some(Decimal::new(60, 0)),
                },
            )
            .await?;
        }
        assert_eq!(get_services_for_visit(&db, visit.id).await?.len(), 2);

        delete_vet_visit(&db, visit.id).await?;

        assert_eq!(VetService::find().count(&db).await?, 0);
        assert!(get_vet_visit_by_id(&db, visit.id).await?.is_none());
        Ok(())
    }
}
