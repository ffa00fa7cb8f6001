//! Animal business logic - Intake, listing, status changes and removal.
//!
//! Hard deletion relies on the foreign keys declared on the child entities:
//! vet visits, adoptions and trip links go with the animal; expenses, incomes
//! and attachments keep their row with `animal_id` cleared.

use crate::{
    core::{lifecycle::find_active, now, validation::ValidationErrors},
    entities::{Animal, AnimalStatus, Sex, animal},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Maximum length of an animal's name.
pub const MAX_NAME_LEN: usize = 100;

/// Input for [`create_animal`]. Only `name` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAnimal {
    /// Name (required)
    pub name: String,
    /// Temporary name
    pub temp_name: Option<String>,
    /// Breed or best guess
    pub breed: Option<String>,
    /// Must be exactly `M`, `F` or `Unknown` when present
    pub sex: Option<String>,
    /// Coat colour
    pub colour: Option<String>,
    /// Collar colour used to tell littermates apart
    pub collar_colour: Option<String>,
    /// Weight in kilograms
    pub weight: Option<Decimal>,
    /// Known or estimated date of birth
    pub date_of_birth: Option<NaiveDateTime>,
    /// Defaults to now
    pub intake_date: Option<NaiveDateTime>,
    /// Recognised statuses are stored in canonical spelling
    pub status: Option<String>,
    /// Where the animal was found or surrendered
    pub origin_location: Option<String>,
    /// Country of origin
    pub origin_country: Option<String>,
    /// Free-text notes about the animal's origin
    pub origin_notes: Option<String>,
    /// Microchip number, if chipped
    pub microchip_id: Option<String>,
    /// Puppy group name (unenforced link)
    pub group_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Path to the profile photo
    pub photo_path: Option<String>,
}

impl NewAnimal {
    /// An input with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Checks every field and reports all violations together.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .require("name", Some(self.name.as_str()))
            .max_len("name", Some(self.name.trim()), MAX_NAME_LEN)
            .one_of("sex", self.sex.as_deref(), &Sex::ALLOWED)
            .non_negative("weight", self.weight);
        errors.into_result()
    }
}

/// Recognised statuses are stored in their canonical spelling so the status
/// index can serve case-insensitive lookups; anything else is kept verbatim.
fn normalise_status(status: &str) -> String {
    AnimalStatus::parse(status).map_or_else(
        || status.trim().to_string(),
        |s| s.as_str().to_string(),
    )
}

/// Validates and inserts a new animal, filling intake/created/updated
/// timestamps with the current time when not supplied.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error
/// if the insert fails.
pub async fn create_animal<C: ConnectionTrait>(db: &C, input: NewAnimal) -> Result<animal::Model> {
    input.validate()?;

    let now = now();
    let animal = animal::ActiveModel {
        name: Set(input.name.trim().to_string()),
        temp_name: Set(input.temp_name),
        breed: Set(input.breed),
        sex: Set(input.sex.as_deref().and_then(Sex::parse)),
        colour: Set(input.colour),
        collar_colour: Set(input.collar_colour),
        weight: Set(input.weight),
        date_of_birth: Set(input.date_of_birth),
        intake_date: Set(input.intake_date.unwrap_or(now)),
        status: Set(input.status.as_deref().map(normalise_status)),
        origin_location: Set(input.origin_location),
        origin_country: Set(input.origin_country),
        origin_notes: Set(input.origin_notes),
        microchip_id: Set(input.microchip_id),
        group_name: Set(input.group_name),
        notes: Set(input.notes),
        photo_path: Set(input.photo_path),
        created_at: Set(now),
        updated_at: Set(now),
        is_deleted: Set(false),
        ..Default::default()
    };

    Ok(animal.insert(db).await?)
}

/// Finds an animal by id, including soft-deleted ones.
pub async fn get_animal_by_id<C: ConnectionTrait>(
    db: &C,
    animal_id: i64,
) -> Result<Option<animal::Model>> {
    Animal::find_by_id(animal_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// All active animals, most recent intake first.
pub async fn get_active_animals<C: ConnectionTrait>(db: &C) -> Result<Vec<animal::Model>> {
    find_active::<Animal>()
        .order_by_desc(animal::Column::IntakeDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active animals with the given status. Recognised statuses match
/// case-insensitively.
pub async fn get_animals_by_status<C: ConnectionTrait>(
    db: &C,
    status: &str,
) -> Result<Vec<animal::Model>> {
    find_active::<Animal>()
        .filter(animal::Column::Status.eq(normalise_status(status)))
        .order_by_desc(animal::Column::IntakeDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active animals whose intake date falls within `[from, to]`.
pub async fn get_animals_taken_in_between<C: ConnectionTrait>(
    db: &C,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<animal::Model>> {
    find_active::<Animal>()
        .filter(animal::Column::IntakeDate.between(from, to))
        .order_by_asc(animal::Column::IntakeDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active animals carrying `group_name`. This is a lookup by value; the
/// name does not have to exist as a puppy group.
pub async fn get_animals_in_group<C: ConnectionTrait>(
    db: &C,
    group_name: &str,
) -> Result<Vec<animal::Model>> {
    find_active::<Animal>()
        .filter(animal::Column::GroupName.eq(group_name))
        .order_by_asc(animal::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets the status and refreshes `updated_at`.
///
/// # Errors
/// Returns [`Error::NotFound`] if the animal does not exist.
pub async fn update_animal_status<C: ConnectionTrait>(
    db: &C,
    animal_id: i64,
    status: Option<&str>,
) -> Result<animal::Model> {
    let existing = Animal::find_by_id(animal_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "animals".to_string(),
            id: animal_id,
        })?;

    let mut active: animal::ActiveModel = existing.into();
    active.status = Set(status.map(normalise_status));
    active.updated_at = Set(now());
    Ok(active.update(db).await?)
}

/// Physically removes an animal. Dependent vet visits (and their services),
/// adoptions and trip links are deleted by the store in the same statement;
/// expenses, incomes and attachments survive with `animal_id` cleared.
///
/// # Errors
/// Returns [`Error::NotFound`] if the animal does not exist.
#[instrument(skip(db))]
pub async fn delete_animal<C: ConnectionTrait>(db: &C, animal_id: i64) -> Result<()> {
    let result = Animal::delete_by_id(animal_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "animals".to_string(),
            id: animal_id,
        });
    }
    info!("Animal {} hard-deleted", animal_id);
    Ok(())
}
