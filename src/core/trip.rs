//! Trip business logic - Transport runs and the animals they carry.

use crate::{
    core::{lifecycle::find_active, now, validation::ValidationErrors},
    entities::{Animal, Money, Trip, TripAnimal, animal, trip, trip_animal},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::{JoinType, QueryOrder, QuerySelect, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Input for [`create_trip`]. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTrip {
    /// Defaults to now
    pub date: Option<NaiveDateTime>,
    /// Why the trip was made
    pub purpose: Option<String>,
    /// Where the trip started
    pub start_location: Option<String>,
    /// Where the trip ended
    pub end_location: Option<String>,
    /// Distance driven, in kilometres
    pub distance: Option<Decimal>,
    /// Fuel used, in litres
    pub fuel_litres: Option<Decimal>,
    /// Money spent on fuel
    pub fuel_cost: Option<Decimal>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Country the trip took place in
    pub country: Option<String>,
}

impl NewTrip {
    /// Distances and fuel figures may be zero but not negative.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing each failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        errors
            .non_negative("distance", self.distance)
            .non_negative("fuel_litres", self.fuel_litres)
            .non_negative("fuel_cost", self.fuel_cost);
        errors.into_result()
    }
}

/// Validates and inserts a trip.
///
/// # Errors
/// Returns a validation error before touching the store, or a database error.
pub async fn create_trip<C: ConnectionTrait>(db: &C, input: NewTrip) -> Result<trip::Model> {
    input.validate()?;

    let trip = trip::ActiveModel {
        date: Set(input.date.unwrap_or_else(now)),
        purpose: Set(input.purpose),
        start_location: Set(input.start_location),
        end_location: Set(input.end_location),
        distance: Set(input.distance),
        fuel_litres: Set(input.fuel_litres),
        fuel_cost: Set(input.fuel_cost.map(Money::from)),
        notes: Set(input.notes),
        country: Set(input.country),
        is_deleted: Set(false),
        ..Default::default()
    };

    Ok(trip.insert(db).await?)
}

/// Finds a trip by id, including soft-deleted ones.
pub async fn get_trip_by_id<C: ConnectionTrait>(db: &C, trip_id: i64) -> Result<Option<trip::Model>> {
    Trip::find_by_id(trip_id).one(db).await.map_err(Into::into)
}

/// Active trips dated within `[from, to]`, oldest first.
pub async fn get_trips_between<C: ConnectionTrait>(
    db: &C,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<trip::Model>> {
    find_active::<Trip>()
        .filter(trip::Column::Date.between(from, to))
        .order_by_asc(trip::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Links an animal to a trip. Linking the same pair twice returns the
/// existing link.
///
/// # Errors
/// Returns a database error if either side does not exist.
pub async fn add_animal_to_trip<C: ConnectionTrait>(
    db: &C,
    trip_id: i64,
    animal_id: i64,
) -> Result<trip_animal::Model> {
    if let Some(existing) = TripAnimal::find_by_id((trip_id, animal_id)).one(db).await? {
        debug!("Animal {} already on trip {}", animal_id, trip_id);
        return Ok(existing);
    }

    let link = trip_animal::ActiveModel {
        trip_id: Set(trip_id),
        animal_id: Set(animal_id),
    };
    Ok(link.insert(db).await?)
}

/// Removes the link between an animal and a trip. Returns whether a link
/// existed.
pub async fn remove_animal_from_trip<C: ConnectionTrait>(
    db: &C,
    trip_id: i64,
    animal_id: i64,
) -> Result<bool> {
    let result = TripAnimal::delete_by_id((trip_id, animal_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Active animals carried on a trip, alphabetically.
pub async fn get_animals_for_trip<C: ConnectionTrait>(
    db: &C,
    trip_id: i64,
) -> Result<Vec<animal::Model>> {
    find_active::<Animal>()
        .join(JoinType::InnerJoin, animal::Relation::TripAnimals.def())
        .filter(trip_animal::Column::TripId.eq(trip_id))
        .order_by_asc(animal::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Physically removes a trip. Its animal links go with it; expenses keep
/// their row with `trip_id` cleared.
///
/// # Errors
/// Returns [`Error::NotFound`] if the trip does not exist.
#[instrument(skip(db))]
pub async fn delete_trip<C: ConnectionTrait>(db: &C, trip_id: i64) -> Result<()> {
    let result = Trip::delete_by_id(trip_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "trips".to_string(),
            id: trip_id,
        });
    }
    info!("Trip {} hard-deleted", trip_id);
    Ok(())
}
