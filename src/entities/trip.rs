//! Trip entity - A transport run moving one or more animals.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Trip database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Day of travel, indexed for date-ranged listings
    #[sea_orm(indexed)]
    pub date: DateTime,
    /// Why the trip was made
    pub purpose: Option<String>,
    /// Where the trip started
    pub start_location: Option<String>,
    /// Where the trip ended
    pub end_location: Option<String>,
    /// Distance in kilometres
    pub distance: Option<Decimal>,
    /// Fuel used, in litres
    pub fuel_litres: Option<Decimal>,
    /// Money spent on fuel
    #[sea_orm(column_type = "Text")]
    pub fuel_cost: Option<Money>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Country the trip took place in
    pub country: Option<String>,
    /// Soft delete flag
    pub is_deleted: bool,
}

/// Defines relationships between Trip and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Animals carried on this trip
    #[sea_orm(has_many = "super::trip_animal::Entity")]
    TripAnimals,
    /// Costs booked against this trip
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::trip_animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TripAnimals.def()
    }
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        super::trip_animal::Relation::Animal.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::trip_animal::Relation::Trip.def().rev())
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
