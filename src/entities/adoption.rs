//! Adoption entity - Placement of an animal with an adopter.
//!
//! The adopter link is restrictive: a person cannot be hard-deleted while any
//! adoption row still names them.

use super::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Adoption database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "adoptions")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The animal
    pub animal_id: i64,
    /// The adopter
    pub person_id: i64,
    /// When the adoption took place
    pub adoption_date: DateTime,
    /// Fee agreed with the adopter
    #[sea_orm(column_type = "Text")]
    pub agreed_fee: Money,
    /// Fee paid so far
    #[sea_orm(column_type = "Text")]
    pub paid_fee: Money,
    /// Set once the paid fee covers the agreed fee
    pub paid: bool,
    /// Path to the signed contract
    pub contract_path: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Soft delete flag
    pub is_deleted: bool,
}

impl Model {
    /// Fee still to collect, never below zero.
    #[must_use]
    pub fn balance_due(&self) -> Money {
        (self.agreed_fee - self.paid_fee).max(Money::ZERO)
    }
}

/// Defines relationships between Adoption and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The animal being adopted; adoptions go with it
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Animal,
    /// The adopter; blocks deleting that person
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Adopter,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adopter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
